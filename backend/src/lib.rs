//! Content core of the CMS: pages, slot contents and the conversion of
//! repeated slots across pages and languages.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
