pub mod page_contents_container;
pub mod page_manager;
pub mod slot_converter;
pub mod slot_converter_factory;

use crate::application::repositories::StoreError;
use crate::domain::DomainError;
use thiserror::Error;

pub use page_contents_container::PageContentsContainer;
pub use page_manager::{PageChange, PageChanges, PageError, PageManager, PageResult};
pub use slot_converter::{ConversionOutcome, ConversionPhase, SlotConverter};
pub use slot_converter_factory::SlotConverterFactory;

/// Errors raised while loading or preparing page contents
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Store(#[from] StoreError),
}

pub type ContentResult<T> = Result<T, ContentError>;
