/// Configuration loaded from a JSON file
use crate::domain::{
    slot::{SlotDescriptor, TemplateSlots},
    value_objects::{Cell, LanguageId, PageId},
    DomainError,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid template configuration: {0}")]
    Template(#[from] DomainError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_root_id() -> i64 {
    1
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Runtime configuration.
///
/// ```json
/// {
///   "database_path": "content.db",
///   "log_filter": "repeated_content=debug",
///   "templates": {
///     "home": { "logo": "site", "menu": "language", "content": "page_and_language" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// SQLite database file; an in-memory database is used when absent
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default = "default_root_id")]
    pub root_page_id: i64,

    #[serde(default = "default_root_id")]
    pub root_language_id: i64,

    /// Fallback tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Template name to slot name to repetition policy name
    #[serde(default)]
    pub templates: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            database_path: None,
            root_page_id: default_root_id(),
            root_language_id: default_root_id(),
            log_filter: default_log_filter(),
            templates: BTreeMap::new(),
        }
    }
}

impl ContentConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The cell standing for "every page" and "every language"
    pub fn root(&self) -> Cell {
        Cell::new(
            PageId::new(self.root_page_id),
            LanguageId::new(self.root_language_id),
        )
    }

    /// Slot descriptors of every configured template.
    ///
    /// Policy names are not resolved here; an unknown one surfaces when a
    /// converter is requested for the slot.
    pub fn templates(&self) -> ConfigResult<Vec<TemplateSlots>> {
        self.templates
            .iter()
            .map(|(template_name, slots)| {
                let descriptors = slots
                    .iter()
                    .map(|(name, repeated)| SlotDescriptor::from_config(name.as_str(), repeated.as_str()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TemplateSlots::new(template_name.as_str(), descriptors)?)
            })
            .collect()
    }

    pub fn template(&self, template_name: &str) -> ConfigResult<Option<TemplateSlots>> {
        Ok(self
            .templates()?
            .into_iter()
            .find(|template| template.template_name() == template_name))
    }
}
