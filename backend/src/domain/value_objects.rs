/// Value objects for the domain layer
use super::base::{DomainError, DomainResult, ValueObject};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parses a store identifier out of an arbitrary request value.
///
/// Only non-negative integers are accepted. This is narrower than "looks
/// numeric": fractional values such as `"2.5"` and padded values such as
/// `" 2"` are rejected too.
fn parse_numeric_id(value: impl fmt::Display, label: &str) -> DomainResult<i64> {
    let raw = value.to_string();
    match raw.parse::<i64>() {
        Ok(id) if id >= 0 => Ok(id),
        _ => Err(DomainError::InvalidParameterType(format!(
            "The {} id must be a numeric value, got {:?}",
            label, raw
        ))),
    }
}

/// Unique identifier for a Page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(i64);

impl PageId {
    pub const fn new(id: i64) -> Self {
        PageId(id)
    }

    /// Parse a page id from a request parameter
    pub fn parse(value: impl fmt::Display) -> DomainResult<Self> {
        parse_numeric_id(value, "page").map(PageId)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ValueObject for PageId {}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a Language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LanguageId(i64);

impl LanguageId {
    pub const fn new(id: i64) -> Self {
        LanguageId(id)
    }

    /// Parse a language id from a request parameter
    pub fn parse(value: impl fmt::Display) -> DomainResult<Self> {
        parse_numeric_id(value, "language").map(LanguageId)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ValueObject for LanguageId {}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a Block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(i64);

impl BlockId {
    pub const fn new(id: i64) -> Self {
        BlockId(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ValueObject for BlockId {}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a slot on a page template
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotName(String);

impl SlotName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "Slot name cannot be empty".to_string(),
            ));
        }
        Ok(SlotName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for SlotName {}

impl TryFrom<String> for SlotName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SlotName::new(value)
    }
}

impl From<SlotName> for String {
    fn from(name: SlotName) -> Self {
        name.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the content of a slot is repeated across pages and languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepetitionPolicy {
    /// One block shared by every page in every language
    #[serde(alias = "site")]
    None,
    /// Shared by every page of the same language
    Language,
    /// Shared by every language of the same page
    Page,
    /// Independent for each page in each language
    PageAndLanguage,
}

impl RepetitionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepetitionPolicy::None => "none",
            RepetitionPolicy::Language => "language",
            RepetitionPolicy::Page => "page",
            RepetitionPolicy::PageAndLanguage => "page_and_language",
        }
    }
}

impl ValueObject for RepetitionPolicy {}

impl FromStr for RepetitionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "site" => Ok(RepetitionPolicy::None),
            "language" => Ok(RepetitionPolicy::Language),
            "page" => Ok(RepetitionPolicy::Page),
            "page_and_language" => Ok(RepetitionPolicy::PageAndLanguage),
            other => Err(DomainError::UnsupportedPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for RepetitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (page, language) pair a block is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub page_id: PageId,
    pub language_id: LanguageId,
}

impl Cell {
    pub const fn new(page_id: PageId, language_id: LanguageId) -> Self {
        Cell {
            page_id,
            language_id,
        }
    }
}

impl ValueObject for Cell {}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} / language {}", self.page_id, self.language_id)
    }
}
