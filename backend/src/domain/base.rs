/// Base DDD abstractions for the domain layer
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use thiserror::Error;

/// Trait for value objects - immutable objects defined by their attributes
/// Value objects are equal if all their attributes are equal
pub trait ValueObject: Clone + PartialEq + Eq + Debug {}

/// Trait for entities - objects with identity that can change over time
///
/// Identity is assigned by the store, so an entity that has not been
/// persisted yet has no id.
pub trait Entity: Debug {
    type Id: ValueObject;

    fn id(&self) -> Option<&Self::Id>;

    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

/// Trait for domain events - things that have happened in the domain
pub trait DomainEvent: Debug + Clone {
    /// The name/type of the event
    fn event_type(&self) -> &'static str;

    /// Identifier of the aggregate the event belongs to
    fn aggregate_id(&self) -> String;

    /// When the event occurred
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A parameter has the wrong type, e.g. a non numeric id
    #[error("Invalid parameter type: {0}")]
    InvalidParameterType(String),

    /// A required parameter has not been set
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// A repetition policy without a converter
    #[error("Unsupported repetition policy: {0}")]
    UnsupportedPolicy(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
}
