pub mod block_repository;
pub mod language_repository;
pub mod page_repository;
pub mod transaction;

use thiserror::Error;

pub use block_repository::BlockRepository;
pub use language_repository::LanguageRepository;
pub use page_repository::PageRepository;
pub use transaction::{run_in_transaction, TransactionOutcome};

/// Unexpected failures raised by a store.
///
/// Logical failures (a row that could not be written or removed) are not
/// errors: repositories report them as `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Transaction error: {0}")]
    Transaction(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Transaction control shared by every repository
pub trait Transactional {
    /// Opens a transaction. Transactions are never nested.
    fn start_transaction(&self) -> StoreResult<()>;

    fn commit(&self) -> StoreResult<()>;

    fn roll_back(&self) -> StoreResult<()>;
}
