use super::{StoreResult, Transactional};

/// How a transaction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    Committed,
    RolledBack,
}

impl TransactionOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, TransactionOutcome::Committed)
    }
}

/// Runs `work` inside a transaction on `store`.
///
/// `work` returning `Ok(true)` commits, `Ok(false)` rolls back. An error
/// rolls back and is returned unchanged; a failing rollback at that point is
/// only logged.
pub fn run_in_transaction<S, F>(store: &S, label: &str, work: F) -> StoreResult<TransactionOutcome>
where
    S: Transactional + ?Sized,
    F: FnOnce() -> StoreResult<bool>,
{
    store.start_transaction()?;
    tracing::debug!(transaction = label, "transaction started");

    match work() {
        Ok(true) => match store.commit() {
            Ok(()) => {
                tracing::debug!(transaction = label, "transaction committed");
                Ok(TransactionOutcome::Committed)
            }
            Err(e) => {
                tracing::error!(transaction = label, "commit failed: {}", e);
                roll_back_after_error(store, label);
                Err(e)
            }
        },
        Ok(false) => {
            tracing::warn!(transaction = label, "transaction rolled back");
            store.roll_back()?;
            Ok(TransactionOutcome::RolledBack)
        }
        Err(e) => {
            tracing::error!(transaction = label, "unexpected store error: {}", e);
            roll_back_after_error(store, label);
            Err(e)
        }
    }
}

fn roll_back_after_error<S: Transactional + ?Sized>(store: &S, label: &str) {
    if let Err(e) = store.roll_back() {
        tracing::warn!(transaction = label, "rollback failed: {}", e);
    }
}
