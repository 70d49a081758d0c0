use super::{StoreResult, Transactional};
use crate::domain::{entities::Page, value_objects::PageId};

/// Repository trait for managing pages.
///
/// This trait defines the contract for persisting and retrieving pages
/// from a data store. Implementations can be backed by different storage mechanisms
/// (in-memory, database, etc.).
pub trait PageRepository: Transactional {
    /// Returns the active pages, in store order.
    fn active_pages(&self) -> StoreResult<Vec<Page>>;

    /// Finds a page by its unique identifier.
    ///
    /// Returns `Ok(Some(page))` if found, `Ok(None)` if not found,
    /// or an error if the operation fails.
    fn find_by_id(&self, id: PageId) -> StoreResult<Option<Page>>;

    /// Finds a page by its name.
    fn find_by_name(&self, page_name: &str) -> StoreResult<Option<Page>>;

    /// Returns the current home page, if any.
    fn home_page(&self) -> StoreResult<Option<Page>>;

    /// Whether at least one active page exists.
    fn has_pages(&self) -> StoreResult<bool> {
        Ok(!self.active_pages()?.is_empty())
    }

    /// Saves a page to the repository.
    ///
    /// A page without id is inserted and receives its id, otherwise it is
    /// updated. Returns `Ok(false)` when the store refused the write.
    fn save(&self, page: &mut Page) -> StoreResult<bool>;

    /// Deletes a page together with its blocks.
    ///
    /// Returns `Ok(true)` if the page was deleted, `Ok(false)` if nothing
    /// was removed, or an error if the operation fails.
    fn delete(&self, page: &Page) -> StoreResult<bool>;
}
