use super::{StoreResult, Transactional};
use crate::domain::{
    entities::Block,
    value_objects::{LanguageId, PageId, SlotName},
};

/// Repository trait for content blocks.
pub trait BlockRepository: Transactional {
    /// Returns the blocks shown on the given page in the given language,
    /// ordered by slot and content position.
    ///
    /// Blocks bound to the root page or the root language are shared by
    /// every page or every language, so they are part of the result too.
    fn retrieve_contents(&self, language_id: LanguageId, page_id: PageId)
        -> StoreResult<Vec<Block>>;

    /// Returns every block stored under the slot name, whatever page or
    /// language it is bound to.
    fn retrieve_contents_by_slot_name(&self, slot_name: &SlotName) -> StoreResult<Vec<Block>>;

    /// Removes a block. `Ok(false)` means the store could not remove it.
    fn delete(&self, block: &Block) -> StoreResult<bool>;

    /// Saves a block, assigning its id when it is new. `Ok(false)` means the
    /// store refused the write.
    fn save(&self, block: &mut Block) -> StoreResult<bool>;
}
