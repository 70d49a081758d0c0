/// Conversion of repeated slot contents
use crate::application::repositories::{
    run_in_transaction, BlockRepository, LanguageRepository, PageRepository, StoreResult,
    TransactionOutcome,
};
use crate::domain::{
    base::Entity,
    entities::Block,
    slot::SlotDescriptor,
    value_objects::{Cell, RepetitionPolicy, SlotName},
};

/// The phase of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionPhase {
    /// Removal of every block stored under the slot
    Purge,
    /// Creation of the synchronized copies
    Propagate,
}

/// Result of a conversion that did not hit an unexpected store error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The slot has no blocks, nothing was touched
    Skipped,
    /// Both phases committed
    Converted { removed: usize, written: usize },
    /// The store refused a delete or a save; the phase was rolled back
    RolledBack { phase: ConversionPhase },
}

impl ConversionOutcome {
    /// `None` when skipped, otherwise whether the conversion went through
    pub fn as_option(&self) -> Option<bool> {
        match self {
            ConversionOutcome::Skipped => None,
            ConversionOutcome::Converted { .. } => Some(true),
            ConversionOutcome::RolledBack { .. } => Some(false),
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted { .. })
    }
}

/// Rewrites the blocks of a slot so that exactly one copy of each reference
/// block exists in every cell the target policy requires.
///
/// The conversion runs in two transactions: every block stored under the
/// slot name is deleted first, then the copies are written. Nothing is
/// written unless the purge committed.
pub struct SlotConverter<'a, B, L, P>
where
    B: BlockRepository + ?Sized,
    L: LanguageRepository + ?Sized,
    P: PageRepository + ?Sized,
{
    slot: SlotDescriptor,
    target: RepetitionPolicy,
    reference_blocks: Vec<Block>,
    root: Cell,
    blocks: &'a B,
    languages: &'a L,
    pages: &'a P,
}

impl<'a, B, L, P> SlotConverter<'a, B, L, P>
where
    B: BlockRepository + ?Sized,
    L: LanguageRepository + ?Sized,
    P: PageRepository + ?Sized,
{
    /// `root` is the cell that stands for "every page" and "every language".
    pub fn new(
        slot: SlotDescriptor,
        target: RepetitionPolicy,
        reference_blocks: Vec<Block>,
        root: Cell,
        blocks: &'a B,
        languages: &'a L,
        pages: &'a P,
    ) -> Self {
        SlotConverter {
            slot,
            target,
            reference_blocks,
            root,
            blocks,
            languages,
            pages,
        }
    }

    pub fn slot(&self) -> &SlotDescriptor {
        &self.slot
    }

    pub fn target(&self) -> RepetitionPolicy {
        self.target
    }

    pub fn reference_blocks(&self) -> &[Block] {
        &self.reference_blocks
    }

    /// Converts the slot to the target policy.
    ///
    /// Unexpected store errors are returned unchanged, after the open
    /// transaction has been rolled back.
    pub fn convert(&self) -> StoreResult<ConversionOutcome> {
        if self.reference_blocks.is_empty() {
            tracing::debug!(slot = %self.slot.name(), "slot has no blocks, nothing to convert");
            return Ok(ConversionOutcome::Skipped);
        }

        tracing::info!(
            slot = %self.slot.name(),
            target = %self.target,
            reference_blocks = self.reference_blocks.len(),
            "converting repeated slot"
        );

        let (purged, removed) = self.purge()?;
        if !purged.is_committed() {
            return Ok(ConversionOutcome::RolledBack {
                phase: ConversionPhase::Purge,
            });
        }

        let cells = self.target_cells()?;
        let (propagated, written) = self.propagate(&cells)?;
        if !propagated.is_committed() {
            return Ok(ConversionOutcome::RolledBack {
                phase: ConversionPhase::Propagate,
            });
        }

        tracing::info!(
            slot = %self.slot.name(),
            target = %self.target,
            removed,
            written,
            "repeated slot converted"
        );

        Ok(ConversionOutcome::Converted { removed, written })
    }

    /// Deletes every stored block carrying the slot names of the reference
    /// blocks, on any page and in any language.
    fn purge(&self) -> StoreResult<(TransactionOutcome, usize)> {
        let mut stale = Vec::new();
        for slot_name in self.reference_slot_names() {
            stale.extend(self.blocks.retrieve_contents_by_slot_name(slot_name)?);
        }

        let mut removed = 0;
        let outcome = run_in_transaction(self.blocks, "purge", || {
            for block in &stale {
                if !self.blocks.delete(block)? {
                    tracing::warn!(
                        slot = %block.slot_name(),
                        block = ?block.id(),
                        "block could not be removed"
                    );
                    return Ok(false);
                }
                removed += 1;
            }
            Ok(true)
        })?;

        Ok((outcome, removed))
    }

    /// Writes one copy of each reference block into each cell
    fn propagate(&self, cells: &[Cell]) -> StoreResult<(TransactionOutcome, usize)> {
        let mut written = 0;
        let outcome = run_in_transaction(self.blocks, "propagate", || {
            for block in &self.reference_blocks {
                for cell in cells {
                    let mut copy = block.copy_to(*cell);
                    if !self.blocks.save(&mut copy)? {
                        tracing::warn!(
                            slot = %block.slot_name(),
                            cell = %cell,
                            "block copy could not be saved"
                        );
                        return Ok(false);
                    }
                    written += 1;
                }
            }
            Ok(true)
        })?;

        Ok((outcome, written))
    }

    /// The cells the target policy requires a copy in.
    ///
    /// Pages and languages keep the order of the active lookups, pages outer.
    pub fn target_cells(&self) -> StoreResult<Vec<Cell>> {
        let cells = match self.target {
            RepetitionPolicy::None => vec![self.root],
            RepetitionPolicy::Language => self
                .languages
                .active_languages()?
                .iter()
                .filter_map(|language| language.id().copied())
                .map(|language_id| Cell::new(self.root.page_id, language_id))
                .collect(),
            RepetitionPolicy::Page => self
                .pages
                .active_pages()?
                .iter()
                .filter_map(|page| page.id().copied())
                .map(|page_id| Cell::new(page_id, self.root.language_id))
                .collect(),
            RepetitionPolicy::PageAndLanguage => {
                let languages: Vec<_> = self
                    .languages
                    .active_languages()?
                    .iter()
                    .filter_map(|language| language.id().copied())
                    .collect();
                self.pages
                    .active_pages()?
                    .iter()
                    .filter_map(|page| page.id().copied())
                    .flat_map(|page_id| {
                        languages
                            .iter()
                            .map(move |language_id| Cell::new(page_id, *language_id))
                    })
                    .collect()
            }
        };

        Ok(cells)
    }

    /// Distinct slot names of the reference blocks, in first-seen order
    fn reference_slot_names(&self) -> Vec<&SlotName> {
        let mut names: Vec<&SlotName> = Vec::new();
        for block in &self.reference_blocks {
            if !names.contains(&block.slot_name()) {
                names.push(block.slot_name());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repositories::{StoreResult, Transactional};
    use crate::domain::entities::{Language, Page};
    use crate::domain::value_objects::{BlockId, LanguageId, PageId};
    use std::cell::RefCell;

    /// Minimal store: keeps every row in memory and never fails
    #[derive(Default)]
    struct MemoryStore {
        blocks: RefCell<Vec<Block>>,
        languages: Vec<Language>,
        pages: Vec<Page>,
    }

    impl Transactional for MemoryStore {
        fn start_transaction(&self) -> StoreResult<()> {
            Ok(())
        }

        fn commit(&self) -> StoreResult<()> {
            Ok(())
        }

        fn roll_back(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    impl BlockRepository for MemoryStore {
        fn retrieve_contents(
            &self,
            language_id: LanguageId,
            page_id: PageId,
        ) -> StoreResult<Vec<Block>> {
            Ok(self
                .blocks
                .borrow()
                .iter()
                .filter(|b| {
                    [ROOT.page_id, page_id].contains(&b.page_id())
                        && [ROOT.language_id, language_id].contains(&b.language_id())
                })
                .cloned()
                .collect())
        }

        fn retrieve_contents_by_slot_name(&self, slot_name: &SlotName) -> StoreResult<Vec<Block>> {
            Ok(self
                .blocks
                .borrow()
                .iter()
                .filter(|b| b.slot_name() == slot_name)
                .cloned()
                .collect())
        }

        fn delete(&self, block: &Block) -> StoreResult<bool> {
            let mut blocks = self.blocks.borrow_mut();
            let before = blocks.len();
            blocks.retain(|b| b.id() != block.id());
            Ok(blocks.len() < before)
        }

        fn save(&self, block: &mut Block) -> StoreResult<bool> {
            let mut blocks = self.blocks.borrow_mut();
            block.assign_id(BlockId::new(100 + blocks.len() as i64));
            blocks.push(block.clone());
            Ok(true)
        }
    }

    impl LanguageRepository for MemoryStore {
        fn active_languages(&self) -> StoreResult<Vec<Language>> {
            Ok(self.languages.clone())
        }
    }

    impl PageRepository for MemoryStore {
        fn active_pages(&self) -> StoreResult<Vec<Page>> {
            Ok(self.pages.clone())
        }

        fn find_by_id(&self, id: PageId) -> StoreResult<Option<Page>> {
            Ok(self.pages.iter().find(|p| p.id() == Some(&id)).cloned())
        }

        fn find_by_name(&self, page_name: &str) -> StoreResult<Option<Page>> {
            Ok(self.pages.iter().find(|p| p.page_name() == page_name).cloned())
        }

        fn home_page(&self) -> StoreResult<Option<Page>> {
            Ok(self.pages.iter().find(|p| p.is_home()).cloned())
        }

        fn save(&self, _page: &mut Page) -> StoreResult<bool> {
            Ok(true)
        }

        fn delete(&self, _page: &Page) -> StoreResult<bool> {
            Ok(true)
        }
    }

    const ROOT: Cell = Cell::new(PageId::new(1), LanguageId::new(1));

    fn store() -> MemoryStore {
        let menu = Block::new(
            SlotName::new("menu").unwrap(),
            Cell::new(PageId::new(2), LanguageId::new(2)),
            "Menu",
            "<ul></ul>",
        )
        .with_id(BlockId::new(1));

        MemoryStore {
            blocks: RefCell::new(vec![menu]),
            languages: vec![
                Language::new("en").with_id(LanguageId::new(2)),
                Language::new("it").with_id(LanguageId::new(3)),
            ],
            pages: vec![
                Page::new("index", "home").with_id(PageId::new(2)),
                Page::new("news", "home").with_id(PageId::new(3)),
            ],
        }
    }

    fn converter(
        store: &MemoryStore,
        target: RepetitionPolicy,
    ) -> SlotConverter<'_, MemoryStore, MemoryStore, MemoryStore> {
        let slot = SlotDescriptor::new(SlotName::new("menu").unwrap(), target);
        let reference = store.blocks.borrow().clone();
        SlotConverter::new(slot, target, reference, ROOT, store, store, store)
    }

    fn cells(pairs: &[(i64, i64)]) -> Vec<Cell> {
        pairs
            .iter()
            .map(|(p, l)| Cell::new(PageId::new(*p), LanguageId::new(*l)))
            .collect()
    }

    #[test]
    fn test_target_cells_per_policy() {
        let store = store();

        assert_eq!(
            converter(&store, RepetitionPolicy::None).target_cells().unwrap(),
            cells(&[(1, 1)])
        );
        assert_eq!(
            converter(&store, RepetitionPolicy::Language).target_cells().unwrap(),
            cells(&[(1, 2), (1, 3)])
        );
        assert_eq!(
            converter(&store, RepetitionPolicy::Page).target_cells().unwrap(),
            cells(&[(2, 1), (3, 1)])
        );
        assert_eq!(
            converter(&store, RepetitionPolicy::PageAndLanguage)
                .target_cells()
                .unwrap(),
            cells(&[(2, 2), (2, 3), (3, 2), (3, 3)])
        );
    }

    #[test]
    fn test_convert_replaces_slot_contents() {
        let store = store();
        let outcome = converter(&store, RepetitionPolicy::Language).convert().unwrap();

        assert_eq!(
            outcome,
            ConversionOutcome::Converted {
                removed: 1,
                written: 2
            }
        );
        assert_eq!(outcome.as_option(), Some(true));

        let stored = store.blocks.borrow();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|b| b.content() == "<ul></ul>"));
        assert!(stored.iter().all(|b| b.page_id() == PageId::new(1)));
        assert!(stored.iter().all(|b| b.id() != Some(&BlockId::new(1))));
    }

    #[test]
    fn test_convert_without_reference_blocks_is_skipped() {
        let store = store();
        let slot = SlotDescriptor::new(SlotName::new("menu").unwrap(), RepetitionPolicy::Page);
        let converter =
            SlotConverter::new(slot, RepetitionPolicy::Page, vec![], ROOT, &store, &store, &store);

        let outcome = converter.convert().unwrap();
        assert_eq!(outcome, ConversionOutcome::Skipped);
        assert_eq!(outcome.as_option(), None);
        assert_eq!(store.blocks.borrow().len(), 1);
    }

    #[test]
    fn test_rolled_back_outcome_maps_to_false() {
        let outcome = ConversionOutcome::RolledBack {
            phase: ConversionPhase::Purge,
        };
        assert_eq!(outcome.as_option(), Some(false));
        assert!(!outcome.is_converted());
    }
}
