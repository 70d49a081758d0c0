/// Picks and builds the converter for a slot's repetition policy
use super::page_contents_container::PageContentsContainer;
use super::slot_converter::SlotConverter;
use crate::application::repositories::{BlockRepository, LanguageRepository, PageRepository};
use crate::domain::{
    slot::SlotDescriptor,
    value_objects::{Cell, LanguageId, PageId, RepetitionPolicy},
    DomainResult,
};

/// Builds slot converters bound to the three repositories.
pub struct SlotConverterFactory<'a, B, L, P>
where
    B: BlockRepository + ?Sized,
    L: LanguageRepository + ?Sized,
    P: PageRepository + ?Sized,
{
    blocks: &'a B,
    languages: &'a L,
    pages: &'a P,
    root: Cell,
}

impl<'a, B, L, P> SlotConverterFactory<'a, B, L, P>
where
    B: BlockRepository + ?Sized,
    L: LanguageRepository + ?Sized,
    P: PageRepository + ?Sized,
{
    /// Factory using page 1 and language 1 as the root cell
    pub fn new(blocks: &'a B, languages: &'a L, pages: &'a P) -> Self {
        SlotConverterFactory {
            blocks,
            languages,
            pages,
            root: Cell::new(PageId::new(1), LanguageId::new(1)),
        }
    }

    pub fn with_root(mut self, root: Cell) -> Self {
        self.root = root;
        self
    }

    /// Converter towards the policy the slot is configured with
    pub fn create<C>(
        &self,
        slot: &SlotDescriptor,
        container: &PageContentsContainer<'_, C>,
    ) -> DomainResult<SlotConverter<'a, B, L, P>>
    where
        C: BlockRepository + ?Sized,
    {
        self.build(slot, slot.policy()?, container)
    }

    /// Converter towards an explicitly requested policy
    pub fn create_for<C>(
        &self,
        slot: &SlotDescriptor,
        requested: &str,
        container: &PageContentsContainer<'_, C>,
    ) -> DomainResult<SlotConverter<'a, B, L, P>>
    where
        C: BlockRepository + ?Sized,
    {
        self.build(slot, requested.parse()?, container)
    }

    fn build<C>(
        &self,
        slot: &SlotDescriptor,
        target: RepetitionPolicy,
        container: &PageContentsContainer<'_, C>,
    ) -> DomainResult<SlotConverter<'a, B, L, P>>
    where
        C: BlockRepository + ?Sized,
    {
        let reference_blocks = container.slot_blocks(slot.name()).to_vec();

        tracing::debug!(
            slot = %slot.name(),
            target = %target,
            reference_blocks = reference_blocks.len(),
            "slot converter created"
        );

        Ok(SlotConverter::new(
            slot.clone(),
            target,
            reference_blocks,
            self.root,
            self.blocks,
            self.languages,
            self.pages,
        ))
    }
}
