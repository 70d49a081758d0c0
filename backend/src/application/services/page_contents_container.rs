/// Contents of one page in one language, arranged by slot
use super::ContentResult;
use crate::application::repositories::BlockRepository;
use crate::domain::{
    entities::Block,
    value_objects::{LanguageId, PageId, SlotName},
    DomainError, DomainResult,
};
use std::collections::HashMap;
use std::fmt;

/// Loads the blocks of a (page, language) pair and groups them by slot name.
///
/// The container is a transient view: every `refresh` reloads the whole
/// state from the block store.
pub struct PageContentsContainer<'a, B: BlockRepository + ?Sized> {
    repository: &'a B,
    page_id: Option<PageId>,
    language_id: Option<LanguageId>,
    blocks: HashMap<SlotName, Vec<Block>>,
}

impl<'a, B: BlockRepository + ?Sized> PageContentsContainer<'a, B> {
    pub fn new(repository: &'a B) -> Self {
        PageContentsContainer {
            repository,
            page_id: None,
            language_id: None,
            blocks: HashMap::new(),
        }
    }

    /// Sets the page to load. Fails when the value is not numeric.
    pub fn set_page_id(&mut self, value: impl fmt::Display) -> DomainResult<&mut Self> {
        self.page_id = Some(PageId::parse(value)?);
        Ok(self)
    }

    /// Sets the language to load. Fails when the value is not numeric.
    pub fn set_language_id(&mut self, value: impl fmt::Display) -> DomainResult<&mut Self> {
        self.language_id = Some(LanguageId::parse(value)?);
        Ok(self)
    }

    pub fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    pub fn language_id(&self) -> Option<LanguageId> {
        self.language_id
    }

    /// Reloads the blocks from the store, replacing the previous state
    pub fn refresh(&mut self) -> ContentResult<&mut Self> {
        let language_id = self.language_id.ok_or_else(|| {
            DomainError::MissingParameter(
                "Contents cannot be retrieved because the language id has not been set"
                    .to_string(),
            )
        })?;
        let page_id = self.page_id.ok_or_else(|| {
            DomainError::MissingParameter(
                "Contents cannot be retrieved because the page id has not been set".to_string(),
            )
        })?;

        let retrieved = self.repository.retrieve_contents(language_id, page_id)?;
        tracing::debug!(
            page = %page_id,
            language = %language_id,
            blocks = retrieved.len(),
            "page contents refreshed"
        );

        let mut blocks: HashMap<SlotName, Vec<Block>> = HashMap::new();
        for block in retrieved {
            blocks
                .entry(block.slot_name().clone())
                .or_insert_with(Vec::new)
                .push(block);
        }
        self.blocks = blocks;

        Ok(self)
    }

    /// All the blocks of the page, keyed by slot name
    pub fn blocks(&self) -> &HashMap<SlotName, Vec<Block>> {
        &self.blocks
    }

    /// The blocks placed on the given slot, empty when the slot has none
    pub fn slot_blocks(&self, slot_name: &SlotName) -> &[Block] {
        self.blocks
            .get(slot_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
