pub mod repositories;
pub mod services;

// Re-export key types to avoid naming conflicts
pub use repositories::{
    BlockRepository, LanguageRepository, PageRepository, StoreError, StoreResult, Transactional,
};
pub use services::{
    ContentError, ContentResult, ConversionOutcome, ConversionPhase, PageChange, PageChanges,
    PageContentsContainer, PageError, PageManager, PageResult, SlotConverter,
    SlotConverterFactory,
};
