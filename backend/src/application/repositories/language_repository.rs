use super::StoreResult;
use crate::domain::entities::Language;

/// Read access to the languages of the site.
pub trait LanguageRepository {
    /// Returns the active languages, in store order.
    fn active_languages(&self) -> StoreResult<Vec<Language>>;

    /// Whether at least one active language exists.
    fn has_languages(&self) -> StoreResult<bool> {
        Ok(!self.active_languages()?.is_empty())
    }
}
