use repeated_content::application::{
    repositories::{LanguageRepository, PageRepository, StoreResult, Transactional},
    services::{PageChange, PageChanges, PageError, PageManager},
};
use repeated_content::domain::{
    base::{DomainError, DomainEvent, Entity},
    entities::{Language, Page},
    events::PageEvent,
    value_objects::{LanguageId, PageId},
};
use std::cell::{Cell, RefCell};

/// In-memory page store with snapshot based transactions
#[derive(Default)]
struct InMemoryPageStore {
    pages: RefCell<Vec<Page>>,
    snapshot: RefCell<Option<Vec<Page>>>,
    languages: Vec<Language>,
    refuse_saves: Cell<bool>,
    next_id: Cell<i64>,
}

impl InMemoryPageStore {
    fn with_languages() -> Self {
        Self {
            languages: vec![Language::new("en").with_id(LanguageId::new(2))],
            next_id: Cell::new(1),
            ..Default::default()
        }
    }

    fn page(&self, id: PageId) -> Page {
        self.pages
            .borrow()
            .iter()
            .find(|p| p.id() == Some(&id))
            .cloned()
            .unwrap()
    }

    fn home_id(&self) -> Option<PageId> {
        self.pages
            .borrow()
            .iter()
            .find(|p| p.is_home())
            .and_then(|p| p.id().copied())
    }
}

impl Transactional for InMemoryPageStore {
    fn start_transaction(&self) -> StoreResult<()> {
        *self.snapshot.borrow_mut() = Some(self.pages.borrow().clone());
        Ok(())
    }

    fn commit(&self) -> StoreResult<()> {
        self.snapshot.borrow_mut().take();
        Ok(())
    }

    fn roll_back(&self) -> StoreResult<()> {
        if let Some(pages) = self.snapshot.borrow_mut().take() {
            *self.pages.borrow_mut() = pages;
        }
        Ok(())
    }
}

impl PageRepository for InMemoryPageStore {
    fn active_pages(&self) -> StoreResult<Vec<Page>> {
        Ok(self
            .pages
            .borrow()
            .iter()
            .filter(|p| p.is_active())
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: PageId) -> StoreResult<Option<Page>> {
        Ok(self.pages.borrow().iter().find(|p| p.id() == Some(&id)).cloned())
    }

    fn find_by_name(&self, page_name: &str) -> StoreResult<Option<Page>> {
        Ok(self
            .pages
            .borrow()
            .iter()
            .find(|p| p.page_name() == page_name)
            .cloned())
    }

    fn home_page(&self) -> StoreResult<Option<Page>> {
        Ok(self.pages.borrow().iter().find(|p| p.is_home()).cloned())
    }

    fn save(&self, page: &mut Page) -> StoreResult<bool> {
        if self.refuse_saves.get() {
            return Ok(false);
        }

        let mut pages = self.pages.borrow_mut();
        match page.id().copied() {
            None => {
                let id = self.next_id.get() + 1;
                self.next_id.set(id);
                page.assign_id(PageId::new(id));
                pages.push(page.clone());
            }
            Some(id) => match pages.iter_mut().find(|p| p.id() == Some(&id)) {
                Some(stored) => *stored = page.clone(),
                None => return Ok(false),
            },
        }
        Ok(true)
    }

    fn delete(&self, page: &Page) -> StoreResult<bool> {
        let mut pages = self.pages.borrow_mut();
        let before = pages.len();
        pages.retain(|p| p.id() != page.id());
        Ok(pages.len() < before)
    }
}

impl LanguageRepository for InMemoryPageStore {
    fn active_languages(&self) -> StoreResult<Vec<Language>> {
        Ok(self.languages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_page(name: &str, template: &str) -> PageChanges {
        PageChanges {
            page_name: Some(name.to_string()),
            template_name: Some(template.to_string()),
            is_home: None,
        }
    }

    fn added_id(change: &PageChange) -> PageId {
        match change.events().first() {
            Some(PageEvent::Added(added)) => added.page_id,
            other => panic!("expected a PageAdded event, got {:?}", other),
        }
    }

    #[test]
    fn test_first_page_becomes_home() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);

        let change = manager.add(new_page("index", "home")).unwrap();

        assert!(change.is_committed());
        let events = change.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "PageAdded");
        match &events[1] {
            PageEvent::HomeChanged(home) => assert_eq!(home.previous_home, None),
            other => panic!("expected a HomePageChanged event, got {:?}", other),
        }
        assert_eq!(store.home_id(), Some(added_id(&change)));
    }

    #[test]
    fn test_second_page_does_not_take_home() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);

        let index = added_id(&manager.add(new_page("index", "home")).unwrap());
        let change = manager.add(new_page("news", "fullpage")).unwrap();

        assert_eq!(change.events().len(), 1);
        assert_eq!(store.home_id(), Some(index));
        assert!(!store.page(added_id(&change)).is_home());
    }

    #[test]
    fn test_add_as_home_demotes_current_home() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);

        let index = added_id(&manager.add(new_page("index", "home")).unwrap());
        let change = manager
            .add(PageChanges {
                is_home: Some(true),
                ..new_page("landing", "home")
            })
            .unwrap();
        let landing = added_id(&change);

        assert_eq!(store.home_id(), Some(landing));
        assert!(!store.page(index).is_home());
        match &change.events()[1] {
            PageEvent::HomeChanged(home) => {
                assert_eq!(home.page_id, landing);
                assert_eq!(home.previous_home, Some(index));
            }
            other => panic!("expected a HomePageChanged event, got {:?}", other),
        }
    }

    #[test]
    fn test_add_validations() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);
        manager.add(new_page("index", "home")).unwrap();

        assert!(matches!(
            manager.add(PageChanges::default()),
            Err(PageError::EmptyParameters)
        ));
        assert!(matches!(
            manager.add(new_page("index", "fullpage")),
            Err(PageError::PageExists(name)) if name == "index"
        ));
        assert!(matches!(
            manager.add(PageChanges {
                template_name: None,
                ..new_page("news", "")
            }),
            Err(PageError::Domain(DomainError::MissingParameter(_)))
        ));
    }

    #[test]
    fn test_add_requires_a_language() {
        let store = InMemoryPageStore::default();
        let manager = PageManager::new(&store, &store);

        assert!(matches!(
            manager.add(new_page("index", "home")),
            Err(PageError::NoLanguages)
        ));
        assert!(store.pages.borrow().is_empty());
    }

    #[test]
    fn test_refused_save_rolls_back() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);
        let index = added_id(&manager.add(new_page("index", "home")).unwrap());

        store.refuse_saves.set(true);
        let change = manager
            .add(PageChanges {
                is_home: Some(true),
                ..new_page("landing", "home")
            })
            .unwrap();

        assert!(!change.is_committed());
        assert!(change.events().is_empty());
        assert_eq!(store.pages.borrow().len(), 1);
        assert_eq!(store.home_id(), Some(index));
    }

    #[test]
    fn test_edit_name_and_template() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);
        let index = added_id(&manager.add(new_page("index", "home")).unwrap());

        let change = manager
            .edit(
                index,
                PageChanges {
                    page_name: Some("welcome".to_string()),
                    template_name: Some("fullpage".to_string()),
                    is_home: None,
                },
            )
            .unwrap();

        let types: Vec<_> = change.events().iter().map(|e| e.event_type()).collect();
        assert_eq!(types, vec!["PageEdited", "PageTemplateChanged"]);
        match &change.events()[1] {
            PageEvent::TemplateChanged(changed) => {
                assert_eq!(changed.previous_template, "home");
                assert_eq!(changed.template_name, "fullpage");
            }
            other => panic!("expected a PageTemplateChanged event, got {:?}", other),
        }

        let page = store.page(index);
        assert_eq!(page.page_name(), "welcome");
        assert_eq!(page.template_name(), "fullpage");
    }

    #[test]
    fn test_edit_to_existing_name_fails() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);
        manager.add(new_page("index", "home")).unwrap();
        let news = added_id(&manager.add(new_page("news", "home")).unwrap());

        let result = manager.edit(
            news,
            PageChanges {
                page_name: Some("index".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(PageError::PageExists(_))));
        assert_eq!(store.page(news).page_name(), "news");
    }

    #[test]
    fn test_edit_unknown_page() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);

        let result = manager.edit(
            PageId::new(42),
            PageChanges {
                template_name: Some("home".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(
            result,
            Err(PageError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[test]
    fn test_edit_promotes_to_home() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);
        let index = added_id(&manager.add(new_page("index", "home")).unwrap());
        let news = added_id(&manager.add(new_page("news", "home")).unwrap());

        let change = manager
            .edit(
                news,
                PageChanges {
                    is_home: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(store.home_id(), Some(news));
        assert!(!store.page(index).is_home());
        assert!(change
            .events()
            .iter()
            .any(|e| matches!(e, PageEvent::HomeChanged(h) if h.previous_home == Some(index))));
    }

    #[test]
    fn test_edit_cannot_unset_home() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);
        let index = added_id(&manager.add(new_page("index", "home")).unwrap());

        let change = manager
            .edit(
                index,
                PageChanges {
                    is_home: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(change.is_committed());
        assert_eq!(change.events().len(), 1);
        assert_eq!(store.home_id(), Some(index));
    }

    #[test]
    fn test_delete_page() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);
        manager.add(new_page("index", "home")).unwrap();
        let news = added_id(&manager.add(new_page("news", "home")).unwrap());

        let change = manager.delete(news).unwrap();

        assert_eq!(change.events().len(), 1);
        assert_eq!(change.events()[0].aggregate_id(), news.to_string());
        assert!(store.find_by_id(news).unwrap().is_none());
    }

    #[test]
    fn test_home_page_cannot_be_deleted() {
        let store = InMemoryPageStore::with_languages();
        let manager = PageManager::new(&store, &store);
        let index = added_id(&manager.add(new_page("index", "home")).unwrap());

        assert!(matches!(
            manager.delete(index),
            Err(PageError::RemoveHomePage(name)) if name == "index"
        ));
        assert_eq!(store.pages.borrow().len(), 1);
    }
}
