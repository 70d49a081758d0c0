/// Page lifecycle: add, edit, delete and home page promotion
use crate::application::repositories::{
    run_in_transaction, LanguageRepository, PageRepository, StoreError, TransactionOutcome,
};
use crate::domain::{
    base::Entity,
    entities::Page,
    events::{HomePageChanged, PageAdded, PageDeleted, PageEdited, PageEvent, PageTemplateChanged},
    value_objects::PageId,
    DomainError,
};
use chrono::Utc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Store(#[from] StoreError),

    #[error("No parameters have been given")]
    EmptyParameters,

    #[error("A page named {0} already exists")]
    PageExists(String),

    #[error("A page cannot be added until a language exists")]
    NoLanguages,

    #[error("The home page {0} cannot be removed")]
    RemoveHomePage(String),
}

pub type PageResult<T> = Result<T, PageError>;

/// Attributes to set on a page; `None` leaves the attribute untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageChanges {
    pub page_name: Option<String>,
    pub template_name: Option<String>,
    pub is_home: Option<bool>,
}

impl PageChanges {
    pub fn is_empty(&self) -> bool {
        self.page_name.is_none() && self.template_name.is_none() && self.is_home.is_none()
    }
}

/// Result of a page operation that reached the store
#[derive(Debug, Clone)]
pub enum PageChange {
    /// The transaction committed; the events are for the caller to publish
    Committed(Vec<PageEvent>),
    /// The store refused a write and the transaction was rolled back
    RolledBack,
}

impl PageChange {
    pub fn is_committed(&self) -> bool {
        matches!(self, PageChange::Committed(_))
    }

    pub fn events(&self) -> &[PageEvent] {
        match self {
            PageChange::Committed(events) => events,
            PageChange::RolledBack => &[],
        }
    }
}

enum HomeReset {
    Unchanged,
    Demoted(PageId),
    Refused,
}

/// Manages the pages of the site
pub struct PageManager<'a, P, L>
where
    P: PageRepository + ?Sized,
    L: LanguageRepository + ?Sized,
{
    pages: &'a P,
    languages: &'a L,
}

impl<'a, P, L> PageManager<'a, P, L>
where
    P: PageRepository + ?Sized,
    L: LanguageRepository + ?Sized,
{
    pub fn new(pages: &'a P, languages: &'a L) -> Self {
        PageManager { pages, languages }
    }

    /// Adds a page.
    ///
    /// The first page of the site always becomes the home page; a page
    /// added as home takes the flag from the current home page.
    pub fn add(&self, changes: PageChanges) -> PageResult<PageChange> {
        if changes.is_empty() {
            return Err(PageError::EmptyParameters);
        }
        let page_name = required(changes.page_name, "page name")?;
        let template_name = required(changes.template_name, "template name")?;

        if !self.languages.has_languages()? {
            return Err(PageError::NoLanguages);
        }
        if self.pages.find_by_name(&page_name)?.is_some() {
            return Err(PageError::PageExists(page_name));
        }

        let make_home = changes.is_home.unwrap_or(false) || !self.pages.has_pages()?;
        let mut page = Page::new(page_name, template_name);
        page.set_home(make_home);

        let mut previous_home = None;
        let outcome = run_in_transaction(self.pages, "add page", || {
            if make_home {
                match self.reset_home(None)? {
                    HomeReset::Refused => return Ok(false),
                    HomeReset::Demoted(id) => previous_home = Some(id),
                    HomeReset::Unchanged => {}
                }
            }
            self.pages.save(&mut page)
        })?;

        if outcome == TransactionOutcome::RolledBack {
            return Ok(PageChange::RolledBack);
        }

        let page_id = saved_id(&page)?;
        tracing::info!(page = %page_id, name = page.page_name(), home = make_home, "page added");

        let occurred_at = Utc::now();
        let mut events = vec![PageEvent::Added(PageAdded {
            page_id,
            page_name: page.page_name().to_string(),
            template_name: page.template_name().to_string(),
            occurred_at,
        })];
        if make_home {
            events.push(PageEvent::HomeChanged(HomePageChanged {
                page_id,
                previous_home,
                occurred_at,
            }));
        }

        Ok(PageChange::Committed(events))
    }

    /// Edits a page: name, template and home promotion.
    ///
    /// The home flag can only be moved by promoting another page, so
    /// `is_home: Some(false)` is ignored.
    pub fn edit(&self, page_id: PageId, changes: PageChanges) -> PageResult<PageChange> {
        if changes.is_empty() {
            return Err(PageError::EmptyParameters);
        }

        let mut page = self.find(page_id)?;
        let previous_template = page.template_name().to_string();

        if let Some(page_name) = changes.page_name {
            let page_name = required(Some(page_name), "page name")?;
            if page_name != page.page_name() && self.pages.find_by_name(&page_name)?.is_some() {
                return Err(PageError::PageExists(page_name));
            }
            page.set_page_name(page_name);
        }
        if let Some(template_name) = changes.template_name {
            page.set_template_name(required(Some(template_name), "template name")?);
        }

        let promote = changes.is_home == Some(true) && !page.is_home();
        let mut previous_home = None;
        let outcome = run_in_transaction(self.pages, "edit page", || {
            if promote {
                match self.reset_home(Some(page_id))? {
                    HomeReset::Refused => return Ok(false),
                    HomeReset::Demoted(id) => previous_home = Some(id),
                    HomeReset::Unchanged => {}
                }
                page.set_home(true);
            }
            self.pages.save(&mut page)
        })?;

        if outcome == TransactionOutcome::RolledBack {
            return Ok(PageChange::RolledBack);
        }

        tracing::info!(page = %page_id, name = page.page_name(), "page edited");

        let occurred_at = Utc::now();
        let mut events = vec![PageEvent::Edited(PageEdited {
            page_id,
            page_name: page.page_name().to_string(),
            occurred_at,
        })];
        if page.template_name() != previous_template {
            events.push(PageEvent::TemplateChanged(PageTemplateChanged {
                page_id,
                previous_template,
                template_name: page.template_name().to_string(),
                occurred_at,
            }));
        }
        if promote {
            events.push(PageEvent::HomeChanged(HomePageChanged {
                page_id,
                previous_home,
                occurred_at,
            }));
        }

        Ok(PageChange::Committed(events))
    }

    /// Deletes a page and, through the store, its blocks. The home page
    /// cannot be deleted.
    pub fn delete(&self, page_id: PageId) -> PageResult<PageChange> {
        let page = self.find(page_id)?;
        if page.is_home() {
            return Err(PageError::RemoveHomePage(page.page_name().to_string()));
        }

        let outcome = run_in_transaction(self.pages, "delete page", || self.pages.delete(&page))?;
        if outcome == TransactionOutcome::RolledBack {
            return Ok(PageChange::RolledBack);
        }

        tracing::info!(page = %page_id, name = page.page_name(), "page deleted");

        Ok(PageChange::Committed(vec![PageEvent::Deleted(PageDeleted {
            page_id,
            page_name: page.page_name().to_string(),
            occurred_at: Utc::now(),
        })]))
    }

    fn find(&self, page_id: PageId) -> PageResult<Page> {
        self.pages
            .find_by_id(page_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Page {} not found", page_id)).into())
    }

    /// Removes the home flag from the current home page, unless it is `keep`
    fn reset_home(&self, keep: Option<PageId>) -> Result<HomeReset, StoreError> {
        let Some(mut home) = self.pages.home_page()? else {
            return Ok(HomeReset::Unchanged);
        };
        let home_id = home.id().copied();
        if home_id.is_some() && home_id == keep {
            return Ok(HomeReset::Unchanged);
        }

        home.set_home(false);
        if !self.pages.save(&mut home)? {
            tracing::warn!(page = ?home_id, "current home page could not be reset");
            return Ok(HomeReset::Refused);
        }

        Ok(home_id.map_or(HomeReset::Unchanged, HomeReset::Demoted))
    }
}

fn required(value: Option<String>, label: &str) -> Result<String, DomainError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(DomainError::MissingParameter(format!(
            "The {} parameter is required",
            label
        ))),
    }
}

fn saved_id(page: &Page) -> Result<PageId, DomainError> {
    page.id().copied().ok_or_else(|| {
        DomainError::InvalidValue(format!(
            "The store did not assign an id to page {}",
            page.page_name()
        ))
    })
}
