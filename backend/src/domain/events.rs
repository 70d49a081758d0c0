/// Domain events
///
/// Events are handed back to the caller of the operation that produced them;
/// publishing them is up to the caller.
use super::base::DomainEvent;
use super::value_objects::PageId;
use chrono::{DateTime, Utc};

/// Event emitted when a new page is added
#[derive(Debug, Clone)]
pub struct PageAdded {
    pub page_id: PageId,
    pub page_name: String,
    pub template_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for PageAdded {
    fn event_type(&self) -> &'static str {
        "PageAdded"
    }

    fn aggregate_id(&self) -> String {
        self.page_id.to_string()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Event emitted when a page is edited
#[derive(Debug, Clone)]
pub struct PageEdited {
    pub page_id: PageId,
    pub page_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for PageEdited {
    fn event_type(&self) -> &'static str {
        "PageEdited"
    }

    fn aggregate_id(&self) -> String {
        self.page_id.to_string()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Event emitted when a page switches template.
///
/// The slots of the new template may need their repeated contents converted.
#[derive(Debug, Clone)]
pub struct PageTemplateChanged {
    pub page_id: PageId,
    pub previous_template: String,
    pub template_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for PageTemplateChanged {
    fn event_type(&self) -> &'static str {
        "PageTemplateChanged"
    }

    fn aggregate_id(&self) -> String {
        self.page_id.to_string()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Event emitted when the home page moves to another page
#[derive(Debug, Clone)]
pub struct HomePageChanged {
    pub page_id: PageId,
    pub previous_home: Option<PageId>,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for HomePageChanged {
    fn event_type(&self) -> &'static str {
        "HomePageChanged"
    }

    fn aggregate_id(&self) -> String {
        self.page_id.to_string()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Event emitted when a page is deleted
#[derive(Debug, Clone)]
pub struct PageDeleted {
    pub page_id: PageId,
    pub page_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for PageDeleted {
    fn event_type(&self) -> &'static str {
        "PageDeleted"
    }

    fn aggregate_id(&self) -> String {
        self.page_id.to_string()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Any event produced by the page manager
#[derive(Debug, Clone)]
pub enum PageEvent {
    Added(PageAdded),
    Edited(PageEdited),
    TemplateChanged(PageTemplateChanged),
    HomeChanged(HomePageChanged),
    Deleted(PageDeleted),
}

impl DomainEvent for PageEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PageEvent::Added(e) => e.event_type(),
            PageEvent::Edited(e) => e.event_type(),
            PageEvent::TemplateChanged(e) => e.event_type(),
            PageEvent::HomeChanged(e) => e.event_type(),
            PageEvent::Deleted(e) => e.event_type(),
        }
    }

    fn aggregate_id(&self) -> String {
        match self {
            PageEvent::Added(e) => e.aggregate_id(),
            PageEvent::Edited(e) => e.aggregate_id(),
            PageEvent::TemplateChanged(e) => e.aggregate_id(),
            PageEvent::HomeChanged(e) => e.aggregate_id(),
            PageEvent::Deleted(e) => e.aggregate_id(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PageEvent::Added(e) => e.occurred_at(),
            PageEvent::Edited(e) => e.occurred_at(),
            PageEvent::TemplateChanged(e) => e.occurred_at(),
            PageEvent::HomeChanged(e) => e.occurred_at(),
            PageEvent::Deleted(e) => e.occurred_at(),
        }
    }
}
