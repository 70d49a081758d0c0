/// Domain entities
use super::base::Entity;
use super::value_objects::{BlockId, Cell, LanguageId, PageId, SlotName};
use serde::{Deserialize, Serialize};

/// A Block is a single content unit (text, menu, image...) placed on a slot
/// of one page in one language.
///
/// Serializes to the flat field mapping the store exposes (`Id`, `SlotName`,
/// `PageId`, `LanguageId`, `ClassName`, `Content`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    id: Option<BlockId>,
    slot_name: SlotName,
    page_id: PageId,
    language_id: LanguageId,
    class_name: String,
    content: String,
    content_position: i64,
    is_active: bool,
}

impl Block {
    /// Create a new, not yet persisted, block
    pub fn new(
        slot_name: SlotName,
        cell: Cell,
        class_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Block {
            id: None,
            slot_name,
            page_id: cell.page_id,
            language_id: cell.language_id,
            class_name: class_name.into(),
            content: content.into(),
            content_position: 1,
            is_active: true,
        }
    }

    /// Attach the identity assigned by the store
    pub fn with_id(mut self, id: BlockId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.content_position = position;
        self
    }

    pub fn slot_name(&self) -> &SlotName {
        &self.slot_name
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn language_id(&self) -> LanguageId {
        self.language_id
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.page_id, self.language_id)
    }

    /// The block type, used to pick the block renderer
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The serialized content payload
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_position(&self) -> i64 {
        self.content_position
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Store-side identity assignment, called once the row is inserted
    pub fn assign_id(&mut self, id: BlockId) {
        self.id = Some(id);
    }

    /// Copy of this block bound to another cell.
    ///
    /// Every field is kept except the identity and the page/language binding.
    pub fn copy_to(&self, cell: Cell) -> Block {
        Block {
            id: None,
            page_id: cell.page_id,
            language_id: cell.language_id,
            ..self.clone()
        }
    }
}

impl Entity for Block {
    type Id = BlockId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

/// A Page of the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    id: Option<PageId>,
    page_name: String,
    template_name: String,
    is_home: bool,
    is_active: bool,
}

impl Page {
    pub fn new(page_name: impl Into<String>, template_name: impl Into<String>) -> Self {
        Page {
            id: None,
            page_name: page_name.into(),
            template_name: template_name.into(),
            is_home: false,
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: PageId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn page_name(&self) -> &str {
        &self.page_name
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn is_home(&self) -> bool {
        self.is_home
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_page_name(&mut self, page_name: impl Into<String>) {
        self.page_name = page_name.into();
    }

    pub fn set_template_name(&mut self, template_name: impl Into<String>) {
        self.template_name = template_name.into();
    }

    pub fn set_home(&mut self, is_home: bool) {
        self.is_home = is_home;
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn assign_id(&mut self, id: PageId) {
        self.id = Some(id);
    }
}

impl Entity for Page {
    type Id = PageId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

/// A Language the site is published in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    id: Option<LanguageId>,
    language_name: String,
    is_main: bool,
    is_active: bool,
}

impl Language {
    pub fn new(language_name: impl Into<String>) -> Self {
        Language {
            id: None,
            language_name: language_name.into(),
            is_main: false,
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: LanguageId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_main(&mut self, is_main: bool) {
        self.is_main = is_main;
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn assign_id(&mut self, id: LanguageId) {
        self.id = Some(id);
    }
}

impl Entity for Language {
    type Id = LanguageId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_block() -> Block {
        Block::new(
            SlotName::new("nav_menu").unwrap(),
            Cell::new(PageId::new(2), LanguageId::new(2)),
            "Menu",
            "<ul><li>Home</li></ul>",
        )
        .with_id(BlockId::new(10))
        .with_position(3)
    }

    #[test]
    fn test_copy_to_drops_identity_and_rebinds_cell() {
        let block = nav_block();
        let target = Cell::new(PageId::new(5), LanguageId::new(1));

        let copy = block.copy_to(target);

        assert!(copy.is_new());
        assert_eq!(copy.cell(), target);
        assert_eq!(copy.slot_name(), block.slot_name());
        assert_eq!(copy.class_name(), "Menu");
        assert_eq!(copy.content(), block.content());
        assert_eq!(copy.content_position(), 3);
        assert!(copy.is_active());
    }

    #[test]
    fn test_block_serializes_to_flat_field_mapping() {
        let value = serde_json::to_value(nav_block()).unwrap();
        let fields = value.as_object().unwrap();

        assert_eq!(fields["Id"], 10);
        assert_eq!(fields["SlotName"], "nav_menu");
        assert_eq!(fields["PageId"], 2);
        assert_eq!(fields["LanguageId"], 2);
        assert_eq!(fields["ClassName"], "Menu");
        assert_eq!(fields["ContentPosition"], 3);
        assert_eq!(fields["IsActive"], true);
    }

    #[test]
    fn test_block_from_flat_field_mapping() {
        let json = r#"{
            "Id": null,
            "SlotName": "footer",
            "PageId": 1,
            "LanguageId": 1,
            "ClassName": "Text",
            "Content": "Copyright",
            "ContentPosition": 1,
            "IsActive": true
        }"#;

        let block: Block = serde_json::from_str(json).unwrap();
        assert!(block.is_new());
        assert_eq!(block.slot_name().as_str(), "footer");
        assert_eq!(block.cell(), Cell::new(PageId::new(1), LanguageId::new(1)));
    }

    #[test]
    fn test_page_home_flag() {
        let mut page = Page::new("index", "home");
        assert!(!page.is_home());
        assert!(page.is_new());

        page.set_home(true);
        page.assign_id(PageId::new(2));
        assert!(page.is_home());
        assert_eq!(page.id(), Some(&PageId::new(2)));
    }
}
