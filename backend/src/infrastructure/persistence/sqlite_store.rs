use crate::application::repositories::{
    BlockRepository, LanguageRepository, PageRepository, StoreError, StoreResult, Transactional,
};
use crate::domain::base::Entity;
use crate::domain::entities::{Block, Language, Page};
use crate::domain::value_objects::{BlockId, Cell, LanguageId, PageId, SlotName};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Result as SqliteResult, Row};
use std::path::Path;

const BLOCK_COLUMNS: &str =
    "id, slot_name, page_id, language_id, class_name, content, content_position, is_active";
const PAGE_COLUMNS: &str = "id, page_name, template_name, is_home, is_active";

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// SQLite-based implementation of the block, page and language repositories.
///
/// The three repositories share one connection, so a transaction opened
/// through any of them covers all of them.
pub struct SqliteStore {
    conn: Connection,
    root: Cell,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection
    pub fn new(conn: Connection, root: Cell) -> StoreResult<Self> {
        super::schema::initialize_database(&conn, root)?;
        Ok(SqliteStore { conn, root })
    }

    /// Create a new in-memory SQLite store (useful for testing)
    pub fn new_in_memory(root: Cell) -> StoreResult<Self> {
        Self::new(Connection::open_in_memory()?, root)
    }

    /// Create a new file-based SQLite store
    pub fn new_with_path(path: impl AsRef<Path>, root: Cell) -> StoreResult<Self> {
        Self::new(Connection::open(path)?, root)
    }

    /// The cell blocks shared by every page or every language are bound to
    pub fn root(&self) -> Cell {
        self.root
    }

    /// Inserts or updates a language.
    ///
    /// Language management lives outside the content core; this is what
    /// provisioning and tests use to seed the store.
    pub fn save_language(&self, language: &mut Language) -> StoreResult<bool> {
        let result = match language.id().copied() {
            None => {
                let result = self.conn.execute(
                    "INSERT INTO languages (language_name, is_main, is_active) VALUES (?1, ?2, ?3)",
                    params![
                        language.language_name(),
                        language.is_main(),
                        language.is_active()
                    ],
                );
                if result.is_ok() {
                    language.assign_id(LanguageId::new(self.conn.last_insert_rowid()));
                }
                result
            }
            Some(id) => self.conn.execute(
                "UPDATE languages SET language_name = ?1, is_main = ?2, is_active = ?3
                 WHERE id = ?4",
                params![
                    language.language_name(),
                    language.is_main(),
                    language.is_active(),
                    id.value()
                ],
            ),
        };

        written(result)
    }

    fn query_blocks<P: rusqlite::Params>(&self, filter: &str, params: P) -> StoreResult<Vec<Block>> {
        let sql = format!("SELECT {} FROM blocks WHERE {}", BLOCK_COLUMNS, filter);
        let mut stmt = self.conn.prepare(&sql)?;
        let blocks = stmt
            .query_map(params, block_from_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(blocks)
    }

    fn query_pages<P: rusqlite::Params>(&self, filter: &str, params: P) -> StoreResult<Vec<Page>> {
        let sql = format!("SELECT {} FROM pages WHERE {}", PAGE_COLUMNS, filter);
        let mut stmt = self.conn.prepare(&sql)?;
        let pages = stmt
            .query_map(params, page_from_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(pages)
    }

    fn query_page<P: rusqlite::Params>(&self, filter: &str, params: P) -> StoreResult<Option<Page>> {
        let sql = format!("SELECT {} FROM pages WHERE {} LIMIT 1", PAGE_COLUMNS, filter);
        let page = self.conn.query_row(&sql, params, page_from_row).optional()?;
        Ok(page)
    }
}

/// Maps the outcome of a write: constraint violations are logical failures,
/// any other error is unexpected.
fn written(result: SqliteResult<usize>) -> StoreResult<bool> {
    match result {
        Ok(rows) => Ok(rows > 0),
        Err(rusqlite::Error::SqliteFailure(e, msg)) if e.code == ErrorCode::ConstraintViolation => {
            tracing::warn!("write refused by a constraint: {}", msg.unwrap_or_default());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn block_from_row(row: &Row<'_>) -> SqliteResult<Block> {
    let slot_name: String = row.get(1)?;
    let slot_name = SlotName::new(slot_name)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    let cell = Cell::new(PageId::new(row.get(2)?), LanguageId::new(row.get(3)?));
    let class_name: String = row.get(4)?;
    let content: String = row.get(5)?;

    let mut block = Block::new(slot_name, cell, class_name, content)
        .with_id(BlockId::new(row.get(0)?))
        .with_position(row.get(6)?);
    block.set_active(row.get(7)?);
    Ok(block)
}

fn page_from_row(row: &Row<'_>) -> SqliteResult<Page> {
    let page_name: String = row.get(1)?;
    let template_name: String = row.get(2)?;
    let mut page = Page::new(page_name, template_name).with_id(PageId::new(row.get(0)?));
    page.set_home(row.get(3)?);
    page.set_active(row.get(4)?);
    Ok(page)
}

impl Transactional for SqliteStore {
    fn start_transaction(&self) -> StoreResult<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&self) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn roll_back(&self) -> StoreResult<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}

impl BlockRepository for SqliteStore {
    fn retrieve_contents(
        &self,
        language_id: LanguageId,
        page_id: PageId,
    ) -> StoreResult<Vec<Block>> {
        self.query_blocks(
            "language_id IN (?1, ?2) AND page_id IN (?3, ?4)
             ORDER BY slot_name, content_position, id",
            params![
                self.root.language_id.value(),
                language_id.value(),
                self.root.page_id.value(),
                page_id.value()
            ],
        )
    }

    fn retrieve_contents_by_slot_name(&self, slot_name: &SlotName) -> StoreResult<Vec<Block>> {
        self.query_blocks("slot_name = ?1 ORDER BY id", params![slot_name.as_str()])
    }

    fn delete(&self, block: &Block) -> StoreResult<bool> {
        let Some(id) = block.id() else {
            return Ok(false);
        };
        written(
            self.conn
                .execute("DELETE FROM blocks WHERE id = ?1", params![id.value()]),
        )
    }

    fn save(&self, block: &mut Block) -> StoreResult<bool> {
        let result = match block.id().copied() {
            None => {
                let result = self.conn.execute(
                    "INSERT INTO blocks (slot_name, page_id, language_id, class_name, content,
                        content_position, is_active, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'), datetime('now'))",
                    params![
                        block.slot_name().as_str(),
                        block.page_id().value(),
                        block.language_id().value(),
                        block.class_name(),
                        block.content(),
                        block.content_position(),
                        block.is_active(),
                    ],
                );
                if result.is_ok() {
                    block.assign_id(BlockId::new(self.conn.last_insert_rowid()));
                }
                result
            }
            Some(id) => self.conn.execute(
                "UPDATE blocks SET slot_name = ?1, page_id = ?2, language_id = ?3,
                    class_name = ?4, content = ?5, content_position = ?6, is_active = ?7,
                    updated_at = datetime('now')
                 WHERE id = ?8",
                params![
                    block.slot_name().as_str(),
                    block.page_id().value(),
                    block.language_id().value(),
                    block.class_name(),
                    block.content(),
                    block.content_position(),
                    block.is_active(),
                    id.value(),
                ],
            ),
        };

        written(result)
    }
}

impl LanguageRepository for SqliteStore {
    fn active_languages(&self) -> StoreResult<Vec<Language>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, language_name, is_main FROM languages WHERE is_active = 1 ORDER BY id",
        )?;
        let languages = stmt
            .query_map([], |row| {
                let name: String = row.get(1)?;
                let mut language = Language::new(name).with_id(LanguageId::new(row.get(0)?));
                language.set_main(row.get(2)?);
                Ok(language)
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(languages)
    }
}

impl PageRepository for SqliteStore {
    fn active_pages(&self) -> StoreResult<Vec<Page>> {
        self.query_pages("is_active = 1 ORDER BY id", [])
    }

    fn find_by_id(&self, id: PageId) -> StoreResult<Option<Page>> {
        self.query_page("id = ?1 AND id <> ?2", params![id.value(), self.root.page_id.value()])
    }

    fn find_by_name(&self, page_name: &str) -> StoreResult<Option<Page>> {
        self.query_page(
            "page_name = ?1 AND id <> ?2",
            params![page_name, self.root.page_id.value()],
        )
    }

    fn home_page(&self) -> StoreResult<Option<Page>> {
        self.query_page("is_home = 1 ORDER BY id", [])
    }

    fn save(&self, page: &mut Page) -> StoreResult<bool> {
        let result = match page.id().copied() {
            None => {
                let result = self.conn.execute(
                    "INSERT INTO pages (page_name, template_name, is_home, is_active)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        page.page_name(),
                        page.template_name(),
                        page.is_home(),
                        page.is_active()
                    ],
                );
                if result.is_ok() {
                    page.assign_id(PageId::new(self.conn.last_insert_rowid()));
                }
                result
            }
            Some(id) => self.conn.execute(
                "UPDATE pages SET page_name = ?1, template_name = ?2, is_home = ?3, is_active = ?4
                 WHERE id = ?5",
                params![
                    page.page_name(),
                    page.template_name(),
                    page.is_home(),
                    page.is_active(),
                    id.value()
                ],
            ),
        };

        written(result)
    }

    fn delete(&self, page: &Page) -> StoreResult<bool> {
        let Some(id) = page.id() else {
            return Ok(false);
        };
        if *id == self.root.page_id {
            return Ok(false);
        }
        written(
            self.conn
                .execute("DELETE FROM pages WHERE id = ?1", params![id.value()]),
        )
    }
}
