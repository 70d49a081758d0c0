use crate::domain::value_objects::Cell;
use rusqlite::{params, Connection, Result};

/// Initialize the SQLite database with the required schema.
/// This function is idempotent and can be safely called multiple times.
///
/// The root page and language rows are the placeholders non-scoped blocks
/// are bound to; they are inactive so they never show up as targets.
pub fn initialize_database(conn: &Connection, root: Cell) -> Result<()> {
    // Enable foreign key constraints
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS languages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            language_name TEXT NOT NULL UNIQUE,
            is_main INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_name TEXT NOT NULL UNIQUE,
            template_name TEXT NOT NULL,
            is_home INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS blocks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slot_name TEXT NOT NULL,
            page_id INTEGER NOT NULL,
            language_id INTEGER NOT NULL,
            class_name TEXT NOT NULL,
            content TEXT NOT NULL,
            content_position INTEGER NOT NULL DEFAULT 1,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (page_id) REFERENCES pages(id) ON DELETE CASCADE,
            FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_blocks_slot ON blocks(slot_name)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_blocks_page_language ON blocks(page_id, language_id)",
        [],
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO languages (id, language_name, is_main, is_active)
         VALUES (?1, '-', 0, 0)",
        params![root.language_id.value()],
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO pages (id, page_name, template_name, is_home, is_active)
         VALUES (?1, '-', '', 0, 0)",
        params![root.page_id.value()],
    )?;

    Ok(())
}
