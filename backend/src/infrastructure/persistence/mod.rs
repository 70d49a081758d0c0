mod schema;
mod sqlite_store;

pub use schema::initialize_database;
pub use sqlite_store::SqliteStore;
