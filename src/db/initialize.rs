use crate::db::migrate::{ensure_officers_table, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the local database (cache slot + audit log).
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    // NO direct CREATE TABLE here.
    // All schema is guaranteed by migrations.
    run_pending_migrations(conn)?;
    Ok(())
}

/// Initialize a SQLite file used as the shared remote store.
pub fn init_remote_db(conn: &Connection) -> AppResult<()> {
    ensure_officers_table(conn)?;
    Ok(())
}
