use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if a migration version was already recorded in the log.
fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// The local cache: a single key → blob table.
fn migrate_create_kv_store(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_create_kv_store";

    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    mark_applied(conn, version, "Created kv_store table for the local cache")?;
    success(format!("Migration applied: {version}"));
    Ok(())
}

/// Create the `house_officers` table used by the SQLite remote backend.
///
/// `id` and `createdAt` get server-side defaults so rows inserted without
/// them are still valid.
pub fn ensure_officers_table(conn: &Connection) -> Result<()> {
    if table_exists(conn, "house_officers")? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS house_officers (
            id                        TEXT PRIMARY KEY DEFAULT (lower(hex(randomblob(16)))),
            fullName                  TEXT NOT NULL,
            gender                    TEXT NOT NULL CHECK(gender IN ('Male','Female')),
            dateSignedIn              TEXT NOT NULL,
            unitAssigned              TEXT NOT NULL,
            clinicalPresentationTopic TEXT,
            clinicalPresentationDate  TEXT,
            expectedSignOutDate       TEXT NOT NULL,
            createdAt                 TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_house_officers_created ON house_officers(createdAt);
        "#,
    )?;

    success("Created house_officers table.");
    Ok(())
}

/// Public entry point: run all pending migrations on the local database.
///
/// Invocata da db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Versioned migrations, in order
    migrate_create_kv_store(conn)?;

    Ok(())
}
