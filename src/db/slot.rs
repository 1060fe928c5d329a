//! Named blob slots: one key holds one whole serialized value.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, params};

pub fn read_slot(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM kv_store WHERE key = ?1",
        [key],
        |row| row.get(0),
    )
    .optional()
}

/// Replace the slot content wholesale.
pub fn write_slot(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}
