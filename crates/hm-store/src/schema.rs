use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;
    // Checkpoint every ~400KB so the WAL stays small between full saves
    conn.pragma_update(None, "wal_autocheckpoint", 100)?;

    // In-memory and fresh databases legitimately fail this
    if conn
        .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
        .is_ok()
    {
        tracing::info!("startup WAL checkpoint complete");
    }

    // Patterns are little-endian BLOBs: f32 per frequency and amplitude,
    // one byte per phase (0 = zero, 1 = pi). `embedding` is NULL unless the
    // entry retained its source vector.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS entries (
            slot        INTEGER PRIMARY KEY,
            id          TEXT NOT NULL,
            level       INTEGER NOT NULL,
            strength    REAL NOT NULL,
            tombstoned  INTEGER NOT NULL DEFAULT 0,
            metadata    TEXT NOT NULL DEFAULT '{}',
            frequencies BLOB NOT NULL,
            amplitudes  BLOB NOT NULL,
            phases      BLOB NOT NULL,
            embedding   BLOB
        );

        CREATE TABLE IF NOT EXISTS edges (
            slot      INTEGER NOT NULL REFERENCES entries(slot),
            layer     INTEGER NOT NULL,
            position  INTEGER NOT NULL,
            neighbor  INTEGER NOT NULL,
            resonance REAL NOT NULL,
            PRIMARY KEY (slot, layer, position)
        );

        CREATE INDEX IF NOT EXISTS idx_entries_id ON entries(id);
        ",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

pub fn get_schema_version(conn: &Connection) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
    let version = stmt
        .query_row([], |row| {
            let v: String = row.get(0)?;
            Ok(v.parse::<i64>().unwrap_or(0))
        })
        .ok();
    Ok(version)
}
