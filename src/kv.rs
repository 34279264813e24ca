use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// The one well-known key the roster blob lives under.
pub const STUDENTS_KEY: &str = "students";

pub const STORE_FILENAME: &str = "roster.sqlite3";

/// Opaque string key/value store backing the roster. One table, no schema
/// beyond (key, value); callers treat values as serialized blobs.
pub struct KvStore {
    conn: Connection,
}

pub fn open_store(workspace: &Path) -> anyhow::Result<KvStore> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(STORE_FILENAME);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    Ok(KvStore { conn })
}

impl KvStore {
    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |r| {
                r.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Unconditional overwrite of whatever was stored before.
    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }
}
