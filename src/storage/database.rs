use rusqlite::{Connection, Result as SqlResult};
use std::path::Path;
use std::time::Duration;

/// Base SQLite connection wrapper shared by the auction tables
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an on-disk database in WAL mode.
    pub fn open<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        // Writers queue behind an IMMEDIATE transaction instead of failing with SQLITE_BUSY
        conn.busy_timeout(Duration::from_secs(5))?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        log::debug!("Opened {} (journal_mode={mode})", path.display());
        Ok(Self { conn })
    }

    pub fn in_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
