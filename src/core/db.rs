use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::core::error::NirmanakayaError;
use crate::core::schemas;
use crate::core::store::Store;

pub fn db_connect(db_path: &Path) -> Result<Connection, NirmanakayaError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(NirmanakayaError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(NirmanakayaError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(NirmanakayaError::RusqliteError)?;
    Ok(conn)
}

pub fn ensure_schema(conn: &Connection) -> Result<(), NirmanakayaError> {
    for ddl in schemas::JOURNAL_SCHEMAS {
        conn.execute(ddl, [])
            .map_err(NirmanakayaError::RusqliteError)?;
    }
    Ok(())
}

/// Open the journal database, creating the store directory and schema on
/// first use.
pub fn open_journal(store: &Store) -> Result<Connection, NirmanakayaError> {
    let db_path = store.journal_db_path();
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(NirmanakayaError::IoError)?;
    }
    let conn = db_connect(&db_path)?;
    ensure_schema(&conn)?;
    Ok(conn)
}
