//! Data root resolution. Everything persistent (journal database, event
//! log, preferences) lives under one directory: `$NIRMANAKAYA_HOME` when
//! set, otherwise `~/.nirmanakaya/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::NirmanakayaError;
use crate::core::schemas;

#[derive(Debug, Clone)]
pub struct Store {
    pub root: PathBuf,
}

impl Store {
    pub fn resolve() -> Result<Store, NirmanakayaError> {
        if let Ok(home) = std::env::var("NIRMANAKAYA_HOME") {
            if !home.trim().is_empty() {
                return Ok(Store { root: PathBuf::from(home) });
            }
        }
        let home = std::env::var("HOME").map_err(|_| {
            NirmanakayaError::PathError(
                "cannot locate data root: neither $NIRMANAKAYA_HOME nor $HOME is set"
                    .to_string(),
            )
        })?;
        Ok(Store { root: Path::new(&home).join(".nirmanakaya") })
    }

    /// Pin the store to an explicit directory. Tests use this with a
    /// tempdir so nothing touches the real home.
    pub fn at(root: impl Into<PathBuf>) -> Store {
        Store { root: root.into() }
    }

    pub fn ensure(&self) -> Result<(), NirmanakayaError> {
        fs::create_dir_all(&self.root).map_err(NirmanakayaError::IoError)?;
        Ok(())
    }

    pub fn journal_db_path(&self) -> PathBuf {
        self.root.join(schemas::JOURNAL_DB_NAME)
    }

    pub fn events_path(&self) -> PathBuf {
        self.root.join(schemas::JOURNAL_EVENTS_NAME)
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.root.join("prefs.toml")
    }
}
