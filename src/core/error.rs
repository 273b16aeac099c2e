use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NirmanakayaError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to initialize database: {0}")]
    DatabaseInitializationError(String),
    #[error("Path error: {0}")]
    PathError(String),
    #[error("Signature or status out of range: {0}")]
    OutOfRange(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Generation collaborator failure: {0}")]
    GenerationFailure(String),
}
