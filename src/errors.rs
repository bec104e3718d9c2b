//! Unified application error type.
//! All modules (store, core, session, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ---------------------------
    // Internal log database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid card identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Malformed log line {file}:{line}: {reason}")]
    MalformedLogLine {
        file: PathBuf,
        line: u64,
        reason: String,
    },

    // ---------------------------
    // Store errors
    // ---------------------------
    #[error("Attendance table {path} is unreadable: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    #[error("User directory {path} is unreadable: {reason}")]
    CorruptDirectory { path: PathBuf, reason: String },

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Tap on {tap} is older than the last recorded day {last}")]
    OutOfOrderTap { tap: String, last: String },

    #[error("No attendance recorded for {0}")]
    NoData(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
