//! Unified application error type.
//! All modules (db, core, widget, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0} (expected YYYY-MM-DD or 'YYYY-MM-DD HH:MM')")]
    InvalidInstant(String),

    #[error("Invalid color: {0} (expected #RRGGBB or #AARRGGBB)")]
    InvalidColor(String),

    #[error("Invalid id list: {0}")]
    InvalidIdList(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Title must not be blank")]
    EmptyTitle,

    #[error("Window end must be after its start")]
    InvalidWindow,

    #[error("No TimeFlow found with id {0}")]
    ItemNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Widget rendering
    // ---------------------------
    #[error("Widget render error: {0}")]
    Render(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
