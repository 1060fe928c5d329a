//! Unified application error type.
//! All modules (db, store, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::store::RemoteFailure;
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

    #[error("Local cache is corrupt: {0}")]
    CorruptCache(#[from] serde_json::Error),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown unit: {0}")]
    InvalidUnit(String),

    #[error("Invalid gender: {0} (expected Male or Female)")]
    InvalidGender(String),

    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No officer found with id {0}")]
    OfficerNotFound(String),

    #[error("No {kind} date set for {name}")]
    NoDateSet { name: String, kind: &'static str },

    // ---------------------------
    // Remote store (explicit sync only)
    // ---------------------------
    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteFailure),

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
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
