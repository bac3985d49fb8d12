//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Exceeding an HOS limit is NOT an error: limits are reported inside
//! `ComplianceSnapshot`. Only structural input problems end up here.

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
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid duty status code: {0}")]
    InvalidStatus(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid cycle rule: {0}")]
    InvalidCycle(String),

    // ---------------------------
    // Tracker rejections (no state change, caller must correct and retry)
    // ---------------------------
    #[error("Invalid transition for driver {driver}: already in status {status}")]
    InvalidTransition { driver: String, status: String },

    #[error(
        "Out-of-order timestamp for driver {driver}: {timestamp} precedes open record start {open_start}"
    )]
    OutOfOrderTimestamp {
        driver: String,
        timestamp: String,
        open_start: String,
    },

    // ---------------------------
    // Correction workflow
    // ---------------------------
    #[error("Invalid correction: {0}")]
    InvalidCorrection(String),

    #[error("No record found with id {0}")]
    RecordNotFound(i64),

    #[error("No records found for driver {0}")]
    NoRecordsForDriver(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
