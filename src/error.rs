//! Crate error type.
//!
//! Only the input-facing layers (loader, rule file, validation) produce
//! errors. The scheduling core always completes and reports trouble through
//! [`Warning`](crate::models::Warning)s and the unplaced list instead.

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("rule file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An interval label outside the recognised cadence set.
    #[error("unknown interval '{label}' for chore '{chore}'")]
    UnknownCadence { chore: String, label: String },

    #[error("input is missing required column '{0}'")]
    MissingColumn(String),

    #[error("input failed validation with {} error(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
