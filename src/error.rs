//! Error types for the fantasy football draft assistant

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FflError>;

#[derive(Error, Debug)]
pub enum FflError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("Failed to parse integer: {0}")]
    InvalidInteger(#[from] std::num::ParseIntError),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseFloatError),

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid period label: {label}")]
    InvalidPeriod { label: String },

    #[error("Unknown fantasy team: {team}")]
    InvalidTeam { team: String },

    #[error("Missing column {column} in {file}")]
    MissingColumn { column: String, file: String },

    #[error("Malformed row: {message}")]
    MalformedRow { message: String },

    #[error("ESPN page contained no data")]
    NoData,

    #[error("Chart rendering failed: {message}")]
    Plot { message: String },
}

impl FflError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        FflError::MalformedRow {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for FflError {
    fn from(err: anyhow::Error) -> Self {
        FflError::Plot {
            message: format!("{:#}", err),
        }
    }
}
