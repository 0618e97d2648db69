//! Error types.
//!
//! Cells and history navigation never fail. Errors only come from turning
//! external input (text, JSON, environment variables) into settings.

use thiserror::Error;

/// Errors produced while reading settings.
#[derive(Debug, Error)]
pub enum Error {
    /// The text is neither a keyword for "unbounded" nor an integer.
    #[error("invalid history limit {input:?}: expected \"none\" or an integer")]
    InvalidLimit { input: String },

    /// The configuration document could not be parsed.
    #[error("invalid history configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
