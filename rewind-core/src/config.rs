//! Configuration for histories.
//!
//! Settings can come from code, from a JSON document, or from the
//! `REWIND_HISTORY_LIMIT` environment variable.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::history::HistoryLimit;

/// Environment variable read by [`HistoryConfig::from_env`].
pub const HISTORY_LIMIT_ENV: &str = "REWIND_HISTORY_LIMIT";

/// Settings applied when a history is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of snapshots retained; `"none"` or a count below 1
    /// keeps everything.
    pub history_limit: HistoryLimit,
}

impl HistoryConfig {
    /// Parse a configuration document such as `{"history_limit": 50}`.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from the environment.
    ///
    /// An unset variable yields the default configuration.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(HISTORY_LIMIT_ENV)
    }

    fn from_env_var(name: &str) -> Result<Self> {
        match std::env::var(name) {
            Ok(raw) => Ok(Self {
                history_limit: raw.parse()?,
            }),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(std::env::VarError::NotUnicode(raw)) => Err(Error::InvalidLimit {
                input: raw.to_string_lossy().into_owned(),
            }),
        }
    }
}
