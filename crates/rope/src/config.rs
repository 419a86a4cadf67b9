//! Rope configuration

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default target leaf size, in chars
pub const SPLIT_LENGTH: usize = 200;

/// Tuning knobs carried by every rope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RopeConfig {
    /// Target maximum leaf size. Initial content is chunked to this size and
    /// adjacent leaves are coalesced while their combined length stays below it.
    split_length: usize,
}

impl RopeConfig {
    pub fn new(split_length: usize) -> Result<Self, ConfigError> {
        Self { split_length }.validated()
    }

    /// Parse a config from TOML, e.g. `split_length = 512`
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RopeConfig = toml::from_str(content)?;
        config.validated()
    }

    /// Target maximum leaf size, in chars; never 0
    pub fn split_length(&self) -> usize {
        self.split_length
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.split_length == 0 {
            return Err(ConfigError::InvalidSplitLength(self.split_length));
        }
        Ok(self)
    }
}

impl Default for RopeConfig {
    fn default() -> Self {
        Self {
            split_length: SPLIT_LENGTH,
        }
    }
}
