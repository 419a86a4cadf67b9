//! Buffer settings
//!
//! ```toml
//! history_limit = 500
//!
//! [rope]
//! split_length = 256
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use rope::RopeConfig;
use serde::{Deserialize, Serialize};

/// Default number of undo steps kept per buffer
pub const HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferSettings {
    /// Rope tuning for buffers built with these settings
    pub rope: RopeConfig,
    /// Maximum undo snapshots kept
    pub history_limit: usize,
}

impl BufferSettings {
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: BufferSettings = toml::from_str(content).context("Invalid buffer settings")?;
        settings.rope.validated()?;
        Ok(settings)
    }

    /// Load settings from disk or return defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            rope: RopeConfig::default(),
            history_limit: HISTORY_LIMIT,
        }
    }
}
