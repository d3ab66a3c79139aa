//! Editor configuration.
//!
//! Every field is optional in the TOML form; missing fields fall back to the defaults below.
//!
//! ```toml
//! tab_width = 4
//! message_timeout_secs = 3
//! max_search_results = 50
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::row::DEFAULT_TAB_WIDTH;

/// Default lifetime of a status message.
pub const DEFAULT_MESSAGE_TIMEOUT_SECS: u64 = 5;

/// Default cap on the number of search matches kept.
pub const DEFAULT_MAX_SEARCH_RESULTS: usize = 10;

/// Tunables for an [`crate::Editor`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Tab stop width in cells (at least 1).
    pub tab_width: usize,
    /// How long a status message stays visible, in seconds.
    pub message_timeout_secs: u64,
    /// Maximum number of search matches kept for `n`/`p` navigation.
    pub max_search_results: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            message_timeout_secs: DEFAULT_MESSAGE_TIMEOUT_SECS,
            max_search_results: DEFAULT_MAX_SEARCH_RESULTS,
        }
    }
}

impl EditorConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        Ok(config.normalized())
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Status message lifetime as a [`Duration`].
    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }

    fn normalized(mut self) -> Self {
        self.tab_width = self.tab_width.max(1);
        self
    }
}
