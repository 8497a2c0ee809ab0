//! Runtime configuration for the search feature.
//!
//! Hosts ship this as a small JSON blob next to the page (or build it in
//! code); every field has a default matching the stock theme, so an empty
//! object `{}` configures the classic behavior.

use serde::Deserialize;
use std::time::Duration;

fn default_index_url() -> String {
    "/search.json".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

/// Configuration for the loader and interaction controller.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Where the generated index file lives, relative to the site root.
    #[serde(default = "default_index_url")]
    pub index_url: String,
    /// Trailing debounce applied to keystrokes before a search runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Maximum results to render. 0 renders the full result set.
    #[serde(default)]
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            index_url: default_index_url(),
            debounce_ms: default_debounce_ms(),
            limit: 0,
        }
    }
}

impl SearchConfig {
    /// Debounce interval as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Apply the configured limit to a result count.
    pub fn clamp_len(&self, len: usize) -> usize {
        if self.limit == 0 {
            len
        } else {
            len.min(self.limit)
        }
    }
}
