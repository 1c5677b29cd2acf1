//! User settings consumed by the hover core.
//!
//! Settings are owned by the options page; the core only reads them, once at
//! startup and then whenever a change is pushed.

mod file;
mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

pub const DEFAULT_POPUP_DELAY_MILLIS: u64 = 100;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub enabled: bool,
    #[serde(alias = "githubToken")]
    pub access_token: String,
    pub popup_delay_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            access_token: String::new(),
            popup_delay_millis: DEFAULT_POPUP_DELAY_MILLIS,
        }
    }
}

impl Settings {
    /// Debounce delay before fetching; a zero value falls back to the default.
    pub fn popup_delay(&self) -> Duration {
        match self.popup_delay_millis {
            0 => Duration::from_millis(DEFAULT_POPUP_DELAY_MILLIS),
            ms => Duration::from_millis(ms),
        }
    }

    /// The access token, or `None` when unset.
    pub fn token(&self) -> Option<&str> {
        let token = self.access_token.trim();
        (!token.is_empty()).then_some(token)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings>;
}

/// Masks a credential for logging: `ghp_****cdef`.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", head, tail)
}
