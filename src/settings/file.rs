use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;

use super::{Settings, SettingsStore, mask_token};
use crate::runtime::Runtime;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Settings persisted as JSON under `<config_dir>/ghpeek/settings.json`.
///
/// A missing file yields defaults. `GITHUB_TOKEN`, when set, overrides the
/// stored token.
pub struct FileSettingsStore<R: Runtime> {
    runtime: R,
    path: PathBuf,
}

impl<R: Runtime> FileSettingsStore<R> {
    pub fn new(runtime: R) -> Result<Self> {
        let path = runtime
            .config_dir()
            .ok_or_else(|| anyhow!("Could not determine the user config directory"))?
            .join("ghpeek")
            .join(SETTINGS_FILE_NAME);
        Ok(Self::with_path(runtime, path))
    }

    pub fn with_path(runtime: R, path: PathBuf) -> Self {
        Self { runtime, path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl<R: Runtime> SettingsStore for FileSettingsStore<R> {
    #[tracing::instrument(skip(self))]
    async fn load(&self) -> Result<Settings> {
        let mut settings = if self.runtime.exists(&self.path) {
            let content = self.runtime.read_to_string(&self.path)?;
            serde_json::from_str::<Settings>(&content)
                .with_context(|| format!("Invalid settings file {}", self.path.display()))?
        } else {
            debug!("No settings file at {:?}, using defaults", self.path);
            Settings::default()
        };

        if let Ok(token) = self.runtime.env_var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(&token));
                settings.access_token = token;
            }
        }

        Ok(settings)
    }
}
