use anyhow::Result;
use reqwest::Client;
use std::sync::Arc;

use crate::{
    github::GitHub,
    link::LinkMatcher,
    runtime::Runtime,
    settings::{FileSettingsStore, MemorySettingsStore, Settings, SettingsStore},
};

pub const USER_AGENT: &str = concat!("ghpeek/", env!("GHPEEK_VERSION"));

pub struct Config {
    pub github: GitHub,
    pub matcher: LinkMatcher,
}

impl Config {
    /// An explicit `token` wins over the settings file.
    pub fn new<R: Runtime + 'static>(
        runtime: R,
        api_url: Option<String>,
        host: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let settings: Arc<dyn SettingsStore> = match token {
            Some(token) => Arc::new(MemorySettingsStore::new(Settings {
                access_token: token,
                ..Default::default()
            })),
            None => Arc::new(FileSettingsStore::new(runtime)?),
        };

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        let github = GitHub::new(client, api_url, settings);
        let matcher = host
            .as_deref()
            .map(LinkMatcher::new)
            .unwrap_or_default();

        Ok(Self { github, matcher })
    }
}
