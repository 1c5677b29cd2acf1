use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, HeaderValue},
};
use std::sync::Arc;

use super::error::{FetchError, classify_status};
use super::repo::RepoIdentity;
use super::types::{RemoteRepo, RepoInfo};
use crate::settings::{SettingsStore, mask_token};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
pub const API_VERSION: &str = "2022-11-28";

/// Resolves repository metadata. `None` means "no info": every failure
/// collapses to it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchRepoInfo: Send + Sync {
    async fn fetch_repo_info(&self, repo: &RepoIdentity) -> Option<RepoInfo>;
}

pub struct GitHub {
    pub client: Client,
    pub api_url: String,
    settings: Arc<dyn SettingsStore>,
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url, settings))]
    pub fn new(client: Client, api_url: Option<String>, settings: Arc<dyn SettingsStore>) -> Self {
        let api_url = api_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            client,
            api_url,
            settings,
        }
    }

    /// Reads the credential; an unreachable store means "no credential".
    async fn access_token(&self) -> Option<String> {
        match self.settings.load().await {
            Ok(settings) => settings.token().map(str::to_string),
            Err(e) => {
                warn!("Could not read settings, continuing without credential: {:#}", e);
                None
            }
        }
    }

    /// Fetches and normalizes one repository. Failures carry a [`FetchError`].
    #[tracing::instrument(skip(self))]
    pub async fn try_fetch_repo_info(&self, repo: &RepoIdentity) -> Result<RepoInfo> {
        let url = format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.name);

        debug!("Fetching repo info from {}...", url);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(API_VERSION_HEADER, API_VERSION);

        if let Some(token) = self.access_token().await {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    debug!("Authenticating with token {}", mask_token(&token));
                    request = request.header(AUTHORIZATION, value);
                }
                Err(_) => warn!("Ignoring access token with invalid characters"),
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if let Some(error) = classify_status(response.status()) {
            return Err(error.into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;
        if !value.is_object() {
            return Err(FetchError::Malformed("expected a JSON object".to_string()).into());
        }
        let remote: RemoteRepo =
            serde_json::from_value(value).map_err(|e| FetchError::Malformed(e.to_string()))?;

        Ok(RepoInfo::from_remote(remote, repo))
    }
}

#[async_trait]
impl FetchRepoInfo for GitHub {
    #[tracing::instrument(skip(self))]
    async fn fetch_repo_info(&self, repo: &RepoIdentity) -> Option<RepoInfo> {
        match self.try_fetch_repo_info(repo).await {
            Ok(info) => Some(info),
            Err(e) => {
                let kind = e
                    .downcast_ref::<FetchError>()
                    .map(FetchError::kind)
                    .unwrap_or("fetch error");
                debug!("No preview for {} ({}): {:#}", repo, kind, e);
                None
            }
        }
    }
}
