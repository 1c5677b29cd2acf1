use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use super::client::FetchRepoInfo;
use super::repo::RepoIdentity;
use super::types::RepoInfo;

/// Keeps successful lookups for a short time so hovering the same link
/// again does not hit the API. Failures are never cached.
pub struct CachedFetcher<F: FetchRepoInfo> {
    inner: F,
    ttl: Duration,
    entries: Mutex<HashMap<RepoIdentity, (Instant, RepoInfo)>>,
}

impl<F: FetchRepoInfo> CachedFetcher<F> {
    pub fn new(inner: F, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn cached(&self, repo: &RepoIdentity) -> Option<RepoInfo> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(repo) {
            Some((stored_at, info)) if stored_at.elapsed() < self.ttl => Some(info.clone()),
            Some(_) => {
                entries.remove(repo);
                None
            }
            None => None,
        }
    }
}

#[async_trait]
impl<F: FetchRepoInfo> FetchRepoInfo for CachedFetcher<F> {
    async fn fetch_repo_info(&self, repo: &RepoIdentity) -> Option<RepoInfo> {
        if let Some(info) = self.cached(repo) {
            debug!("Using cached info for {}", repo);
            return Some(info);
        }

        let info = self.inner.fetch_repo_info(repo).await?;
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(repo.clone(), (Instant::now(), info.clone()));
        }
        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::MockFetchRepoInfo;
    use crate::github::types::{NO_DESCRIPTION, Visibility};

    fn repo() -> RepoIdentity {
        RepoIdentity {
            owner: "octo".to_string(),
            name: "demo".to_string(),
        }
    }

    fn info() -> RepoInfo {
        RepoInfo {
            full_name: "octo/demo".to_string(),
            description: NO_DESCRIPTION.to_string(),
            stars: 1,
            forks: 0,
            primary_language: None,
            author_login: "octo".to_string(),
            author_avatar_url: String::new(),
            last_pushed_at: None,
            visibility: Visibility::Public,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl() {
        let mut inner = MockFetchRepoInfo::new();
        inner
            .expect_fetch_repo_info()
            .times(1)
            .returning(|_| Some(info()));

        let fetcher = CachedFetcher::new(inner, Duration::from_secs(60));

        assert_eq!(fetcher.fetch_repo_info(&repo()).await, Some(info()));
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(fetcher.fetch_repo_info(&repo()).await, Some(info()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_refetched() {
        let mut inner = MockFetchRepoInfo::new();
        inner
            .expect_fetch_repo_info()
            .times(2)
            .returning(|_| Some(info()));

        let fetcher = CachedFetcher::new(inner, Duration::from_secs(60));

        fetcher.fetch_repo_info(&repo()).await;
        tokio::time::advance(Duration::from_secs(61)).await;
        fetcher.fetch_repo_info(&repo()).await;
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let mut inner = MockFetchRepoInfo::new();
        inner.expect_fetch_repo_info().times(2).returning(|_| None);

        let fetcher = CachedFetcher::new(inner, Duration::from_secs(60));

        assert!(fetcher.fetch_repo_info(&repo()).await.is_none());
        assert!(fetcher.fetch_repo_info(&repo()).await.is_none());
    }
}
