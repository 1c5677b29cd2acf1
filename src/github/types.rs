use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repo::RepoIdentity;

pub const NO_DESCRIPTION: &str = "No description available";

/// Repository payload as returned by `GET /repos/{owner}/{repo}`.
///
/// Only the consumed fields are declared; everything is optional so a sparse
/// payload still deserializes.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RemoteRepo {
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub language: Option<String>,
    pub owner: Option<RemoteOwner>,
    pub pushed_at: Option<String>,
    pub visibility: Option<String>,
    pub private: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RemoteOwner {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Unknown,
}

impl Visibility {
    /// Reads the `visibility` field, falling back to the older `private` flag.
    pub fn from_remote(visibility: Option<&str>, private: Option<bool>) -> Self {
        match visibility.map(str::to_ascii_lowercase).as_deref() {
            Some("public") => Visibility::Public,
            Some("private") | Some("internal") => Visibility::Private,
            Some(_) => Visibility::Unknown,
            None => match private {
                Some(true) => Visibility::Private,
                Some(false) => Visibility::Public,
                None => Visibility::Unknown,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
            Visibility::Unknown => "Unknown",
        }
    }
}

/// Display-ready repository record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RepoInfo {
    pub full_name: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub primary_language: Option<String>,
    pub author_login: String,
    pub author_avatar_url: String,
    /// `None` renders as "unknown".
    pub last_pushed_at: Option<DateTime<Utc>>,
    pub visibility: Visibility,
}

impl RepoInfo {
    /// Normalizes a remote payload, substituting defaults for missing fields.
    pub fn from_remote(remote: RemoteRepo, repo: &RepoIdentity) -> Self {
        let owner = remote.owner.unwrap_or_default();
        let description = remote
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        let last_pushed_at = remote
            .pushed_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc));

        RepoInfo {
            full_name: remote
                .full_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| repo.to_string()),
            description,
            stars: remote.stargazers_count.unwrap_or(0),
            forks: remote.forks_count.unwrap_or(0),
            primary_language: remote.language.filter(|l| !l.is_empty()),
            author_login: owner.login.unwrap_or_else(|| repo.owner.clone()),
            author_avatar_url: owner.avatar_url.unwrap_or_default(),
            last_pushed_at,
            visibility: Visibility::from_remote(remote.visibility.as_deref(), remote.private),
        }
    }
}
