use anyhow::{Result, anyhow};
use std::str::FromStr;

/// An `owner/name` pair identifying a repository on the code host.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
}

impl RepoIdentity {
    /// Builds an identity from two path segments, rejecting empty ones.
    pub fn from_segments(owner: &str, name: &str) -> Option<Self> {
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(RepoIdentity {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoIdentity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [owner, name] => RepoIdentity::from_segments(owner, name)
                .ok_or_else(|| anyhow!("Invalid repository format. Expected 'owner/repo'.")),
            _ => Err(anyhow!("Invalid repository format. Expected 'owner/repo'.")),
        }
    }
}
