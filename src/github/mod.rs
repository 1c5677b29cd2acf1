//! Repository metadata from the code host's REST API.

mod cache;
mod client;
mod error;
mod repo;
mod types;

pub use cache::CachedFetcher;
#[cfg(test)]
pub use client::MockFetchRepoInfo;
pub use client::{API_VERSION, API_VERSION_HEADER, DEFAULT_API_URL, FetchRepoInfo, GitHub};
pub use error::{FetchError, classify_status};
pub use repo::RepoIdentity;
pub use types::{NO_DESCRIPTION, RemoteOwner, RemoteRepo, RepoInfo, Visibility};
