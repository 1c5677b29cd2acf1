//! Classification of metadata fetch failures.
//!
//! Every failure ends the same way for the user (no popup), but the kind is
//! kept distinct so diagnostics can tell a missing repository from a rate
//! limit or a broken payload.

use reqwest::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 404
    NotFound,
    /// HTTP 401, 403 or 429
    RateLimitedOrUnauthorized(u16),
    /// Any other non-success status
    Http(u16),
    /// The request never produced a response
    Network(String),
    /// The body was not a well-formed repository object
    Malformed(String),
}

impl FetchError {
    /// Short diagnostic label for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::NotFound => "not found",
            FetchError::RateLimitedOrUnauthorized(_) => "rate-limited or unauthorized",
            FetchError::Http(_) | FetchError::Network(_) => "fetch error",
            FetchError::Malformed(_) => "malformed payload",
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NotFound => write!(f, "Not found: the repository does not exist or is hidden"),
            FetchError::RateLimitedOrUnauthorized(status) => write!(
                f,
                "Rate limited or unauthorized (HTTP {}). Try again later or configure an access token.",
                status
            ),
            FetchError::Http(status) => write!(f, "Fetch error: HTTP {}", status),
            FetchError::Network(msg) => write!(f, "Fetch error: {}", msg),
            FetchError::Malformed(msg) => write!(f, "Malformed repository payload: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Maps a response status to a failure, or `None` when the status is a success.
pub fn classify_status(status: StatusCode) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }
    let error = match status {
        StatusCode::NOT_FOUND => FetchError::NotFound,
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED | StatusCode::TOO_MANY_REQUESTS => {
            FetchError::RateLimitedOrUnauthorized(status.as_u16())
        }
        s => FetchError::Http(s.as_u16()),
    };
    Some(error)
}
