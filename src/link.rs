//! Detection of links that point at a repository home page.

use log::debug;
use url::Url;

use crate::github::RepoIdentity;

pub const DEFAULT_LINK_HOST: &str = "github.com";

/// Attribute the host site puts on links it already previews itself.
pub const COMPETING_PREVIEW_MARKER: &str = "data-hovercard-type";

/// Opaque identity of an element in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// An element under the pointer, as reported by the host document.
///
/// Two targets are the same element only when their ids match.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTarget {
    pub id: ElementId,
    pub tag: String,
    /// Resolved (absolute) `href`, when the element has one.
    pub href: Option<String>,
    pub attributes: Vec<String>,
}

impl HoverTarget {
    pub fn anchor(id: ElementId, href: &str) -> Self {
        Self {
            id,
            tag: "a".to_string(),
            href: Some(href.to_string()),
            attributes: vec!["href".to_string()],
        }
    }

    pub fn with_attribute(mut self, name: &str) -> Self {
        self.attributes.push(name.to_string());
        self
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone)]
pub struct LinkMatcher {
    host: String,
}

impl Default for LinkMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_HOST)
    }
}

impl LinkMatcher {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_ascii_lowercase(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_preview_candidate(&self, target: &HoverTarget) -> bool {
        self.candidate_identity(target).is_some()
    }

    /// The repository a candidate link points at, or `None` for anything
    /// that must not get a preview.
    pub fn candidate_identity(&self, target: &HoverTarget) -> Option<RepoIdentity> {
        if !target.tag.eq_ignore_ascii_case("a") {
            return None;
        }
        if target.has_attribute(COMPETING_PREVIEW_MARKER) {
            debug!("Skipping link with host-provided preview");
            return None;
        }
        self.identity_from_url(target.href.as_deref()?)
    }

    /// Parses `https://<host>/<owner>/<repo>` with an optional trailing slash.
    /// Query and fragment do not affect matching.
    pub fn identity_from_url(&self, href: &str) -> Option<RepoIdentity> {
        let url = Url::parse(href).ok()?;
        if url.scheme() != "https" || url.port().is_some() {
            return None;
        }
        if url.host_str()? != self.host {
            return None;
        }

        let mut segments: Vec<&str> = url.path_segments()?.collect();
        if segments.last() == Some(&"") {
            segments.pop();
        }
        match segments.as_slice() {
            [owner, name] => RepoIdentity::from_segments(owner, name),
            _ => None,
        }
    }
}
