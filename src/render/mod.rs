//! Builds the popup card from a repository record.
//!
//! Rendering is pure: the element is detached and touches neither the
//! network nor the document. Attaching it is the controller's job.

mod format;
mod html;
mod language;

use chrono::{DateTime, Utc};

use crate::github::{RepoInfo, Visibility};

pub use format::{format_count, format_stars, relative_time, updated_label};
pub use html::escape_html;
pub use language::{NEUTRAL_COLOR, language_color};

pub const POPUP_ELEMENT_ID: &str = "preview-popup";
pub const POPUP_CONTENT_CLASS: &str = "popup-content";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBadge {
    pub name: String,
    pub color: &'static str,
}

/// A detached popup card, ready to be attached to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupElement {
    pub title: String,
    pub visibility: Visibility,
    pub description: String,
    pub stars: String,
    pub forks: String,
    pub language: Option<LanguageBadge>,
    pub author_login: String,
    pub author_avatar_url: String,
    pub updated: String,
}

/// `now` anchors the relative "updated" label.
pub fn render(info: &RepoInfo, now: DateTime<Utc>) -> PopupElement {
    PopupElement {
        title: info.full_name.clone(),
        visibility: info.visibility,
        description: info.description.clone(),
        stars: format_stars(info.stars),
        forks: format_count(info.forks),
        language: info.primary_language.as_ref().map(|name| LanguageBadge {
            name: name.clone(),
            color: language_color(name),
        }),
        author_login: info.author_login.clone(),
        author_avatar_url: info.author_avatar_url.clone(),
        updated: updated_label(info.last_pushed_at, now),
    }
}

impl PopupElement {
    /// Plain-text rendering of the card for terminals.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("{} [{}]", self.title, self.visibility.label()),
            self.description.clone(),
        ];
        let mut stats = format!("★ {}   ⑂ {}", self.stars, self.forks);
        if let Some(language) = &self.language {
            stats.push_str(&format!("   ● {}", language.name));
        }
        lines.push(stats);
        lines.push(format!("by {} · updated {}", self.author_login, self.updated));
        lines.join("\n")
    }
}
