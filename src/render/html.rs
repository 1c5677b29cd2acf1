use super::{POPUP_CONTENT_CLASS, POPUP_ELEMENT_ID, PopupElement};

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

impl PopupElement {
    /// Markup for the card. Every remote-provided value is escaped.
    pub fn to_html(&self) -> String {
        let language = match &self.language {
            Some(lang) => format!(
                r#"<span class="language"><span class="swatch" style="background-color: {}"></span>{}</span>"#,
                lang.color,
                escape_html(&lang.name)
            ),
            None => String::new(),
        };

        format!(
            concat!(
                r#"<div id="{id}"><div class="{class}">"#,
                r#"<h2>{title} <span class="visibility">{visibility}</span></h2>"#,
                r#"<p class="description">{description}</p>"#,
                r#"<p class="stats"><span class="stars">⭐ {stars}</span> <span class="forks">⑂ {forks}</span> {language}</p>"#,
                r#"<p class="author"><img src="{avatar}" width="20" height="20" alt=""> {login}</p>"#,
                r#"<p class="updated">Updated {updated}</p>"#,
                r#"</div></div>"#
            ),
            id = POPUP_ELEMENT_ID,
            class = POPUP_CONTENT_CLASS,
            title = escape_html(&self.title),
            visibility = self.visibility.label(),
            description = escape_html(&self.description),
            stars = self.stars,
            forks = self.forks,
            language = language,
            avatar = escape_html(&self.author_avatar_url),
            login = escape_html(&self.author_login),
            updated = escape_html(&self.updated),
        )
    }
}
