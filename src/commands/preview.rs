use anyhow::{Result, anyhow};
use log::debug;

use crate::{
    github::RepoIdentity,
    link::LinkMatcher,
    render::{PopupElement, render},
    session::Clock,
};

use super::config::Config;

/// Accepts a repository URL or an `owner/repo` pair.
pub fn parse_target(matcher: &LinkMatcher, target: &str) -> Result<RepoIdentity> {
    if target.contains("://") {
        matcher.identity_from_url(target).ok_or_else(|| {
            anyhow!(
                "{} is not a repository link on {}. Expected https://{}/<owner>/<repo>.",
                target,
                matcher.host(),
                matcher.host()
            )
        })
    } else {
        target.parse()
    }
}

/// Fetch a repository and print its preview card
#[tracing::instrument(skip(config, clock))]
pub async fn preview<C: Clock>(config: &Config, target: &str, html: bool, clock: &C) -> Result<()> {
    let popup = build_preview(config, target, clock).await?;
    if html {
        println!("{}", popup.to_html());
    } else {
        println!("{}", popup.to_text());
    }
    Ok(())
}

pub async fn build_preview<C: Clock>(
    config: &Config,
    target: &str,
    clock: &C,
) -> Result<PopupElement> {
    let repo = parse_target(&config.matcher, target)?;
    debug!("Previewing {}", repo);

    let info = config.github.try_fetch_repo_info(&repo).await?;
    Ok(render(&info, clock.now()))
}
