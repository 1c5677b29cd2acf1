use crate::link::{ElementId, HoverTarget, LinkMatcher};

/// Report whether a link would get a preview
pub fn check(matcher: &LinkMatcher, url: &str) -> bool {
    let target = HoverTarget::anchor(ElementId(0), url);
    match matcher.candidate_identity(&target) {
        Some(repo) => {
            println!("{} -> {}", url, repo);
            true
        }
        None => {
            println!("{} is not a repository link", url);
            false
        }
    }
}
