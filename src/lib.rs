//! Repository previews for hovered links.
//!
//! A host page reports pointer movement as [`session::HoverEvent`]s. Links
//! that point at a repository home page get a small card with the
//! repository's metadata once the pointer has rested on them; the card goes
//! away shortly after the pointer leaves both the link and the card.

pub mod commands;
pub mod github;
pub mod link;
pub mod position;
pub mod render;
pub mod runtime;
pub mod session;
pub mod settings;
