mod check;
pub mod config;
mod preview;

pub use check::check;
pub use config::Config;
pub use preview::{build_preview, parse_target, preview};
