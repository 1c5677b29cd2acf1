//! Hover session: the state machine deciding when a popup appears and
//! disappears, and the driver that runs its effects against the host page.

mod clock;
mod controller;
mod document;
mod state;

#[cfg(test)]
pub use clock::MockClock;
pub use clock::{Clock, SystemClock};
pub use controller::{HoverController, HoverEvent, forward_settings};
#[cfg(test)]
pub use document::MockDocument;
pub use document::{Document, PopupId};
pub use state::{Active, Effect, GRACE_DELAY, HoverFlags, Input, Session, SessionToken, State};
