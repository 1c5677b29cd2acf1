use anyhow::Result;

use crate::link::ElementId;
use crate::position::{Placement, Rect, Size, Viewport};
use crate::render::PopupElement;

/// Identity of a popup attached to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupId(pub u64);

/// Everything the hover session does to the host page.
///
/// Attaching happens in two steps so the popup can be measured and placed
/// before the user sees it: `append_hidden`, then `reveal_at`.
#[cfg_attr(test, mockall::automock)]
pub trait Document: Send {
    fn append_hidden(&mut self, popup: &PopupElement) -> Result<PopupId>;

    /// Measured size of an attached popup.
    fn popup_size(&self, popup: PopupId) -> Result<Size>;

    /// Bounding rect of an element in client coordinates.
    fn element_rect(&self, element: ElementId) -> Result<Rect>;

    fn viewport(&self) -> Viewport;

    fn reveal_at(&mut self, popup: PopupId, placement: Placement) -> Result<()>;

    /// Detaches a popup. Removing an unknown popup is a no-op.
    fn remove(&mut self, popup: PopupId);
}
