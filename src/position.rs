//! Popup placement relative to the hovered link.
//!
//! Rects are in client (viewport) coordinates, as a bounding-client-rect
//! reports them. The returned [`Placement`] is in page coordinates.

/// Gap kept between a right-clamped popup and the viewport edge.
pub const VIEWPORT_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
}

/// Anchors the popup below the trigger, left-aligned. Shifts it left when it
/// would overflow the right edge and flips it above the trigger when it would
/// overflow the bottom edge.
pub fn place(trigger: Rect, popup: Size, viewport: Viewport) -> Placement {
    let left = if trigger.left + popup.width > viewport.width {
        viewport.width - popup.width - VIEWPORT_MARGIN
    } else {
        trigger.left
    };

    let top = if trigger.bottom() + popup.height > viewport.height {
        trigger.top - popup.height
    } else {
        trigger.bottom()
    };

    Placement {
        left: left + viewport.scroll_x,
        top: top + viewport.scroll_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 1024.0,
            height: 768.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    fn popup() -> Size {
        Size {
            width: 320.0,
            height: 180.0,
        }
    }

    #[test]
    fn test_default_anchor_below_and_left_aligned() {
        let trigger = Rect {
            left: 100.0,
            top: 200.0,
            width: 80.0,
            height: 20.0,
        };

        let placement = place(trigger, popup(), viewport());

        assert_eq!(placement, Placement { left: 100.0, top: 220.0 });
    }

    #[test]
    fn test_scroll_offset_is_added() {
        let trigger = Rect {
            left: 100.0,
            top: 200.0,
            width: 80.0,
            height: 20.0,
        };
        let viewport = Viewport {
            scroll_x: 15.0,
            scroll_y: 1_000.0,
            ..viewport()
        };

        let placement = place(trigger, popup(), viewport);

        assert_eq!(placement, Placement { left: 115.0, top: 1_220.0 });
    }

    #[test]
    fn test_right_overflow_shifts_left() {
        let trigger = Rect {
            left: 900.0,
            top: 100.0,
            width: 60.0,
            height: 20.0,
        };

        let placement = place(trigger, popup(), viewport());

        assert_eq!(placement.left, 1024.0 - 320.0 - 10.0);
        assert_eq!(placement.top, 120.0);
    }

    #[test]
    fn test_bottom_overflow_flips_above() {
        let trigger = Rect {
            left: 100.0,
            top: 700.0,
            width: 60.0,
            height: 20.0,
        };

        let placement = place(trigger, popup(), viewport());

        assert_eq!(placement, Placement { left: 100.0, top: 520.0 });
    }

    #[test]
    fn test_bottom_right_corner_clamps_both() {
        let trigger = Rect {
            left: 1_000.0,
            top: 740.0,
            width: 20.0,
            height: 20.0,
        };
        let viewport = Viewport {
            scroll_y: 300.0,
            ..viewport()
        };

        let placement = place(trigger, popup(), viewport);

        assert_eq!(
            placement,
            Placement {
                left: 694.0,
                top: 740.0 - 180.0 + 300.0,
            }
        );
    }

    #[test]
    fn test_exact_fit_is_not_clamped() {
        let trigger = Rect {
            left: 704.0,
            top: 568.0,
            width: 10.0,
            height: 20.0,
        };

        let placement = place(trigger, popup(), viewport());

        assert_eq!(placement, Placement { left: 704.0, top: 588.0 });
    }
}
