//! # Drag-Selection Tracking
//!
//! State machine for click-drag box selection: press anchors the box, each
//! further press sample stretches it, release yields the final region.
//!
//! The tracker is input-source agnostic - the embedding feeds it cursor
//! positions in screen space and hands the released region to the
//! selection helper.

use skirmish_shared::{Rect, Vec2};

/// Accumulates a drag gesture into a normalized selection rectangle.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    /// Where the drag started; `Some` while a selection box is open.
    anchor: Option<Vec2>,
    /// Current normalized box.
    region: Rect,
}

impl DragTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a selection box is currently open.
    #[inline]
    #[must_use]
    pub const fn active(&self) -> bool {
        self.anchor.is_some()
    }

    /// The open selection box, for drawing while the drag is in flight.
    #[must_use]
    pub fn region(&self) -> Option<Rect> {
        self.anchor.map(|_| self.region)
    }

    /// Feeds one pressed-cursor sample.
    ///
    /// The first sample of a gesture anchors the box; every further sample
    /// stretches it between the anchor and the cursor, normalized so a drag
    /// in any direction produces a well-formed rectangle.
    pub fn press(&mut self, cursor: Vec2) {
        match self.anchor {
            None => {
                self.anchor = Some(cursor);
                self.region = Rect::from_corners(cursor, cursor);
            }
            Some(anchor) => {
                self.region = Rect::from_corners(anchor, cursor);
            }
        }
    }

    /// Ends the gesture, yielding the final region.
    ///
    /// Returns `None` when no box was open. The tracker resets either way.
    pub fn release(&mut self) -> Option<Rect> {
        let region = self.anchor.take().map(|_| self.region);
        self.region = Rect::default();
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_drag_release() {
        let mut tracker = DragTracker::new();
        assert!(!tracker.active());

        tracker.press(Vec2::new(100.0, 100.0));
        assert!(tracker.active());

        tracker.press(Vec2::new(150.0, 80.0));
        let open = tracker.region().unwrap();
        assert_eq!(open, Rect::new(100.0, 80.0, 50.0, 20.0));

        let released = tracker.release().unwrap();
        assert_eq!(released, open);

        // Reset: nothing open, releasing again yields nothing
        assert!(!tracker.active());
        assert!(tracker.release().is_none());
    }

    #[test]
    fn test_backwards_drag_normalizes() {
        let mut tracker = DragTracker::new();
        tracker.press(Vec2::new(200.0, 200.0));
        tracker.press(Vec2::new(120.0, 140.0));

        assert_eq!(
            tracker.release().unwrap(),
            Rect::new(120.0, 140.0, 80.0, 60.0)
        );
    }

    #[test]
    fn test_click_without_drag_is_point_box() {
        let mut tracker = DragTracker::new();
        tracker.press(Vec2::new(40.0, 40.0));

        let region = tracker.release().unwrap();
        assert_eq!(region, Rect::new(40.0, 40.0, 0.0, 0.0));
    }
}
