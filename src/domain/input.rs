/// Per-tick input snapshot supplied by the driver.
///
/// `tapped` is edge-triggered: true for exactly one tick per physical tap.
/// `cursor` is the pointer position in pixel coordinates.

use super::geom::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub cursor: Point,
    pub tapped: bool,
}

impl FrameInput {
    /// No tap this tick; the cursor is irrelevant.
    pub fn idle() -> Self {
        FrameInput::default()
    }

    pub fn tap_at(x: i32, y: i32) -> Self {
        FrameInput { cursor: Point::new(x, y), tapped: true }
    }

    /// The tap position, if a tap edge occurred this tick.
    pub fn tap(&self) -> Option<Point> {
        self.tapped.then_some(self.cursor)
    }

    /// Same cursor, tap edge cleared. Used for turbo sub-ticks after the first.
    pub fn without_tap(&self) -> Self {
        FrameInput { tapped: false, ..*self }
    }
}
