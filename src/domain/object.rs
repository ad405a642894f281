/// Level objects: a closed sum type with one shared operation table.
///
/// Placement is immutable after construction. The only mutable bit is a
/// force field's `on` flag, flipped by a tap inside its area.
///
/// | Variant    | Footprint   | Directional overlap      | Reacts to tap |
/// |------------|-------------|--------------------------|---------------|
/// | Wall       | 1x1 or 2x2  | always                   | no            |
/// | ForceField | 1x1 or 2x2  | only while `on`          | toggles `on`  |
/// | Elevator   | 1x1         | always (caller decides)  | no            |
/// | Goal       | 1x1         | always (caller decides)  | no            |

use super::geom::{edge, overlaps, Direction, Rect};
use super::input::FrameInput;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Object {
    Wall { x: i32, y: i32, big: bool },
    ForceField { x: i32, y: i32, big: bool, on: bool },
    Elevator { x: i32, y: i32 },
    Goal { x: i32, y: i32 },
}

impl Object {
    pub fn wall(x: i32, y: i32, big: bool) -> Self {
        Object::Wall { x, y, big }
    }

    /// Force fields start switched off.
    pub fn force_field(x: i32, y: i32, big: bool) -> Self {
        Object::ForceField { x, y, big, on: false }
    }

    pub fn elevator(x: i32, y: i32) -> Self {
        Object::Elevator { x, y }
    }

    pub fn goal(x: i32, y: i32) -> Self {
        Object::Goal { x, y }
    }

    /// Grid cell of the top-left corner.
    pub fn cell(&self) -> (i32, i32) {
        match *self {
            Object::Wall { x, y, .. }
            | Object::ForceField { x, y, .. }
            | Object::Elevator { x, y }
            | Object::Goal { x, y } => (x, y),
        }
    }

    pub fn is_big(&self) -> bool {
        match *self {
            Object::Wall { big, .. } | Object::ForceField { big, .. } => big,
            Object::Elevator { .. } | Object::Goal { .. } => false,
        }
    }

    /// Full pixel area: grid cell x tile size, doubled when big.
    pub fn area(&self) -> Rect {
        let (x, y) = self.cell();
        let span = if self.is_big() { 2 } else { 1 };
        Rect::from_tiles(x, y, span, span)
    }

    /// Is the object currently solid as far as its own state is concerned?
    pub fn is_active(&self) -> bool {
        match *self {
            Object::ForceField { on, .. } => on,
            _ => true,
        }
    }

    pub fn is_elevator(&self) -> bool {
        matches!(self, Object::Elevator { .. })
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, Object::Goal { .. })
    }

    /// Does the face of this object presented to a mover travelling in
    /// `dir` intersect `rect`? Inactive force fields never overlap.
    pub fn overlaps_directional(&self, rect: Rect, dir: Direction) -> bool {
        self.is_active() && overlaps(edge(self.area(), dir), rect)
    }

    /// Full-area test, used for "am I inside an elevator" membership.
    pub fn overlaps_area(&self, rect: Rect) -> bool {
        overlaps(self.area(), rect)
    }

    /// React to this tick's input. Returns the new `on` state when a force
    /// field toggled, `None` otherwise.
    pub fn update(&mut self, input: &FrameInput) -> Option<bool> {
        let area = self.area();
        match self {
            Object::ForceField { on, .. } => {
                let tap = input.tap()?;
                if !tap.is_in(area) {
                    return None;
                }
                *on = !*on;
                Some(*on)
            }
            Object::Wall { .. } | Object::Elevator { .. } | Object::Goal { .. } => None,
        }
    }
}
