/// Field: insertion-ordered objects plus the start cell.
///
/// ## Query routing
///
/// Objects answer directional overlap uniformly; the Field decides which
/// variants count for which question:
///
/// | Query              | Walls | Force fields (on) | Elevators     | Goals         |
/// |--------------------|-------|-------------------|---------------|---------------|
/// | `conflicts`        | yes   | yes               | only for Down | only for Down |
/// | `touches_elevator` | -     | -                 | edge          | -             |
/// | `in_elevator`      | -     | -                 | full area     | -             |
/// | `touches_goal`     | -     | -                 | -             | edge          |
///
/// Elevators hold a walker up (Down) but never block entering or leaving
/// the shaft. Goals likewise can be stood on but never turn a walker.
///
/// A Field built from a level grid is bounded: any probe reaching outside
/// the grid conflicts in every direction.

use crate::domain::geom::{Direction, Rect};
use crate::domain::input::FrameInput;
use crate::domain::object::Object;

use super::event::GameEvent;

#[derive(Clone, Debug)]
pub struct Field {
    objects: Vec<Object>,
    start: (i32, i32),
    bounds: Option<Rect>,
}

impl Field {
    /// An unbounded field.
    pub fn new(objects: Vec<Object>, start: (i32, i32)) -> Self {
        Field { objects, start, bounds: None }
    }

    /// Treat everything outside `bounds` (pixel space) as solid.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Designated start cell in grid units.
    pub fn start(&self) -> (i32, i32) {
        self.start
    }

    /// Does any blocking object present its `dir`-facing edge to `rect`,
    /// or does `rect` leave the field?
    pub fn conflicts(&self, rect: Rect, dir: Direction) -> bool {
        if self.bounds.map_or(false, |b| !b.contains(rect)) {
            return true;
        }
        self.objects.iter().any(|o| match o {
            Object::Goal { .. } | Object::Elevator { .. } if dir != Direction::Down => false,
            _ => o.overlaps_directional(rect, dir),
        })
    }

    pub fn touches_elevator(&self, rect: Rect, dir: Direction) -> bool {
        self.objects
            .iter()
            .any(|o| o.is_elevator() && o.overlaps_directional(rect, dir))
    }

    /// Full-area elevator membership (not edge-sliced).
    pub fn in_elevator(&self, rect: Rect) -> bool {
        self.objects
            .iter()
            .any(|o| o.is_elevator() && o.overlaps_area(rect))
    }

    pub fn touches_goal(&self, rect: Rect, dir: Direction) -> bool {
        self.objects
            .iter()
            .any(|o| o.is_goal() && o.overlaps_directional(rect, dir))
    }

    /// Forward this tick's input to every object. Only force fields react.
    pub fn update(&mut self, input: &FrameInput, events: &mut Vec<GameEvent>) {
        if !input.tapped {
            return;
        }
        for (index, obj) in self.objects.iter_mut().enumerate() {
            if let Some(on) = obj.update(input) {
                log::debug!("force field #{index} at {:?} -> {}", obj.cell(), if on { "on" } else { "off" });
                events.push(GameEvent::ForceFieldToggled { index, on });
            }
        }
    }
}
