/// The walker and its movement state machine.
///
/// ## States
///
/// ```text
///            touches elevator edge            leaves shaft, supported
///   Walking ───────────────────────▶ Climbing ────────────────────────▶ Walking
///      │  ▲                              │
///      │  │ foot probe hits again        │ leaves shaft, unsupported
///      ▼  │                              ▼
///   Falling ◀────────────────────────────┘
/// ```
///
/// ## Tick order (fixed priority)
///
///   1. Climb start  : not falling, elevator probe touches an elevator edge
///   2. Climb continue: climbing, confliction box inside an elevator
///   3. Fall         : foot probe unsupported; 8 px ledge nudge on the first
///                      frame, then drop up to 3 px, stopping on contact
///   4. Grounded     : otherwise
///
/// A falling walker does nothing else that tick. Otherwise: goal check
/// (terminal; walking into a goal or standing on one), lateral step or turn
/// at wall (skipped while climbing), then tap-to-reverse.
///
/// Positions are `Fixed` sub-pixel values; all probes work in pixel space.

use crate::domain::fixed::Fixed;
use crate::domain::geom::{Direction, Facing, Rect, TILE_HEIGHT, TILE_WIDTH};
use crate::domain::input::FrameInput;

use super::event::GameEvent;
use super::field::Field;

/// Maximum pixels dropped per tick while falling.
pub const FALL_STEPS: i32 = 3;
/// Horizontal offset applied on the first frame of a fall.
pub const LEDGE_NUDGE_PX: i32 = 8;
const STEP: Fixed = Fixed::from_px(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Motion {
    Walking,
    Falling,
    Climbing,
}

/// Outcome of one tick, computed without mutating the walker.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Transition {
    pub motion: Motion,
    pub dx: Fixed,
    pub dy: Fixed,
    pub facing: Facing,
    pub reached_goal: bool,
    pub wall_turn: bool,
    pub tap_reversed: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Player {
    x: Fixed,
    y: Fixed,
    facing: Facing,
    motion: Motion,
    at_goal: bool,
}

impl Player {
    /// Place the walker on grid cell `start`, walking right.
    pub fn new(start: (i32, i32)) -> Self {
        Player {
            x: Fixed::from_tile_x(start.0),
            y: Fixed::from_tile_y(start.1),
            facing: Facing::Right,
            motion: Motion::Walking,
            at_goal: false,
        }
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn x32(&self) -> i32 {
        self.x.raw()
    }

    pub fn y32(&self) -> i32 {
        self.y.raw()
    }

    /// Top-left pixel position.
    pub fn pixel_pos(&self) -> (i32, i32) {
        (self.x.to_px(), self.y.to_px())
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_falling(&self) -> bool {
        self.motion == Motion::Falling
    }

    pub fn is_climbing(&self) -> bool {
        self.motion == Motion::Climbing
    }

    /// One-way: never cleared once set.
    pub fn at_goal(&self) -> bool {
        self.at_goal
    }

    // ── Probes (pixel space) ──

    /// The walker's collidable body: exactly one tile at its top-left.
    pub fn confliction_box(&self) -> Rect {
        let (x, y) = self.pixel_pos();
        Rect::from_size(x, y, TILE_WIDTH, TILE_HEIGHT)
    }

    /// Half-tile strip just beneath the leading foot.
    pub fn foot_probe(&self) -> Rect {
        let (x, y) = self.pixel_pos();
        let x = match self.facing {
            Facing::Left => x,
            Facing::Right => x + TILE_WIDTH / 2,
        };
        Rect::from_size(x, y + TILE_HEIGHT, TILE_WIDTH / 2, 1)
    }

    /// 1 px column inset into the body where it would straddle a shaft.
    pub fn elevator_probe(&self) -> Rect {
        let (x, y) = self.pixel_pos();
        let x = match self.facing {
            Facing::Left => x + TILE_WIDTH * 3 / 4,
            Facing::Right => x + TILE_WIDTH / 4 - 1,
        };
        Rect::from_size(x, y, 1, TILE_HEIGHT)
    }

    /// Tap target: the body padded by half a tile on every side.
    pub fn clickable_area(&self) -> Rect {
        self.confliction_box().inflate(TILE_WIDTH / 2, TILE_HEIGHT / 2)
    }

    // ── State machine ──

    /// Compute this tick's transition against `field`.
    pub fn plan(&self, field: &Field, input: &FrameInput) -> Transition {
        let mut next = *self;
        let mut wall_turn = false;
        let mut tap_reversed = false;

        if self.at_goal {
            return next.transition_from(self, false, false);
        }

        next.resolve_vertical(field);

        if next.motion != Motion::Falling {
            if field.touches_goal(next.confliction_box(), next.facing.direction())
                || field.touches_goal(next.foot_probe(), Direction::Down)
            {
                next.at_goal = true;
                return next.transition_from(self, false, false);
            }

            if next.motion != Motion::Climbing {
                let dir = next.facing.direction();
                let (dx, _) = dir.delta();
                if field.conflicts(next.confliction_box().translate(dx, 0), dir) {
                    next.facing = next.facing.reversed();
                    wall_turn = true;
                } else {
                    next.x += Fixed(STEP.raw() * dx);
                }
            }

            if let Some(tap) = input.tap() {
                if tap.is_in(next.clickable_area()) {
                    next.facing = next.facing.reversed();
                    tap_reversed = true;
                }
            }
        }

        next.transition_from(self, wall_turn, tap_reversed)
    }

    /// Steps 1-4: climb start, climb continue, fall, grounded.
    fn resolve_vertical(&mut self, field: &Field) {
        if self.motion != Motion::Falling
            && field.touches_elevator(self.elevator_probe(), self.facing.direction())
        {
            self.y -= STEP;
            self.motion = Motion::Climbing;
        } else if self.motion == Motion::Climbing && field.in_elevator(self.confliction_box()) {
            self.y -= STEP;
        } else if !field.conflicts(self.foot_probe(), Direction::Down) {
            if self.motion != Motion::Falling {
                self.x += Fixed::from_px(LEDGE_NUDGE_PX * self.facing.sign());
                self.motion = Motion::Falling;
            }
            for _ in 0..FALL_STEPS {
                if field.conflicts(self.foot_probe(), Direction::Down) {
                    break;
                }
                self.y += STEP;
            }
        } else {
            self.motion = Motion::Walking;
        }
    }

    fn transition_from(&self, prev: &Player, wall_turn: bool, tap_reversed: bool) -> Transition {
        Transition {
            motion: self.motion,
            dx: self.x - prev.x,
            dy: self.y - prev.y,
            facing: self.facing,
            reached_goal: self.at_goal && !prev.at_goal,
            wall_turn,
            tap_reversed,
        }
    }

    /// Apply a planned transition.
    pub fn apply(&mut self, t: &Transition, events: &mut Vec<GameEvent>) {
        let prev = self.motion;
        self.x += t.dx;
        self.y += t.dy;
        self.motion = t.motion;

        match (prev, t.motion) {
            (Motion::Falling, Motion::Falling) => {}
            (_, Motion::Falling) => {
                log::debug!("fall start at {:?}", self.pixel_pos());
                events.push(GameEvent::FallStarted);
            }
            (Motion::Falling, _) => {
                log::debug!("landed at {:?}", self.pixel_pos());
                events.push(GameEvent::Landed);
            }
            _ => {}
        }
        if prev != Motion::Climbing && t.motion == Motion::Climbing {
            log::debug!("climb start at {:?}", self.pixel_pos());
            events.push(GameEvent::ClimbStarted);
        }

        if t.wall_turn {
            // Facing just after the wall turn; a tap may flip it back below.
            let turned = self.facing.reversed();
            log::debug!("turned {:?} at {:?}", turned, self.pixel_pos());
            events.push(GameEvent::Turned { facing: turned });
        }
        if t.tap_reversed {
            log::debug!("tap reversed to {:?}", t.facing);
            events.push(GameEvent::TapReversed { facing: t.facing });
        }
        self.facing = t.facing;

        if t.reached_goal {
            self.at_goal = true;
            log::info!("goal reached at {:?}", self.pixel_pos());
            events.push(GameEvent::GoalReached);
        }
    }

    /// Plan and apply one tick.
    pub fn update(&mut self, field: &Field, input: &FrameInput, events: &mut Vec<GameEvent>) {
        let t = self.plan(field, input);
        self.apply(&t, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geom::overlaps;
    use crate::domain::object::Object;
    use crate::sim::level::field_from_rows;

    fn field(rows: &[&str]) -> Field {
        field_from_rows(rows).expect("test level should load")
    }

    fn tick(p: &mut Player, f: &Field) -> Vec<GameEvent> {
        let mut events = vec![];
        p.update(f, &FrameInput::idle(), &mut events);
        events
    }

    fn tick_until(p: &mut Player, f: &Field, limit: usize, cond: impl Fn(&Player) -> bool) {
        for _ in 0..limit {
            if cond(p) {
                return;
            }
            tick(p, f);
        }
        assert!(cond(p), "condition not reached within {limit} ticks: {p:?}");
    }

    // ── Probes ──

    #[test]
    fn probe_geometry_follows_facing() {
        let p = Player::new((2, 1)); // (32,16)
        assert_eq!(p.confliction_box(), Rect::from_size(32, 16, 16, 16));
        assert_eq!(p.foot_probe(), Rect::from_size(40, 32, 8, 1));
        assert_eq!(p.elevator_probe(), Rect::from_size(35, 16, 1, 16));
        assert_eq!(p.clickable_area(), Rect::from_size(24, 8, 32, 32));

        let p = p.with_facing(Facing::Left);
        assert_eq!(p.foot_probe(), Rect::from_size(32, 32, 8, 1));
        assert_eq!(p.elevator_probe(), Rect::from_size(44, 16, 1, 16));
    }

    #[test]
    fn start_position_is_scaled_cell() {
        let p = Player::new((3, 2));
        assert_eq!(p.x32(), 3 * 16 * 32);
        assert_eq!(p.y32(), 2 * 16 * 32);
        assert_eq!(p.pixel_pos(), (48, 32));
    }

    // ── Walking / turning ──

    #[test]
    fn walks_one_pixel_per_tick() {
        let f = field(&["  s   ", "wwwwww"]);
        let mut p = Player::new(f.start());
        tick(&mut p, &f);
        assert_eq!(p.pixel_pos(), (33, 0));
        assert_eq!(p.motion(), Motion::Walking);
    }

    #[test]
    fn turns_at_wall_without_moving() {
        let f = field(&["w s w", "wwwww"]);
        let mut p = Player::new(f.start());
        for _ in 0..16 {
            tick(&mut p, &f);
        }
        assert_eq!(p.pixel_pos(), (48, 0));
        assert_eq!(p.facing(), Facing::Right);

        let events = tick(&mut p, &f);
        assert_eq!(p.pixel_pos(), (48, 0));
        assert_eq!(p.facing(), Facing::Left);
        assert!(matches!(events[..], [GameEvent::Turned { facing: Facing::Left }]));

        tick(&mut p, &f);
        assert_eq!(p.pixel_pos(), (47, 0));
    }

    #[test]
    fn active_force_field_turns_walker() {
        let mut f = field(&["s  f", "wwww"]);
        let mut events = vec![];
        f.update(&FrameInput::tap_at(50, 4), &mut events);
        let mut p = Player::new(f.start());
        tick_until(&mut p, &f, 100, |p| p.facing() == Facing::Left);
        assert_eq!(p.pixel_pos(), (32, 0));
    }

    #[test]
    fn inactive_force_field_is_walked_through() {
        let f = field(&["s  f  ", "wwwwww"]);
        let mut p = Player::new(f.start());
        for _ in 0..60 {
            tick(&mut p, &f);
        }
        assert_eq!(p.facing(), Facing::Right);
        assert_eq!(p.pixel_pos(), (60, 0));
    }

    // ── Falling ──

    #[test]
    fn ledge_nudge_then_capped_fall_then_landing() {
        let f = field(&["s   ", "w   ", "    ", "    ", "    ", "wwww"]);
        let mut p = Player::new(f.start());

        // Right foot leaves the ledge when x reaches 8.
        tick_until(&mut p, &f, 20, |p| p.is_falling());
        assert_eq!(p.pixel_pos(), (16, 3));

        let mut last_y = p.y32();
        let mut landed = false;
        for _ in 0..40 {
            let events = tick(&mut p, &f);
            assert!(p.y32() - last_y <= FALL_STEPS * 32);
            last_y = p.y32();
            if events.iter().any(|e| matches!(e, GameEvent::Landed)) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(p.motion(), Motion::Walking);
        // Box bottom rests on the floor's top row (y = 80).
        assert_eq!(p.pixel_pos().1, 64);
    }

    #[test]
    fn falling_walker_ignores_taps_and_does_not_turn() {
        let f = Field::new(vec![], (0, 0));
        let mut p = Player::new((0, 0));
        let mut events = vec![];
        p.update(&f, &FrameInput::idle(), &mut events);
        assert!(p.is_falling());
        let (x, y) = p.pixel_pos();
        p.update(&f, &FrameInput::tap_at(x + 8, y + 8), &mut events);
        assert_eq!(p.facing(), Facing::Right);
        assert_eq!(p.pixel_pos(), (x, y + FALL_STEPS));
    }

    #[test]
    fn fall_stops_short_on_thin_floor() {
        // Floor top row at y=16; walker box bottom at 14 after placement.
        let f = Field::new(vec![Object::wall(0, 1, false), Object::wall(1, 1, false)], (0, 0));
        let mut p = Player::new((0, 0));
        p.y = Fixed::from_px(-2);
        p.motion = Motion::Falling;
        tick(&mut p, &f);
        assert_eq!(p.pixel_pos().1, 0);
        assert!(p.is_falling());
        tick(&mut p, &f);
        assert_eq!(p.motion(), Motion::Walking);
    }

    #[test]
    fn walker_stays_inside_the_grid() {
        let f = field(&["s  ", "www"]);
        let mut p = Player::new(f.start());
        let mut turns = vec![];
        for _ in 0..500 {
            for e in tick(&mut p, &f) {
                if let GameEvent::Turned { facing } = e {
                    turns.push((facing, p.pixel_pos().0));
                }
            }
            assert!(!p.is_falling(), "walked off the grid: {p:?}");
            assert!((0..=32).contains(&p.pixel_pos().0));
        }
        assert_eq!(turns[0], (Facing::Left, 32));
        assert_eq!(turns[1], (Facing::Right, 0));
    }

    #[test]
    fn grid_bottom_holds_a_walker_up() {
        let f = field(&["s  ", "   "]);
        let mut p = Player::new(f.start());
        for _ in 0..100 {
            tick(&mut p, &f);
        }
        assert_eq!(p.motion(), Motion::Walking);
        assert_eq!(p.pixel_pos().1, 16);
    }

    // ── Elevators ──

    #[test]
    fn climbs_shaft_and_steps_off_top() {
        let f = field(&["      ", "  e   ", "s e   ", "wwwwww"]);
        let mut p = Player::new(f.start());

        tick_until(&mut p, &f, 60, |p| p.is_climbing());
        assert_eq!(p.pixel_pos(), (29, 31));

        tick_until(&mut p, &f, 60, |p| !p.is_climbing());
        assert_eq!(p.motion(), Motion::Walking);
        assert_eq!(p.pixel_pos(), (30, 0));
    }

    #[test]
    fn standing_on_elevator_top_is_supported() {
        let f = field(&["s  ", "e  "]);
        let mut p = Player::new(f.start());
        let events = tick(&mut p, &f);
        assert!(events.is_empty());
        assert_eq!(p.motion(), Motion::Walking);
    }

    #[test]
    fn walks_into_shaft_from_the_left_facing_left() {
        let f = field(&[" e   ", " e s ", "wwwww"]);
        let mut p = Player::new(f.start()).with_facing(Facing::Left);
        tick_until(&mut p, &f, 60, |p| p.is_climbing());
        // Elevator edge column x=31 meets the probe at x + 12.
        assert_eq!(p.pixel_pos().0, 19);
    }

    #[test]
    fn climbing_without_shaft_or_floor_starts_falling() {
        let f = Field::new(vec![Object::wall(0, 4, false), Object::wall(1, 4, false)], (0, 0));
        let mut p = Player::new((0, 0));
        p.motion = Motion::Climbing;

        let events = tick(&mut p, &f);
        assert_eq!(events, vec![GameEvent::FallStarted]);
        assert_eq!(p.motion(), Motion::Falling);
        assert_eq!(p.pixel_pos(), (LEDGE_NUDGE_PX, FALL_STEPS));
    }

    // ── Goal ──

    #[test]
    fn goal_is_terminal() {
        let f = field(&["s  g", "wwww"]);
        let mut p = Player::new(f.start());
        let mut reached = 0;
        for _ in 0..80 {
            let events = tick(&mut p, &f);
            reached += events.iter().filter(|e| matches!(e, GameEvent::GoalReached)).count();
            if p.at_goal() {
                break;
            }
        }
        assert!(p.at_goal());
        assert_eq!(p.pixel_pos(), (33, 0));

        let frozen = p;
        for _ in 0..30 {
            reached += tick(&mut p, &f).len();
        }
        assert_eq!(p, frozen);
        assert_eq!(reached, 1);
    }

    #[test]
    fn landing_on_a_goal_reaches_it() {
        let f = field(&["s   ", "w   ", "    ", " g  ", "    ", "wwww"]);
        let mut p = Player::new(f.start());
        let mut events = vec![];
        for _ in 0..100 {
            events.extend(tick(&mut p, &f));
            if p.at_goal() {
                break;
            }
        }
        assert!(p.at_goal(), "fell past the goal: {p:?}");
        // Box bottom rests on the goal's top row (y = 48).
        assert_eq!(p.pixel_pos(), (16, 32));
        assert!(events.contains(&GameEvent::Landed));
        assert_eq!(events.last(), Some(&GameEvent::GoalReached));
    }

    // ── Tap to reverse ──

    #[test]
    fn tap_on_walker_reverses() {
        let f = field(&["  s   ", "wwwwww"]);
        let mut p = Player::new(f.start());
        let mut events = vec![];
        p.update(&f, &FrameInput::tap_at(41, 8), &mut events);
        assert_eq!(p.facing(), Facing::Left);
        assert!(matches!(events[..], [GameEvent::TapReversed { facing: Facing::Left }]));
    }

    #[test]
    fn tap_on_padding_counts_but_outside_does_not() {
        let f = field(&["  s   ", "wwwwww"]);
        let mut p = Player::new(f.start());
        let mut events = vec![];
        // After the step, x = 33; hit-box spans 25..57 x -8..24.
        p.update(&f, &FrameInput::tap_at(25, -8), &mut events);
        assert_eq!(p.facing(), Facing::Left);

        let mut q = Player::new(f.start());
        q.update(&f, &FrameInput::tap_at(57, 0), &mut events);
        assert_eq!(q.facing(), Facing::Right);
    }

    #[test]
    fn hover_without_tap_does_nothing() {
        let f = field(&["  s   ", "wwwwww"]);
        let mut p = Player::new(f.start());
        let mut events = vec![];
        p.update(&f, &FrameInput::tap_at(40, 8).without_tap(), &mut events);
        assert_eq!(p.facing(), Facing::Right);
    }

    #[test]
    fn plan_is_pure() {
        let f = field(&["  s   ", "wwwwww"]);
        let p = Player::new(f.start());
        let t = p.plan(&f, &FrameInput::idle());
        assert_eq!(p, Player::new(f.start()));
        assert_eq!(t.dx, Fixed::from_px(1));
        assert_eq!(t.dy, Fixed::ZERO);
        assert_eq!(t.motion, Motion::Walking);
    }

    // ── Property tests ──

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fall_never_exceeds_three_pixels(
                start_i in -10i32..10,
                start_j in -10i32..10,
                depth in 1i32..30,
                facing_left in any::<bool>(),
            ) {
                let floor: Vec<Object> = (start_i - 4..start_i + 5)
                    .map(|i| Object::wall(i, start_j + depth, false))
                    .collect();
                let f = Field::new(floor, (start_i, start_j));
                let facing = if facing_left { Facing::Left } else { Facing::Right };
                let mut p = Player::new(f.start()).with_facing(facing);
                for _ in 0..400 {
                    let before = p;
                    tick(&mut p, &f);
                    let dy = p.y32() - before.y32();
                    prop_assert!(dy <= FALL_STEPS * 32);
                    if before.is_falling() || p.is_falling() {
                        prop_assert!(dy >= 0);
                    }
                }
            }

            #[test]
            fn corridor_walker_never_enters_a_wall(width in 1usize..10, ticks in 0usize..600) {
                let inner = " ".repeat(width);
                let mid = format!("w{}sw", inner);
                let floor = "w".repeat(width + 3);
                let f = field(&[mid.as_str(), floor.as_str()]);
                let mut p = Player::new(f.start());
                for _ in 0..ticks {
                    tick(&mut p, &f);
                    prop_assert!(!p.is_falling());
                    for o in f.objects() {
                        prop_assert!(!overlaps(o.area(), p.confliction_box()));
                    }
                }
            }
        }
    }
}
