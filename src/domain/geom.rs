/// Pixel-space geometry shared by the object model and the walker.
///
/// Rectangles are half-open: `[min_x, max_x) x [min_y, max_y)`. Two boxes
/// that merely share a border do not overlap.

pub const TILE_WIDTH: i32 = 16;
pub const TILE_HEIGHT: i32 = 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn is_in(self, rect: Rect) -> bool {
        rect.min_x <= self.x && self.x < rect.max_x
            && rect.min_y <= self.y && self.y < rect.max_y
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Build a rectangle from two corners, normalizing so that min <= max.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Rect {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    pub fn from_size(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect::new(x, y, x + w, y + h)
    }

    /// Pixel rectangle of a `w_tiles x h_tiles` footprint anchored at grid cell (i, j).
    pub fn from_tiles(i: i32, j: i32, w_tiles: i32, h_tiles: i32) -> Self {
        Rect::from_size(i * TILE_WIDTH, j * TILE_HEIGHT, w_tiles * TILE_WIDTH, h_tiles * TILE_HEIGHT)
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Is `other` entirely inside `self`? Empty rectangles are contained anywhere.
    pub fn contains(&self, other: Rect) -> bool {
        other.is_empty()
            || (self.min_x <= other.min_x
                && other.max_x <= self.max_x
                && self.min_y <= other.min_y
                && other.max_y <= self.max_y)
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Rect {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Grow by `px_x` on the left and right, `px_y` on the top and bottom.
    pub fn inflate(&self, px_x: i32, px_y: i32) -> Self {
        Rect::new(
            self.min_x - px_x,
            self.min_y - px_y,
            self.max_x + px_x,
            self.max_y + px_y,
        )
    }
}

/// Standard AABB intersection on half-open ranges. Empty rectangles never overlap.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.min_x < b.max_x && b.min_x < a.max_x && a.min_y < b.max_y && b.min_y < a.max_y
}

/// Movement direction, also used to select which face of an obstacle a
/// mover meets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step in pixel space (y grows downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// The 1-pixel slice of `rect` that a mover travelling in `dir` bumps into.
///
/// ```text
///   Left  -> rightmost column     Right -> leftmost column
///   Up    -> bottom row           Down  -> top row
/// ```
///
/// `Down` yields the top row, not the bottom one: a mover coming down lands
/// on the obstacle's upper face. The walker's foot probe sits one pixel
/// below its body, so it meets exactly this row when standing on something.
pub fn edge(rect: Rect, dir: Direction) -> Rect {
    match dir {
        Direction::Left => Rect { min_x: rect.max_x - 1, ..rect },
        Direction::Right => Rect { max_x: rect.min_x + 1, ..rect },
        Direction::Up => Rect { min_y: rect.max_y - 1, ..rect },
        Direction::Down => Rect { max_y: rect.min_y + 1, ..rect },
    }
}

/// Walker facing. Only horizontal facings exist, so every facing maps to
/// a valid `Direction`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn reversed(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Facing::Left => Direction::Left,
            Facing::Right => Direction::Right,
        }
    }

    /// -1 for Left, +1 for Right.
    pub fn sign(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }
}
