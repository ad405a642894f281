/// Level cell codes as authored in text grids.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Part,      // Covered by a neighbouring big object
    WallSmall,
    WallBig,   // 2x2, anchored top-left
    FFSmall,   // Force field, off at load
    FFBig,
    Elevator,
    Goal,
    Start,
}

impl Tile {
    pub fn from_char(c: char) -> Tile {
        match c {
            'w' => Tile::WallSmall,
            'W' => Tile::WallBig,
            'f' => Tile::FFSmall,
            'F' => Tile::FFBig,
            'e' => Tile::Elevator,
            'g' => Tile::Goal,
            's' => Tile::Start,
            '.' => Tile::Part,
            _ => Tile::Empty,
        }
    }

    /// Does this cell anchor a 2x2 footprint?
    pub fn is_big(self) -> bool {
        matches!(self, Tile::WallBig | Tile::FFBig)
    }
}
