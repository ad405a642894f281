/// Fixed-point sub-pixel scalar.
///
/// One pixel is `SUBPIXELS` units. Conversion back to pixels uses floor
/// division so that negative coordinates round toward -inf and movement stays
/// bit-for-bit reproducible.

use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::geom::{TILE_HEIGHT, TILE_WIDTH};

pub const SUBPIXELS: i32 = 32;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);

    pub const fn from_px(px: i32) -> Self {
        Fixed(px * SUBPIXELS)
    }

    pub const fn from_tile_x(i: i32) -> Self {
        Fixed::from_px(i * TILE_WIDTH)
    }

    pub const fn from_tile_y(j: i32) -> Self {
        Fixed::from_px(j * TILE_HEIGHT)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub fn to_px(self) -> i32 {
        self.0.div_euclid(SUBPIXELS)
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}
