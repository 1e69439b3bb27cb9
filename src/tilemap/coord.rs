// ── Fixed-point grid coordinates ──────────────────────────────────────────────
//
// A `Coordinate` packs two axes into one `u64`:
//
// ```text
//  63        48 47        32 31        16 15         0
// ┌────────────┬────────────┬────────────┬────────────┐
// │  row cell  │  row frac  │  col cell  │  col frac  │
// └────────────┴────────────┴────────────┴────────────┘
// ```
//
// Each 32-bit half is a `Lepton`: cell index in the upper 16 bits, sub-cell
// fraction in the lower 16. Arithmetic wraps per axis, so a step of "-1 cell"
// is just `0xFFFF_0000` on that axis.

use std::fmt;
use std::ops::{Add, Sub};

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Lepton units in one cell.
pub const LEPTONS_PER_CELL: u32 = 0x1_0000;
/// Lepton units in half a cell; the fraction of a centred coordinate.
pub const HALF_CELL: u32 = 0x8000;

const FRAC_MASK: u32 = 0xFFFF;

// ── Lepton ────────────────────────────────────────────────────────────────────

/// A position along one axis measured in 1/65536ths of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lepton(pub u32);

impl Lepton {
    /// Lepton at the start of cell `cell` (masked to 16 bits).
    #[inline]
    pub const fn from_cell(cell: u32) -> Self {
        Self((cell & FRAC_MASK) << 16)
    }

    #[inline]
    pub const fn cell(self) -> u32 {
        self.0 >> 16
    }

    #[inline]
    pub const fn fraction(self) -> u32 {
        self.0 & FRAC_MASK
    }
}

impl Add for Lepton {
    type Output = Lepton;

    fn add(self, rhs: Lepton) -> Lepton {
        Lepton(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Lepton {
    type Output = Lepton;

    fn sub(self, rhs: Lepton) -> Lepton {
        Lepton(self.0.wrapping_sub(rhs.0))
    }
}

impl fmt::Display for Lepton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}.{:04X}", self.cell(), self.fraction())
    }
}

// ── Coordinate ────────────────────────────────────────────────────────────────

/// Pixel-independent position on the map: a cell plus a sub-cell offset.
///
/// The coordinate carries no pixel size; convert with [`CellFormat`] or
/// `Metrics`. Maps of up to 65536 × 65536 cells are addressable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate(pub u64);

impl Coordinate {
    //                                              Y           X
    pub const NORTH_EAST: Self = Self(0xFFFF_0000_0001_0000); // (-1, +1)
    pub const SOUTH_EAST: Self = Self(0x0001_0000_0001_0000); // (+1, +1)
    pub const SOUTH_WEST: Self = Self(0x0001_0000_FFFF_0000); // (+1, -1)
    pub const NORTH_WEST: Self = Self(0xFFFF_0000_FFFF_0000); // (-1, -1)
    pub const NORTH: Self = Self(0xFFFF_0000_0000_0000); //      (-1,  0)
    pub const EAST: Self = Self(0x0000_0000_0001_0000); //       ( 0, +1)
    pub const SOUTH: Self = Self(0x0001_0000_0000_0000); //      (+1,  0)
    pub const WEST: Self = Self(0x0000_0000_FFFF_0000); //       ( 0, -1)

    const CELL_MASK: u64 = 0xFFFF_0000_FFFF_0000;
    const SUB_CELL_MASK: u64 = 0x0000_FFFF_0000_FFFF;
    const CENTER: u64 = 0x0000_8000_0000_8000;

    /// Pack two leptons.
    #[inline]
    pub const fn new(x: Lepton, y: Lepton) -> Self {
        Self(x.0 as u64 | (y.0 as u64) << 32)
    }

    /// Top-left corner of cell `(cx, cy)`. Indices are masked to 16 bits.
    #[inline]
    pub const fn from_cell(cx: u32, cy: u32) -> Self {
        Self::new(Lepton::from_cell(cx), Lepton::from_cell(cy))
    }

    /// The two axes as leptons.
    #[inline]
    pub const fn xy(self) -> (Lepton, Lepton) {
        (Lepton(self.0 as u32), Lepton((self.0 >> 32) as u32))
    }

    /// Index of the referenced cell; fractions are discarded.
    #[inline]
    pub const fn cell_xy(self) -> (u32, u32) {
        let (x, y) = self.xy();
        (x.cell(), y.cell())
    }

    /// This coordinate with the sub-cell position zeroed out.
    #[inline]
    pub const fn cell(self) -> Self {
        Self(self.0 & Self::CELL_MASK)
    }

    /// This coordinate with the cell position zeroed out.
    #[inline]
    pub const fn sub_cell(self) -> Self {
        Self(self.0 & Self::SUB_CELL_MASK)
    }

    /// The centre point of the referenced cell.
    #[inline]
    pub const fn centered(self) -> Self {
        Self(self.cell().0 | Self::CENTER)
    }

    /// Per-axis wrapping addition. Overflow on x never carries into y.
    #[inline]
    pub fn offset(self, other: Coordinate) -> Self {
        let (x0, y0) = self.xy();
        let (x1, y1) = other.xy();
        Self::new(x0 + x1, y0 + y1)
    }

    /// Vector from `self` to `other` in cells. Each axis is the wrapped
    /// signed difference, so it agrees with [`Coordinate::offset`].
    pub fn distance_vector(self, other: Coordinate) -> Vec2 {
        let (x0, y0) = self.xy();
        let (x1, y1) = other.xy();
        let scale = LEPTONS_PER_CELL as f32;
        let dx = x1.0.wrapping_sub(x0.0) as i32;
        let dy = y1.0.wrapping_sub(y0.0) as i32;
        Vec2::new(dx as f32 / scale, dy as f32 / scale)
    }

    /// Straight-line distance to `other` in leptons.
    pub fn distance(self, other: Coordinate) -> Lepton {
        let len = self.distance_vector(other).length();
        Lepton((len * LEPTONS_PER_CELL as f32).round() as u32)
    }

    /// Advance `step` leptons toward `target`. Lands exactly on `target` once
    /// it is within one step.
    pub fn move_toward(self, target: Coordinate, step: Lepton) -> Self {
        if self.distance(target) <= step {
            return target;
        }
        let v = self.distance_vector(target).normalize_or_zero() * step.0 as f32;
        // Signed deltas wrap into the unsigned lepton space.
        let dx = Lepton(v.x.round() as i32 as u32);
        let dy = Lepton(v.y.round() as i32 as u32);
        self.offset(Self::new(dx, dy))
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        self.offset(rhs)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        let (x0, y0) = self.xy();
        let (x1, y1) = rhs.xy();
        Self::new(x0 - x1, y0 - y1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.xy();
        write!(f, "({x},{y})")
    }
}

// ── CellFormat ────────────────────────────────────────────────────────────────

/// Size of a (square) cell in pixels. Converts between pixels and leptons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CellFormat(u32);

impl CellFormat {
    /// Panics if `pixels` is zero.
    pub const fn new(pixels: u32) -> Self {
        assert!(pixels > 0, "cell size must be at least one pixel");
        Self(pixels)
    }

    #[inline]
    pub const fn pixels(self) -> u32 {
        self.0
    }

    /// `round(p * 0x10000 / s)`; negative pixels wrap like a negative offset.
    pub fn pixel_to_lepton(self, p: i32) -> Lepton {
        let s = self.0 as i64;
        let l = (p as i64 * LEPTONS_PER_CELL as i64 + s / 2).div_euclid(s);
        Lepton(l as u32)
    }

    /// `round(l * s / 0x10000)`.
    pub fn lepton_to_pixel(self, l: Lepton) -> i32 {
        ((l.0 as i64 * self.0 as i64 + HALF_CELL as i64) / LEPTONS_PER_CELL as i64) as i32
    }

    pub fn pixel_to_coordinate(self, pixel: IVec2) -> Coordinate {
        Coordinate::new(self.pixel_to_lepton(pixel.x), self.pixel_to_lepton(pixel.y))
    }

    pub fn coordinate_to_pixel(self, c: Coordinate) -> IVec2 {
        let (x, y) = c.xy();
        IVec2::new(self.lepton_to_pixel(x), self.lepton_to_pixel(y))
    }
}

impl TryFrom<u32> for CellFormat {
    type Error = String;

    fn try_from(pixels: u32) -> Result<Self, Self::Error> {
        if pixels == 0 {
            return Err("cell size must be at least one pixel".into());
        }
        Ok(Self(pixels))
    }
}

impl From<CellFormat> for u32 {
    fn from(f: CellFormat) -> u32 {
        f.0
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
