// =============================================================================
// GEOMETRY.RS — Integer rectangles and grid neighbourhoods
//
// Shared by the tile-map modules:
// - Pixel-space viewports and map bounds
// - Cell-space ranges (draw extents, autotile regions)
// - The fixed 8-neighbour order used by autotile bitsets
// =============================================================================

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Half-open axis-aligned rectangle `[min, max)` on an integer grid.
///
/// Used both for pixel rectangles (viewports, map bounds) and for cell
/// ranges. A rectangle whose width or height is zero or negative is empty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    /// Canonical rectangle spanning `(x0, y0) -- (x1, y1)`; corners are
    /// swapped as needed so that `min <= max` on both axes.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: IVec2::new(x0.min(x1), y0.min(y1)),
            max: IVec2::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Rectangle of the given size anchored at the origin.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        self.max - self.min
    }

    /// True when the rectangle covers no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// The rectangle moved by `delta`.
    pub fn translate(&self, delta: IVec2) -> Self {
        Self { min: self.min + delta, max: self.max + delta }
    }

    /// Both corners multiplied by `k` (cell rectangle → pixel rectangle).
    pub fn scale(&self, k: i32) -> Self {
        Self { min: self.min * k, max: self.max * k }
    }

    /// Overlap of two rectangles. Disjoint inputs produce an empty rectangle
    /// with `min == max`.
    pub fn intersect(&self, other: &Rect) -> Self {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max).max(min);
        Self { min, max }
    }

    /// Move this rectangle so it lies inside `bounds` without resizing it.
    ///
    /// Only when the rectangle is larger than `bounds` along an axis is its
    /// extent on that axis shrunk to the bounds' extent.
    pub fn clamp_within(&self, bounds: &Rect) -> Self {
        let bounds_size = bounds.size().max(IVec2::ZERO);
        let size = IVec2::new(
            self.width().clamp(0, bounds_size.x),
            self.height().clamp(0, bounds_size.y),
        );
        let min = IVec2::new(
            self.min.x.clamp(bounds.min.x, bounds.min.x + bounds_size.x - size.x),
            self.min.y.clamp(bounds.min.y, bounds.min.y + bounds_size.y - size.y),
        );
        Self { min, max: min + size }
    }
}

// =============================================================================
// NEIGHBOURHOOD
// =============================================================================

/// The 8 neighbours of a cell as `(dx, dy)` offsets, y pointing down.
///
/// Index `i` is bit `i` of an autotile bitset. The order is NE, SE, SW, NW,
/// N, E, S, W and the published autotile tables are indexed by it; do not
/// reorder without regenerating them.
pub const NEIGHBOUR_OFFSETS: [IVec2; 8] = [
    IVec2::new(1, -1),  // NE
    IVec2::new(1, 1),   // SE
    IVec2::new(-1, 1),  // SW
    IVec2::new(-1, -1), // NW
    IVec2::new(0, -1),  // N
    IVec2::new(1, 0),   // E
    IVec2::new(0, 1),   // S
    IVec2::new(-1, 0),  // W
];
