// =============================================================================
// AUTOTILE.RS — Neighbour-driven tile variant selection
//
// A tile that supports autotiling occupies a run of variants starting at its
// base id. The variant is chosen from an 8-bit bitset in which bit `i` is set
// when neighbour `NEIGHBOUR_OFFSETS[i]` is an *edge*: absent, off the map, or
// not the same base tile. The variant offset is then a plain table lookup.
// =============================================================================

use glam::IVec2;

use super::coord::Coordinate;
use super::tileset::TileMap;
use super::{ABSENT, TileId};
use crate::geometry::{NEIGHBOUR_OFFSETS, Rect};

/// Bits of an autotile bitset, in table order.
pub mod neighbours {
    pub const NE: u8 = 1 << 0;
    pub const SE: u8 = 1 << 1;
    pub const SW: u8 = 1 << 2;
    pub const NW: u8 = 1 << 3;
    pub const N: u8 = 1 << 4;
    pub const E: u8 = 1 << 5;
    pub const S: u8 = 1 << 6;
    pub const W: u8 = 1 << 7;
}

/// Maps a neighbour bitset to a variant offset from the base tile.
pub trait AutoTiler {
    fn auto_tile(&self, bitset: u8) -> TileId;

    /// Number of distinct variants this tiler produces.
    fn variants(&self) -> u32;
}

/// An [`AutoTiler`] backed by a 256-entry table indexed by the bitset.
pub struct TableAutoTiler {
    table: [TileId; 256],
    variants: u32,
}

impl TableAutoTiler {
    pub const fn new(table: [TileId; 256], variants: u32) -> Self {
        Self { table, variants }
    }
}

impl AutoTiler for TableAutoTiler {
    #[inline]
    fn auto_tile(&self, bitset: u8) -> TileId {
        self.table[bitset as usize]
    }

    fn variants(&self) -> u32 {
        self.variants
    }
}

/// 47-variant "blob" tiler distinguishing edges, outer corners and inner
/// corners. `0x00` (surrounded) is variant 0, `0xFF` (isolated) is 0x2E.
pub static BLOB_TILER: TableAutoTiler = TableAutoTiler::new(BLOB_TABLE, 47);

/// 16-variant tiler that only looks at the four cardinal neighbours.
pub static EDGE_TILER: TableAutoTiler = TableAutoTiler::new(EDGE_TABLE, 16);

#[rustfmt::skip]
const BLOB_TABLE: [TileId; 256] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
    0x10, 0x10, 0x11, 0x11, 0x12, 0x12, 0x13, 0x13, 0x10, 0x10, 0x11, 0x11, 0x12, 0x12, 0x13, 0x13,
    0x14, 0x14, 0x14, 0x14, 0x15, 0x15, 0x15, 0x15, 0x16, 0x16, 0x16, 0x16, 0x17, 0x17, 0x17, 0x17,
    0x18, 0x18, 0x18, 0x18, 0x19, 0x19, 0x19, 0x19, 0x18, 0x18, 0x18, 0x18, 0x19, 0x19, 0x19, 0x19,
    0x1A, 0x1B, 0x1A, 0x1B, 0x1A, 0x1B, 0x1A, 0x1B, 0x1C, 0x1D, 0x1C, 0x1D, 0x1C, 0x1D, 0x1C, 0x1D,
    0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E,
    0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21, 0x21,
    0x22, 0x23, 0x24, 0x25, 0x22, 0x23, 0x24, 0x25, 0x22, 0x23, 0x24, 0x25, 0x22, 0x23, 0x24, 0x25,
    0x26, 0x26, 0x27, 0x27, 0x26, 0x26, 0x27, 0x27, 0x26, 0x26, 0x27, 0x27, 0x26, 0x26, 0x27, 0x27,
    0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28, 0x28,
    0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29, 0x29,
    0x2A, 0x2B, 0x2A, 0x2B, 0x2A, 0x2B, 0x2A, 0x2B, 0x2A, 0x2B, 0x2A, 0x2B, 0x2A, 0x2B, 0x2A, 0x2B,
    0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C, 0x2C,
    0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D, 0x2D,
    0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E, 0x2E,
];

// The cardinal bits are the high nibble, so the variant is `bitset >> 4`.
const EDGE_TABLE: [TileId; 256] = {
    let mut table = [0; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i >> 4) as TileId;
        i += 1;
    }
    table
};

/// Bitset for the cell at `center`. `is_edge` is asked about each of the 8
/// neighbours in table order.
pub fn compute_bitset(center: IVec2, mut is_edge: impl FnMut(IVec2) -> bool) -> u8 {
    let mut bitset = 0u8;
    for (bit, offset) in NEIGHBOUR_OFFSETS.iter().enumerate() {
        if is_edge(center + *offset) {
            bitset |= 1 << bit;
        }
    }
    bitset
}

/// Variant `map` should show at `(x, y)`, or `None` when the cell is empty or
/// its tile does not autotile.
fn resolve<M: TileMap + ?Sized>(map: &M, x: i32, y: i32) -> Option<TileId> {
    let metrics = map.metrics();
    let id = map.tile_at(Coordinate::from_cell(x as u32, y as u32));
    if id == ABSENT {
        return None;
    }
    let tile_set = map.tile_set();
    let auto = tile_set.is_auto_tile(id)?;

    let bitset = compute_bitset(IVec2::new(x, y), |n| {
        if !metrics.contains_cell(n.x as i64, n.y as i64) {
            return true;
        }
        let other = map.tile_at(Coordinate::from_cell(n.x as u32, n.y as u32));
        other == ABSENT || !tile_set.same_base_tile(id, other)
    });
    Some(auto.base + auto.tiler.auto_tile(bitset))
}

/// Resolve every autotile inside `cell_bounds` (clipped to the map) in place.
///
/// Only "same base tile or not" of the neighbours feeds the bitset, so the
/// pass is idempotent: running it again over a resolved region changes
/// nothing. Concurrent passes over overlapping regions must be serialized by
/// the caller.
pub fn apply_auto_tile<M: TileMap + ?Sized>(map: &mut M, cell_bounds: Rect) {
    let metrics = *map.metrics();
    let map_rect = Rect::from_size(metrics.cell_width as i32, metrics.cell_height as i32);
    let region = cell_bounds.intersect(&map_rect);

    let mut rewritten = 0usize;
    for y in region.min.y..region.max.y {
        for x in region.min.x..region.max.x {
            let Some(resolved) = resolve(map, x, y) else { continue };
            let cell = Coordinate::from_cell(x as u32, y as u32);
            if map.tile_at(cell) != resolved {
                map.set_tile_at(cell, resolved);
                rewritten += 1;
            }
        }
    }

    log::debug!("autotile: {region:?} resolved, {rewritten} tiles rewritten");
}

/// The 3×3 block around `(x, y)`.
fn neighbourhood(x: u32, y: u32) -> Rect {
    Rect::new(x as i32 - 1, y as i32 - 1, x as i32 + 2, y as i32 + 2)
}

/// Brush stroke: place `id` at `(x, y)` and re-resolve it and its neighbours.
pub fn paint_auto_tile<M: TileMap + ?Sized>(map: &mut M, x: u32, y: u32, id: TileId) {
    map.set_tile_at(Coordinate::from_cell(x, y), id);
    apply_auto_tile(map, neighbourhood(x, y));
}

/// Eraser stroke: clear `(x, y)` and re-resolve the neighbours that now border
/// an empty cell.
pub fn erase_auto_tile<M: TileMap + ?Sized>(map: &mut M, x: u32, y: u32) {
    map.set_tile_at(Coordinate::from_cell(x, y), ABSENT);
    apply_auto_tile(map, neighbourhood(x, y));
}
