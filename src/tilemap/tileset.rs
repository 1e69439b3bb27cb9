use super::autotile::AutoTiler;
use super::coord::Coordinate;
use super::metrics::Metrics;
use super::TileId;
use crate::color::Color;
use crate::geometry::Rect;
use crate::renderer::atlas::{TextureId, TextureRegion};

/// Autotile support of a tile: the first tile of its variant run and the
/// table that picks a variant from a neighbour bitset.
#[derive(Copy, Clone)]
pub struct AutoTileRef<'a> {
    pub base: TileId,
    pub tiler: &'a dyn AutoTiler,
}

/// Images sharing one texture, addressed by [`TileId`].
pub trait TileSet {
    /// Texture all regions of this set live in.
    fn texture(&self) -> TextureId;

    /// Sub-rectangle of the texture holding tile `id`.
    fn texture_region(&self, id: TileId) -> TextureRegion;

    /// Whether two tiles resolve from the same base tile. Every autotile
    /// variant of a run shares its base; other tiles are only the same as
    /// themselves.
    fn same_base_tile(&self, a: TileId, b: TileId) -> bool;

    /// `Some` when `id` belongs to an autotile run.
    fn is_auto_tile(&self, id: TileId) -> Option<AutoTileRef<'_>>;
}

/// A two-dimensional grid of tiles backed by a [`TileSet`].
///
/// Cells are addressed by the cell part of a [`Coordinate`]; fractions are
/// ignored.
pub trait TileMap {
    fn metrics(&self) -> &Metrics;

    /// Tile at `cell`, or [`super::ABSENT`] when the cell is empty or lies
    /// outside the map.
    fn tile_at(&self, cell: Coordinate) -> TileId;

    /// Replace the tile at `cell`. Implementations panic when `cell` is
    /// outside the map.
    fn set_tile_at(&mut self, cell: Coordinate, id: TileId);

    fn tint_color_at(&self, cell: Coordinate) -> Color;

    fn tile_set(&self) -> &dyn TileSet;

    /// Visible area of the map in pixels.
    fn bounds(&self) -> Rect {
        self.metrics().bounds()
    }

    /// Pixel size of one cell.
    fn cell_size(&self) -> i32 {
        self.metrics().cell_size()
    }
}
