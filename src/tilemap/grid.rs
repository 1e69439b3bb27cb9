use serde::{Deserialize, Serialize};

use super::autotile::{AutoTiler, BLOB_TILER, EDGE_TILER};
use super::coord::Coordinate;
use super::metrics::Metrics;
use super::tileset::{AutoTileRef, TileMap, TileSet};
use super::{ABSENT, TileId};
use crate::color::Color;
use crate::renderer::atlas::{AtlasGrid, TextureId, TextureRegion};

// ── AutoTileKind ──────────────────────────────────────────────────────────────

/// Which built-in table resolves an autotile run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoTileKind {
    /// 47 variants: edges plus inner and outer corners.
    Blob,
    /// 16 variants: cardinal edges only.
    Edge,
}

impl AutoTileKind {
    pub fn tiler(self) -> &'static dyn AutoTiler {
        match self {
            AutoTileKind::Blob => &BLOB_TILER,
            AutoTileKind::Edge => &EDGE_TILER,
        }
    }
}

/// A run of autotile variants `base .. base + variants` in the atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoTileGroup {
    pub base: TileId,
    pub kind: AutoTileKind,
}

impl AutoTileGroup {
    /// One past the last variant id.
    pub fn end(&self) -> TileId {
        self.base.saturating_add(self.kind.tiler().variants())
    }

    pub fn contains(&self, id: TileId) -> bool {
        (self.base..self.end()).contains(&id)
    }
}

// ── GridTileSet ───────────────────────────────────────────────────────────────

/// Tile set over a uniform grid atlas. Tile ids are atlas indices.
#[derive(Clone, Debug)]
pub struct GridTileSet {
    atlas: AtlasGrid,
    groups: Vec<AutoTileGroup>,
}

impl GridTileSet {
    pub fn new(atlas: AtlasGrid) -> Self {
        Self { atlas, groups: Vec::new() }
    }

    /// Register an autotile run. Panics if it overlaps an existing run or
    /// extends past the atlas.
    pub fn with_auto_tile(mut self, group: AutoTileGroup) -> Self {
        assert!(
            group.end() <= self.atlas.len(),
            "autotile run {}..{} exceeds the {}-tile atlas",
            group.base,
            group.end(),
            self.atlas.len(),
        );
        assert!(
            self.groups.iter().all(|g| group.end() <= g.base || g.end() <= group.base),
            "autotile run {}..{} overlaps an existing run",
            group.base,
            group.end(),
        );
        self.groups.push(group);
        self
    }

    pub fn atlas(&self) -> &AtlasGrid {
        &self.atlas
    }

    pub fn groups(&self) -> &[AutoTileGroup] {
        &self.groups
    }

    fn group_of(&self, id: TileId) -> Option<&AutoTileGroup> {
        self.groups.iter().find(|g| g.contains(id))
    }
}

impl TileSet for GridTileSet {
    fn texture(&self) -> TextureId {
        self.atlas.texture
    }

    fn texture_region(&self, id: TileId) -> TextureRegion {
        self.atlas.region(id)
    }

    fn same_base_tile(&self, a: TileId, b: TileId) -> bool {
        match (self.group_of(a), self.group_of(b)) {
            (Some(ga), Some(gb)) => ga.base == gb.base,
            (None, None) => a == b,
            _ => false,
        }
    }

    fn is_auto_tile(&self, id: TileId) -> Option<AutoTileRef<'_>> {
        self.group_of(id).map(|g| AutoTileRef { base: g.base, tiler: g.kind.tiler() })
    }
}

// ── GridMap ───────────────────────────────────────────────────────────────────

/// Dense row-major tile map with a tint per cell.
#[derive(Clone, Debug)]
pub struct GridMap {
    metrics: Metrics,
    tiles: Vec<TileId>,
    tints: Vec<Color>,
    tile_set: GridTileSet,
}

impl GridMap {
    /// An empty map: every cell [`ABSENT`] and tinted white.
    pub fn new(metrics: Metrics, tile_set: GridTileSet) -> Self {
        let cells = metrics.cell_width as usize * metrics.cell_height as usize;
        Self {
            metrics,
            tiles: vec![ABSENT; cells],
            tints: vec![Color::WHITE; cells],
            tile_set,
        }
    }

    fn index(&self, cell: Coordinate) -> Option<usize> {
        let (x, y) = cell.cell_xy();
        self.metrics
            .contains_cell(x as i64, y as i64)
            .then(|| self.metrics.cell_index(cell))
    }

    fn index_or_panic(&self, cell: Coordinate) -> usize {
        match self.index(cell) {
            Some(i) => i,
            None => panic!(
                "cell {:?} outside the {}x{} map",
                cell.cell_xy(),
                self.metrics.cell_width,
                self.metrics.cell_height,
            ),
        }
    }

    /// Set the tint of one cell. Panics outside the map.
    pub fn set_tint_color_at(&mut self, cell: Coordinate, color: Color) {
        let i = self.index_or_panic(cell);
        self.tints[i] = color;
    }

    /// Fill every cell of the map with `id`.
    pub fn fill(&mut self, id: TileId) {
        self.tiles.fill(id);
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }
}

impl TileMap for GridMap {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn tile_at(&self, cell: Coordinate) -> TileId {
        self.index(cell).map_or(ABSENT, |i| self.tiles[i])
    }

    fn set_tile_at(&mut self, cell: Coordinate, id: TileId) {
        let i = self.index_or_panic(cell);
        self.tiles[i] = id;
    }

    fn tint_color_at(&self, cell: Coordinate) -> Color {
        self.index(cell).map_or(Color::WHITE, |i| self.tints[i])
    }

    fn tile_set(&self) -> &dyn TileSet {
        &self.tile_set
    }
}
