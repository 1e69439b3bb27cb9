//! Tile maps: fixed-point coordinates, viewport culling, autotiling and the
//! per-frame draw batch.
//!
//! A map is anything implementing [`TileMap`]; [`GridMap`] is the dense
//! in-memory implementation used by [`crate::config`].

pub mod autotile;
pub mod batch;
pub mod camera;
pub mod coord;
pub mod grid;
pub mod metrics;
pub mod tileset;

/// Index of a tile inside its [`TileSet`].
pub type TileId = u32;

/// Sentinel for "no tile here". Never drawn and never autotiled.
pub const ABSENT: TileId = u32::MAX;

pub use autotile::{AutoTiler, apply_auto_tile, erase_auto_tile, paint_auto_tile};
pub use batch::Batch;
pub use camera::Camera;
pub use coord::{CellFormat, Coordinate, Lepton};
pub use grid::{AutoTileGroup, AutoTileKind, GridMap, GridTileSet};
pub use metrics::{DrawExtents, Metrics};
pub use tileset::{AutoTileRef, TileMap, TileSet};
