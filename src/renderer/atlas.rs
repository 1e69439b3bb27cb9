use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque handle to a texture owned by the renderer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Normalised UV rectangle of one tile inside its texture.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TextureRegion {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

/// A texture cut into a uniform grid of equally sized tiles, numbered in
/// row-major order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasGrid {
    pub texture: TextureId,
    pub cols: u32,
    pub rows: u32,
    pub tile_w: u32,
    pub tile_h: u32,
}

impl AtlasGrid {
    pub fn new(texture: TextureId, cols: u32, rows: u32, tile_w: u32, tile_h: u32) -> Self {
        assert!(cols > 0 && rows > 0, "atlas grid must have at least one tile");
        assert!(tile_w > 0 && tile_h > 0, "atlas tiles must be at least one pixel");
        assert!(
            cols.checked_mul(rows).is_some()
                && cols.checked_mul(tile_w).is_some()
                && rows.checked_mul(tile_h).is_some(),
            "{cols}x{rows} atlas of {tile_w}x{tile_h} tiles overflows u32",
        );
        Self { texture, cols, rows, tile_w, tile_h }
    }

    /// Grid over a PNG image. Partial tiles at the right and bottom edges are
    /// ignored.
    pub fn from_png(texture: TextureId, png_bytes: &[u8], tile_w: u32, tile_h: u32) -> Result<Self> {
        if tile_w == 0 || tile_h == 0 {
            return Err(Error::InvalidConfig("atlas tiles must be at least one pixel".into()));
        }
        let img = image::load_from_memory(png_bytes)?;
        let cols = img.width() / tile_w;
        let rows = img.height() / tile_h;
        if cols == 0 || rows == 0 {
            return Err(Error::InvalidConfig(format!(
                "{}x{} image holds no {tile_w}x{tile_h} tile",
                img.width(),
                img.height(),
            )));
        }
        log::debug!(
            "atlas: {}x{} image, {cols}x{rows} tiles of {tile_w}x{tile_h}",
            img.width(),
            img.height(),
        );
        Ok(Self::new(texture, cols, rows, tile_w, tile_h))
    }

    /// Number of tiles in the grid.
    pub fn len(&self) -> u32 {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// UV rectangle of tile `index` (row-major). Panics if `index` is past the
    /// last tile.
    pub fn region(&self, index: u32) -> TextureRegion {
        assert!(index < self.len(), "tile {index} outside a {}-tile atlas", self.len());
        let col = index % self.cols;
        let row = index / self.cols;
        let (tile_w, tile_h) = (self.tile_w as u64, self.tile_h as u64);
        let total_w = (self.cols as u64 * tile_w) as f32;
        let total_h = (self.rows as u64 * tile_h) as f32;

        let u_min = (col as u64 * tile_w) as f32 / total_w;
        let v_min = (row as u64 * tile_h) as f32 / total_h;
        let u_max = ((col as u64 + 1) * tile_w) as f32 / total_w;
        let v_max = ((row as u64 + 1) * tile_h) as f32 / total_h;

        TextureRegion { uv_min: [u_min, v_min], uv_max: [u_max, v_max] }
    }
}
