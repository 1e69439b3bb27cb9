// ── Map configuration ─────────────────────────────────────────────────────────
//
// A map is described by a small JSON document:
//
// ```json
// {
//   "cell_size": 16,
//   "width": 64, "height": 48,
//   "visible": { "min": [0, 0], "max": [40, 30] },
//   "tile_set": {
//     "columns": 16, "rows": 8, "tile_width": 16, "tile_height": 16,
//     "autotiles": [ { "base": 0, "kind": "blob" } ]
//   }
// }
// ```
//
// Parsing only checks shape; `validate` checks every cross-field constraint so
// that building the map afterwards cannot panic.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::renderer::atlas::{AtlasGrid, TextureId};
use crate::tilemap::metrics::MAX_CELLS;
use crate::tilemap::{AutoTileGroup, CellFormat, GridMap, GridTileSet, Metrics};

/// Atlas layout and autotile runs of a [`GridTileSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileSetConfig {
    pub columns: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    #[serde(default)]
    pub autotiles: Vec<AutoTileGroup>,
}

/// Everything needed to build an empty [`GridMap`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    /// Pixel size of one square cell.
    pub cell_size: u32,
    /// Map width in cells.
    pub width: u32,
    /// Map height in cells.
    pub height: u32,
    /// Visible cell area; the whole map when omitted.
    #[serde(default)]
    pub visible: Option<Rect>,
    pub tile_set: TileSetConfig,
}

impl MapConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "map config: {}x{} cells of {}px, {} autotile runs",
            config.width,
            config.height,
            config.cell_size,
            config.tile_set.autotiles.len(),
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(invalid("cell_size must be at least 1"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!("map size {}x{} is empty", self.width, self.height)));
        }
        if self.width > MAX_CELLS || self.height > MAX_CELLS {
            return Err(invalid(format!(
                "map size {}x{} exceeds 65536 cells per axis",
                self.width, self.height,
            )));
        }

        if let Some(visible) = self.visible {
            let map = Rect::from_size(self.width as i32, self.height as i32);
            if visible.intersect(&map) != visible {
                return Err(invalid(format!(
                    "visible bounds {visible:?} exceed the {}x{} map",
                    self.width, self.height,
                )));
            }
            if visible.is_empty() {
                log::warn!("map config: visible bounds {visible:?} are empty; nothing will be drawn");
            }
        }

        let ts = &self.tile_set;
        if ts.columns == 0 || ts.rows == 0 {
            return Err(invalid(format!("atlas grid {}x{} is empty", ts.columns, ts.rows)));
        }
        if ts.tile_width == 0 || ts.tile_height == 0 {
            return Err(invalid("atlas tiles must be at least one pixel"));
        }

        let Some(atlas_len) = ts.columns.checked_mul(ts.rows) else {
            return Err(invalid(format!("atlas grid {}x{} is too large", ts.columns, ts.rows)));
        };
        if ts.columns.checked_mul(ts.tile_width).is_none()
            || ts.rows.checked_mul(ts.tile_height).is_none()
        {
            return Err(invalid(format!(
                "{}x{} atlas of {}x{} tiles is too large",
                ts.columns, ts.rows, ts.tile_width, ts.tile_height,
            )));
        }
        for (i, group) in ts.autotiles.iter().enumerate() {
            if group.base >= atlas_len || group.end() > atlas_len {
                return Err(invalid(format!(
                    "autotile run {}..{} exceeds the {atlas_len}-tile atlas",
                    group.base,
                    group.end(),
                )));
            }
            if let Some(other) = ts.autotiles[..i]
                .iter()
                .find(|g| group.base < g.end() && g.base < group.end())
            {
                return Err(invalid(format!(
                    "autotile run {}..{} overlaps {}..{}",
                    group.base,
                    group.end(),
                    other.base,
                    other.end(),
                )));
            }
        }

        Ok(())
    }

    /// Map dimensions. Call on a validated config.
    pub fn metrics(&self) -> Metrics {
        let metrics = Metrics::new(CellFormat::new(self.cell_size), self.width, self.height);
        match self.visible {
            Some(visible) => metrics.with_cell_bounds(visible),
            None => metrics,
        }
    }
}

impl GridMap {
    /// Build an empty map whose atlas lives in `texture`.
    pub fn from_config(config: &MapConfig, texture: TextureId) -> Result<Self> {
        config.validate()?;
        let ts = &config.tile_set;
        let atlas = AtlasGrid::new(texture, ts.columns, ts.rows, ts.tile_width, ts.tile_height);
        let tile_set = ts
            .autotiles
            .iter()
            .fold(GridTileSet::new(atlas), |set, group| set.with_auto_tile(*group));
        Ok(GridMap::new(config.metrics(), tile_set))
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfig(msg.into())
}
