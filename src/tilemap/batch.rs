use glam::Affine2;

use super::ABSENT;
use super::camera::Camera;
use super::tileset::TileMap;
use crate::color::Color;
use crate::renderer::atlas::{TextureId, TextureRegion};
use crate::renderer::instance::TileInstance;

/// Draw instances for the visible tiles of a map, rebuilt once per frame.
///
/// The three arrays are parallel: entry `i` of each describes one quad. They
/// are truncated, never freed, between frames so capacity only grows.
#[derive(Default)]
pub struct Batch {
    texture: Option<TextureId>,
    regions: Vec<TextureRegion>,
    transforms: Vec<Affine2>,
    tints: Vec<Color>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the tiles of `map` inside `camera`'s viewport. Call after
    /// panning or after the map changed.
    pub fn update<M: TileMap + ?Sized>(&mut self, map: &M, camera: &Camera) {
        let tile_set = map.tile_set();
        self.texture = Some(tile_set.texture());
        self.regions.clear();
        self.transforms.clear();
        self.tints.clear();

        let screen = Affine2::from_translation(camera.pos);
        map.metrics().range_tiles_in_viewport(camera.viewport(), |cell, transform| {
            let id = map.tile_at(cell);
            if id == ABSENT {
                return;
            }
            self.regions.push(tile_set.texture_region(id));
            self.transforms.push(screen * transform);
            self.tints.push(map.tint_color_at(cell));
        });

        log::trace!("batch: {} tiles in {:?}", self.regions.len(), camera.viewport());
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Texture shared by every entry; `None` before the first update.
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn texture_region_at(&self, i: usize) -> TextureRegion {
        self.regions[i]
    }

    /// Screen transform of entry `i`: maps the unit square onto the tile.
    pub fn transform_at(&self, i: usize) -> Affine2 {
        self.transforms[i]
    }

    pub fn tint_color_at(&self, i: usize) -> Color {
        self.tints[i]
    }

    /// Flatten into GPU instance records. `out` is truncated first and keeps
    /// its capacity.
    pub fn write_instances(&self, out: &mut Vec<TileInstance>) {
        out.clear();
        out.extend(
            self.transforms
                .iter()
                .zip(&self.regions)
                .zip(&self.tints)
                .map(|((t, r), c)| TileInstance::new(t, r, *c)),
        );
    }

    /// Slots the arrays can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.regions.capacity().min(self.transforms.capacity()).min(self.tints.capacity())
    }
}
