use glam::{IVec2, Vec2};

use crate::geometry::Rect;

/// Which part of a tile map is in view and where on screen it is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Screen position, in pixels, of the viewport's top-left corner.
    pub pos: Vec2,
    /// Visible area of the map in map pixels. Its size is the on-screen size.
    viewport: Rect,
    /// Total viewable area of the map in map pixels.
    bounds: Rect,
}

impl Camera {
    /// A camera showing a `size` pixel window of the map, starting at the
    /// top-left of `bounds`.
    pub fn new(pos: Vec2, size: IVec2, bounds: Rect) -> Self {
        let viewport = Rect { min: bounds.min, max: bounds.min + size };
        Self { pos, viewport: viewport.clamp_within(&bounds), bounds }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replace the viewable area (e.g. after the map was resized) and pull the
    /// viewport back inside it.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.viewport = self.viewport.clamp_within(&bounds);
    }

    /// Translate the viewport by `delta` pixels, stopping at the map edges.
    pub fn pan(&mut self, delta: IVec2) {
        self.viewport = self.viewport.translate(delta).clamp_within(&self.bounds);
    }

    /// Centre the viewport on map pixel `pixel`, stopping at the map edges.
    pub fn center_at(&mut self, pixel: IVec2) {
        let size = self.viewport.size();
        let min = pixel - size / 2;
        self.viewport = Rect { min, max: min + size }.clamp_within(&self.bounds);
    }

    /// Screen rectangle the viewport is drawn into.
    pub fn on_screen_area(&self) -> Rect {
        Rect::from_size(self.viewport.width(), self.viewport.height())
            .translate(self.pos.as_ivec2())
    }

    /// Map pixel → screen position.
    pub fn world_to_screen(&self, pixel: IVec2) -> Vec2 {
        (pixel - self.viewport.min).as_vec2() + self.pos
    }

    /// Screen position → map pixel (truncated toward zero).
    pub fn screen_to_world(&self, v: Vec2) -> IVec2 {
        (v - self.pos + self.viewport.min.as_vec2()).as_ivec2()
    }
}
