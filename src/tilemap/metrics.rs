use glam::{Affine2, IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::coord::{CellFormat, Coordinate};
use crate::geometry::Rect;

/// Cells per axis addressable by a [`Coordinate`].
pub const MAX_CELLS: u32 = 0x1_0000;

/// Cell range and first-tile pixel offset covering a viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawExtents {
    /// Half-open cell range `[min, max)`, always inside the map.
    pub cells: Rect,
    /// Screen offset of the first (possibly partially visible) tile,
    /// relative to the viewport's top-left corner. Never positive.
    pub offset: IVec2,
}

impl DrawExtents {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Dimensions of a tile map. Immutable once the map is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Pixel size of one (square) cell.
    pub cell_format: CellFormat,
    /// Map width in cells.
    pub cell_width: u32,
    /// Map height in cells.
    pub cell_height: u32,
    /// Visible area of the map in cells.
    pub cell_bounds: Rect,
}

impl Metrics {
    /// Metrics whose visible area is the whole map. Panics if either side
    /// exceeds the 65536 cells a [`Coordinate`] can address.
    pub fn new(cell_format: CellFormat, cell_width: u32, cell_height: u32) -> Self {
        assert!(
            cell_width <= MAX_CELLS && cell_height <= MAX_CELLS,
            "{cell_width}x{cell_height} map exceeds {MAX_CELLS} cells per axis",
        );
        Self {
            cell_format,
            cell_width,
            cell_height,
            cell_bounds: Rect::from_size(cell_width as i32, cell_height as i32),
        }
    }

    /// Restrict the visible area. Panics if `cell_bounds` is not inside the map.
    pub fn with_cell_bounds(mut self, cell_bounds: Rect) -> Self {
        let map = Rect::from_size(self.cell_width as i32, self.cell_height as i32);
        assert_eq!(
            cell_bounds.intersect(&map),
            cell_bounds,
            "visible cell bounds {cell_bounds:?} exceed the {}x{} map",
            self.cell_width,
            self.cell_height,
        );
        self.cell_bounds = cell_bounds;
        self
    }

    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_format.pixels() as i32
    }

    /// Visible area in pixels.
    pub fn bounds(&self) -> Rect {
        self.cell_bounds.scale(self.cell_size())
    }

    pub fn contains_cell(&self, x: i64, y: i64) -> bool {
        (0..self.cell_width as i64).contains(&x) && (0..self.cell_height as i64).contains(&y)
    }

    /// Row-major storage index of the cell referenced by `coord`.
    pub fn cell_index(&self, coord: Coordinate) -> usize {
        let (x, y) = coord.cell_xy();
        y as usize * self.cell_width as usize + x as usize
    }

    pub fn pixel_to_coordinate(&self, pixel: IVec2) -> Coordinate {
        self.cell_format.pixel_to_coordinate(pixel)
    }

    pub fn coordinate_to_pixel(&self, c: Coordinate) -> IVec2 {
        self.cell_format.coordinate_to_pixel(c)
    }

    /// Cells intersected by a pixel-space `viewport`.
    ///
    /// ```text
    /// offset = -(min mod s)          edge = max mod s
    /// cells  = min / s .. max / s    (+1 on an axis when -offset + edge != 0)
    /// ```
    ///
    /// The upper bound is clamped to the map size and the lower bound to
    /// `0..=upper`, so the range is never negative-length. Viewports with a
    /// negative origin start drawing at cell 0 with the offset pushed right
    /// accordingly.
    pub fn draw_extents(&self, viewport: Rect) -> DrawExtents {
        if viewport.is_empty() {
            return DrawExtents { cells: Rect::default(), offset: IVec2::ZERO };
        }

        let s = self.cell_size();
        let mut offset = -IVec2::new(viewport.min.x.rem_euclid(s), viewport.min.y.rem_euclid(s));
        let edge = IVec2::new(viewport.max.x.rem_euclid(s), viewport.max.y.rem_euclid(s));
        let mut min = IVec2::new(viewport.min.x.div_euclid(s), viewport.min.y.div_euclid(s));
        let mut max = IVec2::new(viewport.max.x.div_euclid(s), viewport.max.y.div_euclid(s));

        if -offset.x + edge.x != 0 {
            max.x += 1;
        }
        if -offset.y + edge.y != 0 {
            max.y += 1;
        }

        if min.x < 0 {
            offset.x += -min.x * s;
            min.x = 0;
        }
        if min.y < 0 {
            offset.y += -min.y * s;
            min.y = 0;
        }

        max.x = max.x.clamp(0, self.cell_width as i32);
        max.y = max.y.clamp(0, self.cell_height as i32);
        min = min.min(max);

        DrawExtents { cells: Rect { min, max }, offset }
    }

    /// Visit every cell intersecting `viewport` in row-major order together
    /// with its screen transform.
    ///
    /// The transform maps the unit square onto the tile's pixel rectangle,
    /// relative to the viewport's top-left corner. Only the first tile's
    /// position comes from [`Metrics::draw_extents`]; the rest are reached by
    /// adding the cell size, so the loop does no division.
    pub fn range_tiles_in_viewport(
        &self,
        viewport: Rect,
        mut visit: impl FnMut(Coordinate, Affine2),
    ) {
        let extents = self.draw_extents(viewport);
        if extents.is_empty() {
            return;
        }

        let tile_size = self.cell_size() as f32;
        let scale = Vec2::splat(tile_size);
        let mut pixel = extents.offset.as_vec2();
        let x_origin = pixel.x;

        for y in extents.cells.min.y..extents.cells.max.y {
            for x in extents.cells.min.x..extents.cells.max.x {
                let transform = Affine2::from_scale_angle_translation(scale, 0.0, pixel);
                visit(Coordinate::from_cell(x as u32, y as u32), transform);
                pixel.x += tile_size;
            }
            pixel.x = x_origin;
            pixel.y += tile_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics_10x10() -> Metrics {
        Metrics::new(CellFormat::new(16), 10, 10)
    }

    #[test]
    fn test_extents_partial_trailing_tile() {
        let e = metrics_10x10().draw_extents(Rect::new(0, 0, 33, 20));
        assert_eq!(e.cells, Rect::new(0, 0, 3, 2));
        assert_eq!(e.offset, IVec2::ZERO);
    }

    #[test]
    fn test_extents_partial_leading_tile() {
        let e = metrics_10x10().draw_extents(Rect::new(20, 40, 52, 72));
        assert_eq!(e.cells, Rect::new(1, 2, 4, 5));
        assert_eq!(e.offset, IVec2::new(-4, -8));
    }

    #[test]
    fn test_extents_clamped_to_map() {
        let e = metrics_10x10().draw_extents(Rect::new(150, 150, 200, 200));
        assert_eq!(e.cells.max, IVec2::new(10, 10));
        assert_eq!(e.cells.min, IVec2::new(9, 9));
    }

    #[test]
    fn test_extents_outside_map_is_empty() {
        let e = metrics_10x10().draw_extents(Rect::new(400, 400, 480, 480));
        assert!(e.is_empty());
        assert!(e.cells.min.x <= e.cells.max.x && e.cells.min.y <= e.cells.max.y);
    }

    #[test]
    fn test_extents_empty_viewport() {
        assert!(metrics_10x10().draw_extents(Rect::new(5, 5, 5, 5)).is_empty());
        assert!(metrics_10x10().draw_extents(Rect::new(0, 0, 0, 20)).is_empty());
    }

    #[test]
    fn test_extents_negative_origin_starts_at_cell_zero() {
        let e = metrics_10x10().draw_extents(Rect::new(-20, 0, 12, 16));
        assert_eq!(e.cells, Rect::new(0, 0, 1, 1));
        // Cell 0 sits 20 pixels into the viewport.
        assert_eq!(e.offset, IVec2::new(20, 0));
    }

    #[test]
    fn test_range_visits_row_major_with_incremental_positions() {
        let mut visited = Vec::new();
        metrics_10x10().range_tiles_in_viewport(Rect::new(8, 0, 40, 16), |cell, t| {
            visited.push((cell.cell_xy(), t.translation));
        });
        let cells: Vec<_> = visited.iter().map(|v| v.0).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(visited[0].1, Vec2::new(-8.0, 0.0));
        assert_eq!(visited[1].1, Vec2::new(8.0, 0.0));
        assert_eq!(visited[2].1, Vec2::new(24.0, 0.0));
    }

    #[test]
    fn test_bounds_scale_visible_cells() {
        let m = metrics_10x10().with_cell_bounds(Rect::new(1, 1, 5, 4));
        assert_eq!(m.bounds(), Rect::new(16, 16, 80, 64));
    }

    #[test]
    #[should_panic]
    fn test_map_wider_than_coordinate_range_panics() {
        let _ = Metrics::new(CellFormat::new(16), MAX_CELLS + 1, 4);
    }

    #[test]
    fn test_largest_map_accepted() {
        let m = Metrics::new(CellFormat::new(1), MAX_CELLS, MAX_CELLS);
        let e = m.draw_extents(Rect::new(MAX_CELLS as i32 - 2, 0, MAX_CELLS as i32 + 10, 1));
        assert_eq!(e.cells, Rect::new(MAX_CELLS as i32 - 2, 0, MAX_CELLS as i32, 1));
    }

    #[test]
    fn test_extents_stay_inside_map() {
        let m = Metrics::new(CellFormat::new(16), 7, 5);
        for x0 in (-200..200).step_by(13) {
            for y0 in (-150..150).step_by(11) {
                for (w, h) in [(0, 0), (1, 1), (15, 17), (33, 20), (300, 300)] {
                    let e = m.draw_extents(Rect::new(x0, y0, x0 + w, y0 + h));
                    let (min, max) = (e.cells.min, e.cells.max);
                    assert!(0 <= min.x && min.x <= max.x && max.x <= 7, "{e:?}");
                    assert!(0 <= min.y && min.y <= max.y && max.y <= 5, "{e:?}");
                }
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_cell_bounds_outside_map_panics() {
        let _ = metrics_10x10().with_cell_bounds(Rect::new(0, 0, 11, 10));
    }
}
