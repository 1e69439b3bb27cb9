//! Tile-map plumbing for 2D engines: fixed-point cell coordinates, viewport
//! culling, neighbour-driven autotiling, a camera with edge clamping and the
//! per-frame draw batch, plus a JSON map description and a fixed-timestep
//! game loop to drive it all.
//!
//! Nothing here owns a window or a GPU device. The batch produces
//! [`renderer::TileInstance`] records that the embedding renderer uploads.

pub mod color;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod geometry;
pub mod renderer;
pub mod tilemap;

pub use color::Color;
pub use error::{Error, Result};
pub use geometry::Rect;
