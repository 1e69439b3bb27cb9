//! Renderer-facing data: texture regions of a grid atlas and the GPU instance
//! record a tile batch is flattened into. Creating textures, buffers and
//! pipelines is left to the embedding renderer.

pub mod atlas;
pub mod instance;

pub use atlas::{AtlasGrid, TextureId, TextureRegion};
pub use instance::TileInstance;
