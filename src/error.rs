use thiserror::Error;

/// Failures of the fallible surfaces: map configuration and atlas images.
///
/// The tile-map algorithms themselves never return errors; absent tiles and
/// out-of-map cells are ordinary values.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed map config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode atlas image: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid map config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
