use thiserror::Error;

/// Skin resolution and head rendering error types
#[derive(Error, Debug)]
pub enum SkinError {
    #[error("Invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Textures property is not valid base64: {0}")]
    TexturesEncoding(#[from] base64::DecodeError),

    #[error("Texture could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Unsupported skin texture dimensions {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Head size must be greater than zero")]
    InvalidHeadSize,

    #[error("Head rendering task failed: {0}")]
    Task(String),

    #[error("Head sink unavailable: {0}")]
    Sink(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SkinError>;
