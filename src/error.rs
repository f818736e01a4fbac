use thiserror::Error;

/// Errors surfaced by the compositing pipeline.
///
/// A missing or unreadable font at the configured path is deliberately not
/// represented here: it selects the embedded fallback face instead (see
/// `rendering::font`).
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("no names to draw")]
    EmptyInput,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("embedded fallback font is unavailable")]
    FontUnavailable,
}
