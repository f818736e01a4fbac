//! Decode and canvas-prep helpers at the pipeline boundary.
//!
//! The surrounding orchestration owns fetching and transport; these helpers
//! turn its raw bytes into canvases the compositor accepts and keep oversized
//! templates within working bounds.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;

use crate::error::ComposeError;

/// Default working bounds for a template canvas.
pub const MAX_CANVAS_WIDTH: u32 = 1200;
pub const MAX_CANVAS_HEIGHT: u32 = 800;

/// Decode image bytes into an RGBA canvas.
///
/// Corrupt or unsupported data is fatal to the invocation; no partial
/// compositing happens downstream of a failed decode.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, ComposeError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(decoded.to_rgba8())
}

/// Downscale a canvas that exceeds the given bounds, preserving aspect
/// ratio. Canvases already within bounds come back unchanged.
pub fn shrink_to_bounds(canvas: RgbaImage, max_width: u32, max_height: u32) -> RgbaImage {
    let (width, height) = canvas.dimensions();
    if width <= max_width && height <= max_height {
        return canvas;
    }

    let scale = (max_width as f32 / width as f32).min(max_height as f32 / height as f32);
    let new_width = ((width as f32 * scale).round() as u32).max(1);
    let new_height = ((height as f32 * scale).round() as u32).max(1);
    debug!("canvas {width}x{height} shrunk to {new_width}x{new_height}");

    imageops::resize(&canvas, new_width, new_height, FilterType::Lanczos3)
}
