//! Text-fit compositor.
//!
//! Lays a list of names onto a raster canvas so the block visually fits a
//! target region, choosing font size, line wrapping, and position
//! automatically. An optional decorative overlay is scaled and centered
//! first and the text then fits inside its footprint.
//!
//! The crate is the computational core only: callers hand it a decoded
//! canvas, an optional decoded overlay, and the name list; fetching,
//! spreadsheet parsing, and delivery live in the surrounding orchestration.

pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod pipeline;
pub mod rendering;

pub use config::{CompositorConfig, OverflowPolicy};
pub use error::ComposeError;
pub use input::{decode_image, shrink_to_bounds};
pub use pipeline::{compose, Composition};
