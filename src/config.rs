// Configuration for the text-fit compositor
// All values carry the defaults documented on each field

use std::path::PathBuf;

use crate::error::ComposeError;

/// What to do when the text block still exceeds the fit region after the
/// font-size search has reached its floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Accept the overflow; glyphs outside the region are clipped at the
    /// canvas edge and the condition is reported on the fit result.
    #[default]
    ClipOverflow,

    /// Enlarge the overlay region (bounded by the canvas) until the block
    /// fits or no room is left. Only meaningful when an overlay is present.
    GrowRegion,
}

/// Compositor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorConfig {
    /// Overlay width as a fraction of canvas width, in (0, 1] (default 0.8)
    pub size_ratio: f32,

    /// Inner margin of the fit region on all sides, in pixels (default 60)
    pub padding: u32,

    /// Extra margin reserved at the top of an overlay region (default 40)
    pub top_padding: u32,

    /// Font file to load; the embedded face is used when this is `None`
    /// or the file cannot be read
    pub font_path: Option<PathBuf>,

    /// Starting font size for the search, in pixels (default 50)
    pub font_size_max: f32,

    /// Font size floor; reaching it stops the search regardless of fit
    /// (default 15)
    pub font_size_min: f32,

    /// Size decrement per search iteration (default 2)
    pub font_step: f32,

    /// Fraction of region height the text block must stay under (default 0.8)
    pub fit_threshold: f32,

    /// Maximum display columns per line before a name is wrapped
    /// (default 100)
    pub wrap_width: usize,

    /// Vertical gap between lines, in pixels (default 5)
    pub line_spacing: f32,

    /// Overflow handling once the size floor is reached
    pub overflow: OverflowPolicy,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            size_ratio: 0.8,
            padding: 60,
            top_padding: 40,
            font_path: None,
            font_size_max: 50.0,
            font_size_min: 15.0,
            font_step: 2.0,
            fit_threshold: 0.8,
            wrap_width: 100,
            line_spacing: 5.0,
            overflow: OverflowPolicy::ClipOverflow,
        }
    }
}

impl CompositorConfig {
    /// Validate option ranges at the pipeline boundary.
    pub fn validate(&self) -> Result<(), ComposeError> {
        if !(self.size_ratio > 0.0 && self.size_ratio <= 1.0) {
            return Err(ComposeError::InvalidConfig(format!(
                "size_ratio must be in (0, 1], got {}",
                self.size_ratio
            )));
        }
        if !(self.fit_threshold > 0.0 && self.fit_threshold <= 1.0) {
            return Err(ComposeError::InvalidConfig(format!(
                "fit_threshold must be in (0, 1], got {}",
                self.fit_threshold
            )));
        }
        if self.font_size_min <= 0.0 {
            return Err(ComposeError::InvalidConfig(format!(
                "font_size_min must be positive, got {}",
                self.font_size_min
            )));
        }
        if self.font_size_max < self.font_size_min {
            return Err(ComposeError::InvalidConfig(format!(
                "font_size_max {} is below font_size_min {}",
                self.font_size_max, self.font_size_min
            )));
        }
        if self.font_step <= 0.0 {
            return Err(ComposeError::InvalidConfig(format!(
                "font_step must be positive, got {}",
                self.font_step
            )));
        }
        if self.wrap_width == 0 {
            return Err(ComposeError::InvalidConfig(
                "wrap_width must be at least 1".to_string(),
            ));
        }
        if self.line_spacing < 0.0 {
            return Err(ComposeError::InvalidConfig(format!(
                "line_spacing must be non-negative, got {}",
                self.line_spacing
            )));
        }
        Ok(())
    }
}
