//! Shrink-to-fit font size search.
//!
//! Names become display lines (wrapped at a column budget), then the block
//! is measured at decreasing sizes until it fits the region or the size
//! floor is hit. The floor is a hard stop, not a failure: a block that
//! still overflows is reported, never rejected.

use ab_glyph::FontArc;
use log::debug;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::config::CompositorConfig;
use crate::layout::region::FitRegion;
use crate::rendering::font::{line_height, string_width, LoadedFont};

/// Outcome of the search, consumed once by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Chosen size in pixels
    pub font_size: f32,
    /// Final display lines after wrapping
    pub lines: Vec<String>,
    /// Measured block width
    pub width: u32,
    /// Measured block height, inter-line spacing included
    pub height: u32,
    /// The embedded fallback face was substituted for a broken font path
    pub fallback: bool,
    /// Block height exceeds the region even at the accepted size
    pub overflow: bool,
}

/// Measure the multi-line block at one size.
///
/// Width is the widest line's advance width; height stacks every line plus
/// the spacing between them.
pub(crate) fn measure_block(
    font: &FontArc,
    lines: &[String],
    font_size: f32,
    spacing: f32,
) -> (u32, u32) {
    let width = lines
        .iter()
        .map(|line| string_width(font, line, font_size))
        .fold(0.0f32, f32::max);
    let height = line_height(font, font_size) * lines.len() as f32
        + spacing * lines.len().saturating_sub(1) as f32;

    // nearest-pixel bbox; scale normalization leaves sub-pixel noise on
    // integral heights
    (width.ceil() as u32, height.round() as u32)
}

/// Push the tail of an overlong word onto `lines` in column-sized chunks,
/// returning the final partial chunk.
fn break_long_word(word: &str, wrap_width: usize, lines: &mut Vec<String>) -> String {
    let mut chunk = String::new();
    let mut columns = 0;

    for grapheme in word.graphemes(true) {
        let grapheme_columns = UnicodeWidthStr::width(grapheme);
        if columns + grapheme_columns > wrap_width && !chunk.is_empty() {
            lines.push(std::mem::take(&mut chunk));
            columns = 0;
        }
        chunk.push_str(grapheme);
        columns += grapheme_columns;
    }

    chunk
}

/// Wrap one name to at most `wrap_width` display columns per line.
///
/// Names under the budget pass through as a single line, so the common case
/// stays one-name-per-line.
pub fn wrap_name(name: &str, wrap_width: usize) -> Vec<String> {
    if UnicodeWidthStr::width(name) <= wrap_width {
        return vec![name.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in name.split_whitespace() {
        let word_columns = UnicodeWidthStr::width(word);
        let current_columns = UnicodeWidthStr::width(current.as_str());

        if current.is_empty() {
            current = if word_columns <= wrap_width {
                word.to_string()
            } else {
                break_long_word(word, wrap_width, &mut lines)
            };
        } else if current_columns + 1 + word_columns <= wrap_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = if word_columns <= wrap_width {
                word.to_string()
            } else {
                break_long_word(word, wrap_width, &mut lines)
            };
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Find the largest size at which the block fits the region.
///
/// Accepts when the block height drops under `region.height * fit_threshold`
/// or the size floor is reached, whichever comes first; the size strictly
/// decreases by `font_step` and is clamped at the floor, so the loop runs at
/// most `(max - min) / step + 1` times. A fallback font skips the search and
/// is measured once at the floor size.
pub fn fit_text(
    region: &FitRegion,
    names: &[String],
    font: &LoadedFont,
    config: &CompositorConfig,
) -> FitResult {
    let lines: Vec<String> = names
        .iter()
        .flat_map(|name| wrap_name(name, config.wrap_width))
        .collect();

    if font.fallback {
        let (width, height) =
            measure_block(&font.font, &lines, config.font_size_min, config.line_spacing);
        debug!("fallback font, fixed size {}", config.font_size_min);
        return FitResult {
            font_size: config.font_size_min,
            lines,
            width,
            height,
            fallback: true,
            overflow: height > region.height,
        };
    }

    let limit = region.height as f32 * config.fit_threshold;
    let mut font_size = config.font_size_max;

    loop {
        let (width, height) = measure_block(&font.font, &lines, font_size, config.line_spacing);

        if (height as f32) < limit || font_size <= config.font_size_min {
            debug!(
                "accepted size {font_size}: block {width}x{height} in {}x{} region",
                region.width, region.height
            );
            return FitResult {
                font_size,
                lines,
                width,
                height,
                fallback: false,
                overflow: height > region.height,
            };
        }

        font_size = (font_size - config.font_step).max(config.font_size_min);
    }
}
