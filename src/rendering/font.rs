//! Font loading and measurement for the compositor.
//!
//! The configured font file is loaded per invocation; when it is missing or
//! unreadable the embedded DejaVu Sans face takes its place and the fit
//! search is short-circuited at a fixed small size. Font data is read-only
//! after parsing, so concurrent invocations can share it freely.

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};
use lazy_static::lazy_static;
use log::warn;

use crate::error::ComposeError;

const DEJAVU_SANS_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

lazy_static! {
    static ref EMBEDDED_FONT: Option<FontArc> = FontArc::try_from_slice(DEJAVU_SANS_BYTES).ok();
}

/// A font selected for one composition.
///
/// `fallback` is set only when a configured font path failed to load and the
/// embedded face was substituted; the search loop treats that as a hard stop.
#[derive(Clone)]
pub struct LoadedFont {
    pub font: FontArc,
    pub fallback: bool,
}

fn embedded_font() -> Result<FontArc, ComposeError> {
    EMBEDDED_FONT.clone().ok_or(ComposeError::FontUnavailable)
}

/// Load the font for a composition.
///
/// `None` selects the embedded face as the chosen font; a path that cannot
/// be read or parsed selects it as a fallback instead.
pub fn load_font(path: Option<&Path>) -> Result<LoadedFont, ComposeError> {
    let Some(path) = path else {
        return Ok(LoadedFont {
            font: embedded_font()?,
            fallback: false,
        });
    };

    match std::fs::read(path) {
        Ok(bytes) => match FontArc::try_from_vec(bytes) {
            Ok(font) => Ok(LoadedFont {
                font,
                fallback: false,
            }),
            Err(err) => {
                warn!(
                    "font {} is not parseable ({err}), using fallback",
                    path.display()
                );
                Ok(LoadedFont {
                    font: embedded_font()?,
                    fallback: true,
                })
            }
        },
        Err(err) => {
            warn!(
                "font {} is not readable ({err}), using fallback",
                path.display()
            );
            Ok(LoadedFont {
                font: embedded_font()?,
                fallback: true,
            })
        }
    }
}

/// Advance width of `text` at `font_size`, kerning included.
///
/// Matches the glyph layout `imageproc::drawing::draw_text_mut` produces, so
/// measured widths line up with drawn pixels.
pub fn string_width(font: &FontArc, text: &str, font_size: f32) -> f32 {
    let scaled = font.as_scaled(PxScale::from(font_size));
    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for c in text.chars() {
        let id = font.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    width
}

/// Line height of the face at `font_size`.
///
/// ab_glyph normalizes its pixel scale to ascent minus descent, so this is
/// the scale itself; kept as a function so callers don't encode that fact.
pub fn line_height(font: &FontArc, font_size: f32) -> f32 {
    font.as_scaled(PxScale::from(font_size)).height()
}
