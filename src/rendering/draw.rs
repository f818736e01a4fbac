//! Text-block renderer.
//!
//! Draws the fitted lines onto the canvas in place. Each line is centered
//! horizontally on its own measured width; vertical placement follows the
//! region's anchor mode. Glyphs falling outside the canvas are clipped by
//! the draw primitive, which is what the clip-overflow policy relies on.

use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use log::debug;

use crate::config::CompositorConfig;
use crate::layout::fit::FitResult;
use crate::layout::region::{FitRegion, VerticalAnchor};
use crate::rendering::font::{line_height, string_width};

const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Draw the fitted block into `region` on the canvas.
pub fn draw_block(
    canvas: &mut RgbaImage,
    region: &FitRegion,
    anchor: VerticalAnchor,
    fit: &FitResult,
    font: &FontArc,
    config: &CompositorConfig,
) {
    let line_advance = line_height(font, fit.font_size) + config.line_spacing;
    let top = match anchor {
        VerticalAnchor::Centered => {
            region.y as f32 + (region.height as f32 - fit.height as f32) / 2.0
        }
        VerticalAnchor::Top => region.y as f32,
    };
    debug!(
        "drawing {} line(s) at size {} from y {top}",
        fit.lines.len(),
        fit.font_size
    );

    for (index, line) in fit.lines.iter().enumerate() {
        let width = string_width(font, line, fit.font_size);
        let x = region.x as f32 + (region.width as f32 - width) / 2.0;
        let y = top + index as f32 * line_advance;

        draw_text_mut(
            canvas,
            TEXT_COLOR,
            x.round() as i32,
            y.round() as i32,
            PxScale::from(fit.font_size),
            font,
            line,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fit::measure_block;
    use crate::rendering::font::load_font;

    fn fitted(font: &FontArc, lines: &[&str], font_size: f32, spacing: f32) -> FitResult {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        let (width, height) = measure_block(font, &lines, font_size, spacing);
        FitResult {
            font_size,
            lines,
            width,
            height,
            fallback: false,
            overflow: false,
        }
    }

    /// Bounding box of non-white pixels, if any.
    fn ink_bounds(canvas: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in canvas.enumerate_pixels() {
            if pixel[0] < 200 {
                bounds = Some(match bounds {
                    None => (x, x, y, y),
                    Some((min_x, max_x, min_y, max_y)) => {
                        (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
                    }
                });
            }
        }
        bounds
    }

    #[test]
    fn test_draw_mutates_canvas_within_region_bounds() {
        let loaded = load_font(None).unwrap();
        let config = CompositorConfig::default();
        let mut canvas = RgbaImage::from_pixel(400, 200, Rgba([255, 255, 255, 255]));
        let region = FitRegion {
            x: 50,
            y: 50,
            width: 300,
            height: 100,
        };
        let fit = fitted(&loaded.font, &["Hello"], 30.0, config.line_spacing);

        draw_block(
            &mut canvas,
            &region,
            VerticalAnchor::Centered,
            &fit,
            &loaded.font,
            &config,
        );

        let (min_x, max_x, min_y, max_y) = ink_bounds(&canvas).expect("text should leave ink");
        assert!(min_x >= region.x, "ink starts left of the region: {min_x}");
        assert!(max_x < region.x + region.width, "ink spills right: {max_x}");
        assert!(min_y >= region.y, "ink starts above the region: {min_y}");
        assert!(max_y < region.y + region.height, "ink spills below: {max_y}");
    }

    #[test]
    fn test_lines_are_centered_on_their_own_width() {
        let loaded = load_font(None).unwrap();
        let config = CompositorConfig::default();
        let mut canvas = RgbaImage::from_pixel(400, 200, Rgba([255, 255, 255, 255]));
        let region = FitRegion {
            x: 0,
            y: 0,
            width: 400,
            height: 200,
        };
        let fit = fitted(&loaded.font, &["HHHH"], 30.0, config.line_spacing);

        draw_block(
            &mut canvas,
            &region,
            VerticalAnchor::Centered,
            &fit,
            &loaded.font,
            &config,
        );

        let (min_x, max_x, _, _) = ink_bounds(&canvas).unwrap();
        let ink_center = (min_x + max_x) as f32 / 2.0;
        assert!(
            (ink_center - 200.0).abs() < 5.0,
            "ink should straddle the region center, midpoint at {ink_center}"
        );
    }

    #[test]
    fn test_top_anchor_sits_higher_than_centered() {
        let loaded = load_font(None).unwrap();
        let config = CompositorConfig::default();
        let region = FitRegion {
            x: 0,
            y: 0,
            width: 400,
            height: 300,
        };

        let mut top_canvas = RgbaImage::from_pixel(400, 300, Rgba([255, 255, 255, 255]));
        let mut centered_canvas = top_canvas.clone();
        let fit = fitted(&loaded.font, &["Hg"], 30.0, config.line_spacing);

        draw_block(
            &mut top_canvas,
            &region,
            VerticalAnchor::Top,
            &fit,
            &loaded.font,
            &config,
        );
        draw_block(
            &mut centered_canvas,
            &region,
            VerticalAnchor::Centered,
            &fit,
            &loaded.font,
            &config,
        );

        let (_, _, top_min_y, _) = ink_bounds(&top_canvas).unwrap();
        let (_, _, centered_min_y, _) = ink_bounds(&centered_canvas).unwrap();
        assert!(
            top_min_y < centered_min_y,
            "top-anchored ink ({top_min_y}) should start above centered ink ({centered_min_y})"
        );
        assert!(
            top_min_y < 15,
            "top-anchored ink should hug the region top, started at {top_min_y}"
        );
    }

    #[test]
    fn test_multi_line_blocks_stack_downward() {
        let loaded = load_font(None).unwrap();
        let config = CompositorConfig::default();
        let mut canvas = RgbaImage::from_pixel(400, 300, Rgba([255, 255, 255, 255]));
        let region = FitRegion {
            x: 0,
            y: 0,
            width: 400,
            height: 300,
        };

        let one = fitted(&loaded.font, &["Hg"], 30.0, config.line_spacing);
        let three = fitted(&loaded.font, &["Hg", "Hg", "Hg"], 30.0, config.line_spacing);

        let mut single = canvas.clone();
        draw_block(
            &mut single,
            &region,
            VerticalAnchor::Top,
            &one,
            &loaded.font,
            &config,
        );
        draw_block(
            &mut canvas,
            &region,
            VerticalAnchor::Top,
            &three,
            &loaded.font,
            &config,
        );

        let (_, _, _, single_max_y) = ink_bounds(&single).unwrap();
        let (_, _, _, multi_max_y) = ink_bounds(&canvas).unwrap();
        assert!(
            multi_max_y > single_max_y + 60,
            "three lines should extend at least two line advances past one \
             ({multi_max_y} vs {single_max_y})"
        );
    }
}
