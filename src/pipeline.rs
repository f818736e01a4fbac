//! The compose pipeline: resolve region, fit text, paste overlay, draw.
//!
//! One synchronous pass over caller-owned inputs. The canvas is mutated in
//! place only after every decision is made, so a rejected invocation leaves
//! it untouched. Invocations share nothing mutable; running them
//! concurrently for independent images needs no locking.

use image::RgbaImage;
use log::{debug, info};

use crate::config::{CompositorConfig, OverflowPolicy};
use crate::error::ComposeError;
use crate::layout::fit::{fit_text, FitResult};
use crate::layout::region::{self, RegionPlan};
use crate::rendering::draw::draw_block;
use crate::rendering::font::load_font;

/// Ratio increment per grow step under `OverflowPolicy::GrowRegion`.
const GROW_RATIO_STEP: f32 = 0.1;

/// Outcome of one composition: the geometry used and the accepted fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub region: RegionPlan,
    pub fit: FitResult,
}

/// Composite `names` onto `canvas`, optionally over a decorative overlay.
///
/// The overlay, when present, is resized to the configured fraction of the
/// canvas width and alpha-blended centered; text then fits inside its
/// footprint, anchored at the top. Without an overlay the text centers on
/// the padded canvas.
pub fn compose(
    canvas: &mut RgbaImage,
    overlay: Option<&RgbaImage>,
    names: &[String],
    config: &CompositorConfig,
) -> Result<Composition, ComposeError> {
    config.validate()?;

    let names: Vec<String> = names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Err(ComposeError::EmptyInput);
    }

    let font = load_font(config.font_path.as_deref())?;
    let (canvas_width, canvas_height) = canvas.dimensions();
    let overlay_dims = overlay.map(|image| image.dimensions());

    let mut plan = region::resolve(
        canvas_width,
        canvas_height,
        overlay_dims,
        config.size_ratio,
        config,
    );
    let mut fit = fit_text(&plan.rect, &names, &font, config);

    if config.overflow == OverflowPolicy::GrowRegion && overlay_dims.is_some() {
        let mut ratio = config.size_ratio;
        while floor_forced(&fit, &plan, config) && ratio < 1.0 {
            ratio = (ratio + GROW_RATIO_STEP).min(1.0);
            debug!("growing overlay region to ratio {ratio}");
            plan = region::resolve(canvas_width, canvas_height, overlay_dims, ratio, config);
            fit = fit_text(&plan.rect, &names, &font, config);
        }
    }

    if let (Some(overlay), Some(slot)) = (overlay, plan.overlay_slot) {
        region::paste_overlay(canvas, overlay, &slot);
    }

    draw_block(canvas, &plan.rect, plan.anchor, &fit, &font.font, config);
    info!(
        "composited {} line(s) at size {} into {}x{} region",
        fit.lines.len(),
        fit.font_size,
        plan.rect.width,
        plan.rect.height
    );

    Ok(Composition { region: plan, fit })
}

/// The search hit its floor and the block still misses the fit threshold.
///
/// A fallback font never triggers growth; its size is pinned, not searched.
fn floor_forced(fit: &FitResult, plan: &RegionPlan, config: &CompositorConfig) -> bool {
    !fit.fallback
        && fit.font_size <= config.font_size_min
        && fit.height as f32 >= plan.rect.height as f32 * config.fit_threshold
}
