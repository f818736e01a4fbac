//! Fit-region resolution.
//!
//! Decides the rectangle the text block must land in: the whole canvas minus
//! a margin, or the footprint of a decorative overlay scaled and centered
//! over it. Geometry is planned separately from pixel work so the pipeline
//! can re-plan (grow policy) before anything is pasted.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;

use crate::config::CompositorConfig;

/// Rectangle within the canvas that the text block must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FitRegion {
    /// Shrink by `padding` on all sides plus `top_extra` below the top edge.
    ///
    /// Saturates instead of underflowing when the rectangle is smaller than
    /// its margins; a collapsed region is legal and floors the fit search.
    fn inset(&self, padding: u32, top_extra: u32) -> FitRegion {
        FitRegion {
            x: self.x.saturating_add(padding),
            y: self.y.saturating_add(padding).saturating_add(top_extra),
            width: self.width.saturating_sub(padding.saturating_mul(2)),
            height: self
                .height
                .saturating_sub(padding.saturating_mul(2))
                .saturating_sub(top_extra),
        }
    }
}

/// Where the resized overlay lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySlot {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Vertical placement mode for the rendered block.
///
/// Overlay regions anchor at the top (the inset already reserves headroom);
/// a bare canvas centers the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Centered,
    Top,
}

/// Resolved target geometry for one composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionPlan {
    pub rect: FitRegion,
    pub overlay_slot: Option<OverlaySlot>,
    pub anchor: VerticalAnchor,
}

/// Resolve the fit region for a canvas and an optional overlay.
///
/// `size_ratio` is passed separately from the config because the grow
/// policy re-plans with larger ratios than the configured one.
pub fn resolve(
    canvas_width: u32,
    canvas_height: u32,
    overlay_dims: Option<(u32, u32)>,
    size_ratio: f32,
    config: &CompositorConfig,
) -> RegionPlan {
    let canvas = FitRegion {
        x: 0,
        y: 0,
        width: canvas_width,
        height: canvas_height,
    };

    let Some((overlay_width, overlay_height)) = overlay_dims else {
        return RegionPlan {
            rect: canvas.inset(config.padding, 0),
            overlay_slot: None,
            anchor: VerticalAnchor::Centered,
        };
    };

    let aspect = overlay_height as f32 / overlay_width as f32;
    let new_width = ((canvas_width as f32 * size_ratio).round() as u32).max(1);
    let new_height = ((new_width as f32 * aspect).round() as u32).max(1);

    let slot = OverlaySlot {
        x: canvas_width.saturating_sub(new_width) / 2,
        y: canvas_height.saturating_sub(new_height) / 2,
        width: new_width,
        height: new_height,
    };
    debug!(
        "overlay slot {}x{} at ({}, {}) from ratio {size_ratio}",
        slot.width, slot.height, slot.x, slot.y
    );

    let slot_rect = FitRegion {
        x: slot.x,
        y: slot.y,
        width: slot.width,
        height: slot.height,
    };

    RegionPlan {
        rect: slot_rect.inset(config.padding, config.top_padding),
        overlay_slot: Some(slot),
        anchor: VerticalAnchor::Top,
    }
}

/// Resize the overlay to its slot and alpha-blend it onto the canvas.
pub fn paste_overlay(canvas: &mut RgbaImage, overlay: &RgbaImage, slot: &OverlaySlot) {
    let resized = imageops::resize(overlay, slot.width, slot.height, FilterType::Lanczos3);
    imageops::overlay(canvas, &resized, i64::from(slot.x), i64::from(slot.y));
}
