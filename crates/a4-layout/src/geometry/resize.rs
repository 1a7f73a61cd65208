//! Placement, clamping and resize math
//!
//! These functions never fail. Out-of-range input is pulled back onto the
//! page instead of being rejected.

use crate::constants::{
    DEFAULT_BLOCK_STEP, DEFAULT_BLOCK_X, DEFAULT_BLOCK_Y, IMAGE_BLOCK_SIZE, PERCENT_MAX,
    TEXT_BLOCK_SIZE,
};
use crate::model::BlockType;

use super::{PercentPoint, PixelSize, Rect, ResizeDirection, SizeLimits};

// =============================================================================
// Default Placement
// =============================================================================

/// Default rectangle for the `index`-th block of a document.
///
/// Blocks stack downward 15% at a time. Beyond roughly six blocks they
/// overlap or run off the bottom of the page; nothing tries to avoid that.
pub fn place_default(index: usize, block_type: BlockType) -> Rect {
    let (width, height) = match block_type {
        BlockType::Text => TEXT_BLOCK_SIZE,
        BlockType::Image => IMAGE_BLOCK_SIZE,
    };

    Rect::new(
        DEFAULT_BLOCK_X,
        index as f32 * DEFAULT_BLOCK_STEP + DEFAULT_BLOCK_Y,
        width,
        height,
    )
}

// =============================================================================
// Clamping
// =============================================================================

/// Move a rectangle so it lies on the page, keeping its size.
pub fn clamp_position(rect: &Rect) -> Rect {
    let x = rect.x.min(PERCENT_MAX - rect.width).max(0.0);
    let y = rect.y.min(PERCENT_MAX - rect.height).max(0.0);
    rect.with_origin(x, y)
}

// =============================================================================
// Aspect Conversion
// =============================================================================

/// Height (percent) that gives `width_pct` the pixel ratio `aspect_ratio`
/// (width / height) on a page displayed at `page`.
pub fn height_for_width(width_pct: f32, aspect_ratio: f32, page: PixelSize) -> f32 {
    let width_px = width_pct / PERCENT_MAX * page.width;
    let height_px = width_px / aspect_ratio;
    height_px / page.height * PERCENT_MAX
}

/// Width (percent) that gives `height_pct` the pixel ratio `aspect_ratio`.
pub fn width_for_height(height_pct: f32, aspect_ratio: f32, page: PixelSize) -> f32 {
    let height_px = height_pct / PERCENT_MAX * page.height;
    let width_px = height_px * aspect_ratio;
    width_px / page.width * PERCENT_MAX
}

/// Width / height of a rectangle measured in pixels on `page`.
pub fn pixel_aspect(rect: &Rect, page: PixelSize) -> f32 {
    (rect.width * page.width) / (rect.height * page.height)
}

fn usable_ratio(aspect_ratio: Option<f32>) -> Option<f32> {
    aspect_ratio.filter(|r| r.is_finite() && *r > 0.0)
}

// =============================================================================
// Resize
// =============================================================================

/// Resize `rect` by dragging the handle `direction` to `pointer`.
///
/// East and south edges follow the pointer directly. West and north edges
/// move the origin while the opposite edge stays put. When `aspect_ratio`
/// is set the dimension not driven by the handle is recomputed in pixel
/// space; corners treat width as the driving dimension. The result is then
/// cut at the right and bottom page edges, which may break the ratio.
pub fn resize(
    rect: &Rect,
    direction: ResizeDirection,
    pointer: PercentPoint,
    aspect_ratio: Option<f32>,
    page: PixelSize,
    limits: SizeLimits,
) -> Rect {
    let mut x = rect.x;
    let mut y = rect.y;
    let mut width = rect.width;
    let mut height = rect.height;

    if direction.east() {
        width = (pointer.x - rect.x).max(limits.min_width);
    }
    if direction.west() {
        width = (rect.width + (rect.x - pointer.x)).max(limits.min_width);
        x = (rect.right() - limits.min_width).min(pointer.x);
    }
    if direction.south() {
        height = (pointer.y - rect.y).max(limits.min_height);
    }
    if direction.north() {
        height = (rect.height + (rect.y - pointer.y)).max(limits.min_height);
        y = (rect.bottom() - limits.min_height).min(pointer.y);
    }

    if let Some(ratio) = usable_ratio(aspect_ratio) {
        if !page.is_degenerate() {
            if direction.horizontal() {
                height = height_for_width(width, ratio, page);
            } else if direction.vertical() {
                width = width_for_height(height, ratio, page);
            }
        }
    }

    width = width.min(PERCENT_MAX - x);
    height = height.min(PERCENT_MAX - y);

    Rect::new(x, y, width, height)
}
