//! Conversions between percentage space and page or pixel space

use crate::constants::PERCENT_MAX;
use crate::types::PageSize;

use super::{PageRect, PercentPoint, PixelPoint, PixelSize, Rect, ResizeDirection};

/// Map a percentage rectangle to absolute page units, flipping the
/// vertical axis into PDF's bottom-left origin.
pub fn to_page_rect(rect: &Rect, page: PageSize) -> PageRect {
    let x = rect.x / PERCENT_MAX * page.width;
    let top = rect.y / PERCENT_MAX * page.height;
    let width = rect.width / PERCENT_MAX * page.width;
    let height = rect.height / PERCENT_MAX * page.height;

    PageRect {
        x,
        y: page.height - top - height,
        width,
        height,
    }
}

/// Pixel origin (top-left corner) of a rectangle on the displayed page.
pub fn pixel_origin(rect: &Rect, page: PixelSize) -> PixelPoint {
    page.to_pixels(PercentPoint::new(rect.x, rect.y))
}

/// Anchor points of the eight resize handles of `rect`, in pixels.
pub fn handle_points(rect: &Rect, page: PixelSize) -> [(ResizeDirection, PixelPoint); 8] {
    let left = rect.x;
    let right = rect.right();
    let center_x = rect.x + rect.width / 2.0;
    let top = rect.y;
    let bottom = rect.bottom();
    let center_y = rect.y + rect.height / 2.0;

    ResizeDirection::ALL.map(|direction| {
        let x = if direction.west() {
            left
        } else if direction.east() {
            right
        } else {
            center_x
        };
        let y = if direction.north() {
            top
        } else if direction.south() {
            bottom
        } else {
            center_y
        };
        (direction, page.to_pixels(PercentPoint::new(x, y)))
    })
}
