//! Shared constants for page layout and export
//!
//! This module centralizes magic numbers used by the editor, the
//! signature overlay and the PDF exporters.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Percentage Space
// =============================================================================

/// Upper bound of the percentage coordinate space
pub const PERCENT_MAX: f32 = 100.0;

/// Smallest width a resize may produce (percent of page width)
pub const MIN_WIDTH_PCT: f32 = 5.0;

/// Smallest height a resize may produce (percent of page height)
pub const MIN_HEIGHT_PCT: f32 = 3.0;

// =============================================================================
// Default Placement
// =============================================================================

/// Left edge of a freshly added block
pub const DEFAULT_BLOCK_X: f32 = 10.0;

/// Top edge of the first block; later blocks stack below it
pub const DEFAULT_BLOCK_Y: f32 = 5.0;

/// Vertical step between stacked default blocks
pub const DEFAULT_BLOCK_STEP: f32 = 15.0;

pub const TEXT_BLOCK_SIZE: (f32, f32) = (80.0, 10.0);
pub const IMAGE_BLOCK_SIZE: (f32, f32) = (40.0, 20.0);

/// Placeholder text of a new text block
pub const DEFAULT_TEXT_CONTENT: &str = "Double-click to edit";

pub const DEFAULT_FONT_SIZE: f32 = 14.0;

pub const DEFAULT_DOCUMENT_TITLE: &str = "Untitled Document";

/// Origin and width of a signature placed from the library
pub const SIGNATURE_DEFAULT_X: f32 = 10.0;
pub const SIGNATURE_DEFAULT_Y: f32 = 10.0;
pub const SIGNATURE_DEFAULT_WIDTH: f32 = 30.0;

/// Offset applied to a pasted placement, in percent on both axes
pub const PASTE_OFFSET_PCT: f32 = 5.0;

// =============================================================================
// Interaction
// =============================================================================

/// Pointer travel (pixels, either axis) that turns a press into a drag
pub const DRAG_THRESHOLD_PX: f32 = 3.0;

/// Distance (pixels) from a handle's anchor that still counts as a hit
pub const HANDLE_HIT_RADIUS_PX: f32 = 6.0;

// =============================================================================
// Export
// =============================================================================

/// Footer text stamped on every exported page
pub const FOOTER_TEXT: &str = "Created with A4Docs";

pub const FOOTER_FONT_SIZE: f32 = 8.0;

/// Footer origin measured from the bottom-left corner (millimeters)
pub const FOOTER_OFFSET_MM: (f32, f32) = (10.0, 5.0);

/// Footer gray level (150/255)
pub const FOOTER_GRAY: f32 = 150.0 / 255.0;

/// Inset between a text block's edge and its text (points)
pub const TEXT_PADDING_PT: f32 = 4.0;

/// Baseline-to-baseline distance as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Distance from the top of a line box to its baseline, as a multiple of the font size
pub const ASCENT_FACTOR: f32 = 0.8;

/// Approximate character width ratios for the standard Helvetica faces
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;
pub const HELVETICA_BOLD_CHAR_WIDTH_RATIO: f32 = 0.56;
