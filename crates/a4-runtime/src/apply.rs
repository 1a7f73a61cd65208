//! Applying worker results to UI-owned state
//!
//! Results are addressed by id. A result for a block or placement that no
//! longer exists is dropped without complaint.

use a4_layout::{BlockCanvas, SignatureOverlay};

use crate::{ImageTarget, LayoutUpdate};

/// Apply `update` to the editor canvas. Returns true if anything changed.
pub fn apply_to_canvas(canvas: &mut BlockCanvas, update: &LayoutUpdate) -> bool {
    match update {
        LayoutUpdate::ImageDecoded {
            target: ImageTarget::Block(id),
            image,
        } => canvas.apply_image(*id, image),
        LayoutUpdate::ImageFailed {
            target: ImageTarget::Block(id),
            message,
        } => {
            log::debug!("Upload for block {} failed: {}", id, message);
            canvas.image_failed(*id);
            false
        }
        _ => false,
    }
}

/// Apply `update` to the signer overlay. Returns true if anything changed.
pub fn apply_to_overlay(overlay: &mut SignatureOverlay, update: &LayoutUpdate) -> bool {
    match update {
        LayoutUpdate::ImageDecoded {
            target: ImageTarget::Library,
            image,
        }
        | LayoutUpdate::SignatureReady { image } => {
            overlay.add_template(image);
            true
        }
        LayoutUpdate::PdfLoaded { pdf, .. } => {
            overlay.load_pages(pdf.pages.clone());
            true
        }
        _ => false,
    }
}
