//! PDF export
//!
//! This module turns percentage geometry into PDF content:
//! - Single-page documents from editor blocks
//! - Signature images stamped onto the pages of an existing PDF
//! - A footer line on every page written
//!
//! Individual images that cannot be embedded are skipped and listed in
//! the returned [`ExportReport`] instead of failing the whole export.

mod editor;
mod footer;
mod image;
mod report;
mod signer;
mod text;

pub use editor::{export_document, export_file_name, render_document};
pub use report::{ExportReport, ExportWarning};
pub use signer::{export_signed_pdf, load_page_sizes, page_sizes, sign_pdf, signed_file_name};
pub use text::{escape_pdf_text, text_width, wrap_text};
