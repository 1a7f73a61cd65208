use lopdf::{Dictionary, dictionary};

use crate::constants::{FOOTER_FONT_SIZE, FOOTER_GRAY, FOOTER_OFFSET_MM, FOOTER_TEXT, mm_to_pt};

use super::text::escape_pdf_text;

/// Font dictionary for the footer line
pub(crate) fn footer_font() -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Gray footer line near the bottom-left corner of a page whose box
/// starts at (`origin_x`, `origin_y`)
pub(crate) fn footer_ops(font: &str, origin_x: f32, origin_y: f32) -> String {
    let x = origin_x + mm_to_pt(FOOTER_OFFSET_MM.0);
    let y = origin_y + mm_to_pt(FOOTER_OFFSET_MM.1);
    format!(
        "q BT {gray:.3} g /{font} {size:.1} Tf 1 0 0 1 {x:.3} {y:.3} Tm ({text}) Tj ET Q\n",
        gray = FOOTER_GRAY,
        font = font,
        size = FOOTER_FONT_SIZE,
        x = x,
        y = y,
        text = escape_pdf_text(FOOTER_TEXT),
    )
}
