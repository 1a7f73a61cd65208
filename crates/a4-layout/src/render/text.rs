//! Text layout with the standard Helvetica faces
//!
//! Widths are estimated from a fixed per-character ratio, which is close
//! enough for wrapping prose inside a block.

use crate::constants::{
    ASCENT_FACTOR, HELVETICA_BOLD_CHAR_WIDTH_RATIO, HELVETICA_CHAR_WIDTH_RATIO, LINE_HEIGHT_FACTOR,
};
use crate::geometry::PageRect;

/// Resource name of the regular face
pub(crate) const REGULAR_FONT: &str = "F1";
/// Resource name of the bold face
pub(crate) const BOLD_FONT: &str = "F2";

/// Approximate rendered width of `text` in points
pub fn text_width(text: &str, font_size: f32, bold: bool) -> f32 {
    let ratio = if bold {
        HELVETICA_BOLD_CHAR_WIDTH_RATIO
    } else {
        HELVETICA_CHAR_WIDTH_RATIO
    };
    text.chars().count() as f32 * font_size * ratio
}

/// Break `text` into lines no wider than `max_width` points.
///
/// Explicit newlines always start a new line. Words longer than a whole
/// line are split between characters.
pub fn wrap_text(text: &str, font_size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };

            if text_width(&candidate, font_size, bold) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            // Split a word that cannot fit on any line by itself
            for ch in word.chars() {
                line.push(ch);
                if text_width(&line, font_size, bold) > max_width && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(ch);
                }
            }
        }

        lines.push(line);
    }

    lines
}

/// Escape text for a PDF literal string in WinAnsi encoding.
///
/// Characters outside Latin-1 have no code in the standard fonts and are
/// replaced by `?`.
pub fn escape_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ if (ch as u32) <= 0xFF => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out
}

/// Content operators for a text block laid out inside `rect`
pub(crate) fn text_block_ops(
    content: &str,
    font_size: f32,
    bold: bool,
    rect: &PageRect,
    padding: f32,
) -> String {
    let max_width = (rect.width - 2.0 * padding).max(0.0);
    let font = if bold { BOLD_FONT } else { REGULAR_FONT };
    let x = rect.x + padding;
    let first_baseline = rect.top() - padding - font_size * ASCENT_FACTOR;
    let leading = font_size * LINE_HEIGHT_FACTOR;

    let mut ops = format!("BT 0 g /{} {:.2} Tf\n", font, font_size);
    for (i, line) in wrap_text(content, font_size, bold, max_width)
        .iter()
        .enumerate()
    {
        if line.is_empty() {
            continue;
        }
        let y = first_baseline - i as f32 * leading;
        ops.push_str(&format!(
            "1 0 0 1 {:.3} {:.3} Tm ({}) Tj\n",
            x,
            y,
            escape_pdf_text(line)
        ));
    }
    ops.push_str("ET\n");
    ops
}
