//! Single-page PDF export of an editor document

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use super::footer::{footer_font, footer_ops};
use super::image::{draw_image_ops, embed_image};
use super::report::{ExportReport, ExportWarning};
use super::text::{BOLD_FONT, REGULAR_FONT, text_block_ops};
use crate::geometry::to_page_rect;
use crate::model::{Block, BlockKind};
use crate::options::EditorOptions;
use crate::types::*;

const FOOTER_FONT: &str = "F3";

/// Render `blocks` onto one page, in list order.
///
/// Empty text blocks and image blocks still waiting for their upload are
/// left out silently. An image that cannot be embedded is skipped and
/// reported; everything else still lands in the file.
pub fn render_document(blocks: &[Block], options: &EditorOptions) -> Result<ExportReport> {
    if blocks.is_empty() {
        return Err(LayoutError::NothingToExport);
    }
    options.validate()?;

    let page = options.page_size();
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    fonts.set(REGULAR_FONT, standard_font(&mut doc, "Helvetica"));
    fonts.set(BOLD_FONT, standard_font(&mut doc, "Helvetica-Bold"));
    fonts.set(FOOTER_FONT, doc.add_object(footer_font()));

    let mut xobjects = Dictionary::new();
    let mut warnings = Vec::new();
    let mut content = String::new();

    for block in blocks {
        let rect = to_page_rect(&block.rect, page);
        match &block.kind {
            BlockKind::Text {
                content: text,
                font_size,
                is_bold,
            } => {
                if text.is_empty() {
                    continue;
                }
                content.push_str(&text_block_ops(
                    text,
                    *font_size,
                    *is_bold,
                    &rect,
                    options.text_padding_pt,
                ));
            }
            BlockKind::Image {
                content: data_url, ..
            } => {
                if data_url.is_empty() {
                    log::debug!("Block {} has no image yet, leaving it out", block.id);
                    continue;
                }
                match embed_image(&mut doc, data_url) {
                    Ok(image_id) => {
                        let name = format!("Im{}", xobjects.len() + 1);
                        content.push_str(&draw_image_ops(
                            &name,
                            rect.x,
                            rect.y,
                            rect.width,
                            rect.height,
                        ));
                        xobjects.set(name, image_id);
                    }
                    Err(err) => ExportReport::warn(
                        &mut warnings,
                        ExportWarning::SkippedImage {
                            id: block.id,
                            reason: err.to_string(),
                        },
                    ),
                }
            }
        }
    }

    content.push_str(&footer_ops(FOOTER_FONT, 0.0, 0.0));

    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
    let mut resources = dictionary! { "Font" => fonts };
    if !xobjects.is_empty() {
        resources.set("XObject", xobjects);
    }

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page.width),
            Object::Real(page.height),
        ],
        "Contents" => content_id,
        "Resources" => resources,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    Ok(ExportReport {
        bytes,
        page_count: 1,
        warnings,
    })
}

/// Render off the async runtime and write the file
pub async fn export_document(
    blocks: Vec<Block>,
    options: EditorOptions,
    path: impl AsRef<Path>,
) -> Result<ExportReport> {
    let report = tokio::task::spawn_blocking(move || render_document(&blocks, &options)).await??;
    tokio::fs::write(path.as_ref(), &report.bytes).await?;
    log::info!(
        "Exported {} ({} warnings)",
        path.as_ref().display(),
        report.warnings.len()
    );
    Ok(report)
}

/// File name for an exported document, derived from its title
pub fn export_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "document.pdf".to_string()
    } else {
        format!("{}.pdf", stem)
    }
}

fn standard_font(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    })
}
