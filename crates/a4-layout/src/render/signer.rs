//! Stamping signature placements into an existing PDF
//!
//! The source file is modified in place: each page's content is wrapped
//! in `q ... Q` so the original graphics state cannot leak into ours, and
//! the images and footer font are merged into the page's resources.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::footer::{footer_font, footer_ops};
use super::image::{draw_image_ops, embed_image};
use super::report::{ExportReport, ExportWarning};
use crate::geometry::to_page_rect;
use crate::model::SignaturePlacement;
use crate::types::*;

const FOOTER_FONT: &str = "A4Foot";
const SIGNATURE_PREFIX: &str = "A4Sig";

/// Visible box of a page in default user space
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageBox {
    x: f32,
    y: f32,
    size: PageSize,
}

// =============================================================================
// Page Geometry
// =============================================================================

/// Native size of every page, in page order
pub fn page_sizes(doc: &Document) -> Vec<PageSize> {
    doc.get_pages()
        .values()
        .map(|&id| page_box(doc, id).size)
        .collect()
}

/// Parse a PDF and read its page sizes
pub fn load_page_sizes(bytes: &[u8]) -> Result<Vec<PageSize>> {
    let doc = Document::load_mem(bytes)?;
    Ok(page_sizes(&doc))
}

/// The page's MediaBox, following `Parent` links for inherited boxes
fn page_box(doc: &Document, page_id: ObjectId) -> PageBox {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let Ok(dict) = doc.get_dictionary(id) else {
            break;
        };
        if let Some(found) = media_box(doc, dict) {
            return found;
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }

    log::debug!("Page {:?} has no MediaBox, assuming A4", page_id);
    PageBox {
        x: 0.0,
        y: 0.0,
        size: PaperSize::A4.page_size(),
    }
}

fn media_box(doc: &Document, dict: &Dictionary) -> Option<PageBox> {
    let array = resolve(doc, dict.get(b"MediaBox").ok()?).as_array().ok()?;
    if array.len() != 4 {
        return None;
    }
    let coords: Vec<f32> = array.iter().map(number).collect::<Option<_>>()?;
    let (x0, x1) = (coords[0].min(coords[2]), coords[0].max(coords[2]));
    let (y0, y1) = (coords[1].min(coords[3]), coords[1].max(coords[3]));
    Some(PageBox {
        x: x0,
        y: y0,
        size: PageSize::new(x1 - x0, y1 - y0),
    })
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

// =============================================================================
// Signing
// =============================================================================

/// Stamp `placements` into the PDF in `pdf_bytes`.
///
/// Placements are drawn in list order. A placement whose page does not
/// exist, or whose image cannot be embedded, is skipped and reported.
pub fn sign_pdf(pdf_bytes: &[u8], placements: &[SignaturePlacement]) -> Result<ExportReport> {
    if placements.is_empty() {
        return Err(LayoutError::NothingToExport);
    }

    let mut doc = Document::load_mem(pdf_bytes)?;
    let pages = doc.get_pages();
    let page_count = pages.len();
    let mut warnings = Vec::new();

    let mut by_page: BTreeMap<u32, Vec<&SignaturePlacement>> = BTreeMap::new();
    for placement in placements {
        if pages.contains_key(&placement.page_number) {
            by_page
                .entry(placement.page_number)
                .or_default()
                .push(placement);
        } else {
            ExportReport::warn(
                &mut warnings,
                ExportWarning::InvalidPage {
                    id: placement.id,
                    page_number: placement.page_number,
                    page_count,
                },
            );
        }
    }

    let footer_font_id = doc.add_object(footer_font());
    let mut image_count = 0usize;

    for (number, &page_id) in &pages {
        let bounds = page_box(&doc, page_id);
        let mut ops = String::new();
        let mut images = Dictionary::new();

        for placement in by_page.get(number).into_iter().flatten() {
            match embed_image(&mut doc, &placement.image_data) {
                Ok(image_id) => {
                    image_count += 1;
                    let name = format!("{}{}", SIGNATURE_PREFIX, image_count);
                    let rect = to_page_rect(&placement.rect, bounds.size);
                    ops.push_str(&draw_image_ops(
                        &name,
                        bounds.x + rect.x,
                        bounds.y + rect.y,
                        rect.width,
                        rect.height,
                    ));
                    images.set(name, image_id);
                }
                Err(err) => ExportReport::warn(
                    &mut warnings,
                    ExportWarning::SkippedImage {
                        id: placement.id,
                        reason: err.to_string(),
                    },
                ),
            }
        }
        ops.push_str(&footer_ops(FOOTER_FONT, bounds.x, bounds.y));

        let mut fonts = Dictionary::new();
        fonts.set(FOOTER_FONT, footer_font_id);
        merge_resources(&mut doc, page_id, images, fonts)?;
        wrap_contents(&mut doc, page_id, ops)?;
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    Ok(ExportReport {
        bytes,
        page_count,
        warnings,
    })
}

/// Sign off the async runtime and write the file
pub async fn export_signed_pdf(
    pdf_bytes: Vec<u8>,
    placements: Vec<SignaturePlacement>,
    path: impl AsRef<Path>,
) -> Result<ExportReport> {
    let report =
        tokio::task::spawn_blocking(move || sign_pdf(&pdf_bytes, &placements)).await??;
    tokio::fs::write(path.as_ref(), &report.bytes).await?;
    log::info!(
        "Signed PDF written to {} ({} warnings)",
        path.as_ref().display(),
        report.warnings.len()
    );
    Ok(report)
}

/// `contract.pdf` becomes `contract_signed.pdf`
pub fn signed_file_name(source: impl AsRef<Path>) -> String {
    let stem = source
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string());
    format!("{}_signed.pdf", stem)
}

// =============================================================================
// Page Surgery
// =============================================================================

/// The page's effective resources as an owned dictionary
fn effective_resources(doc: &Document, page_id: ObjectId) -> Dictionary {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let Ok(dict) = doc.get_dictionary(id) else {
            break;
        };
        if let Ok(resources) = dict.get(b"Resources") {
            if let Ok(found) = resolve(doc, resources).as_dict() {
                return found.clone();
            }
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    Dictionary::new()
}

/// Give the page a direct Resources dictionary that includes `xobjects`
/// and `fonts` on top of what it already had
fn merge_resources(
    doc: &mut Document,
    page_id: ObjectId,
    xobjects: Dictionary,
    fonts: Dictionary,
) -> Result<()> {
    let mut resources = effective_resources(doc, page_id);

    for (category, additions) in [(&b"XObject"[..], xobjects), (&b"Font"[..], fonts)] {
        if additions.is_empty() {
            continue;
        }
        let mut merged = resources
            .get(category)
            .ok()
            .and_then(|obj| resolve(doc, obj).as_dict().ok())
            .cloned()
            .unwrap_or_else(Dictionary::new);
        for (key, value) in additions.iter() {
            merged.set(key.clone(), value.clone());
        }
        resources.set(category, merged);
    }

    doc.get_dictionary_mut(page_id)?
        .set("Resources", resources);
    Ok(())
}

/// Isolate the existing content and append `ops` after it
fn wrap_contents(doc: &mut Document, page_id: ObjectId, ops: String) -> Result<()> {
    let existing: Vec<Object> = match doc.get_dictionary(page_id)?.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    let open_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let close_id = doc.add_object(Stream::new(
        Dictionary::new(),
        format!("Q\n{}", ops).into_bytes(),
    ));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(open_id));
    contents.extend(existing);
    contents.push(Object::Reference(close_id));

    doc.get_dictionary_mut(page_id)?
        .set("Contents", Object::Array(contents));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_file_name() {
        assert_eq!(signed_file_name("contract.pdf"), "contract_signed.pdf");
        assert_eq!(signed_file_name("/tmp/a.b.pdf"), "a.b_signed.pdf");
        assert_eq!(signed_file_name(""), "document_signed.pdf");
    }
}
