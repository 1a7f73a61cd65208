use std::io::Cursor;

use a4_layout::geometry::Rect;
use a4_layout::*;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, Stream};

fn png_data_url() -> String {
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([0, 0, 0, 200]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    to_data_url("image/png", &bytes)
}

fn jpeg_data_url() -> String {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 30, 30]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .unwrap();
    to_data_url("image/jpeg", &bytes)
}

fn text_block(id: u64, content: &str, rect: Rect) -> Block {
    Block {
        id: ElementId(id),
        rect,
        kind: BlockKind::text(content),
    }
}

fn image_block(id: u64, data_url: String, rect: Rect) -> Block {
    Block {
        id: ElementId(id),
        rect,
        kind: BlockKind::Image {
            content: data_url,
            aspect_ratio: Some(2.0),
        },
    }
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("not a number: {:?}", other),
    }
}

/// Text shown on a page with the position of its text matrix
fn shown_text(doc: &Document, page_id: lopdf::ObjectId) -> Vec<(String, f32, f32)> {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let mut position = (0.0, 0.0);
    let mut shown = Vec::new();
    for op in content.operations {
        match op.operator.as_str() {
            "Tm" => position = (number(&op.operands[4]), number(&op.operands[5])),
            "Tj" => {
                if let Object::String(bytes, _) = &op.operands[0] {
                    shown.push((String::from_utf8_lossy(bytes).into_owned(), position.0, position.1));
                }
            }
            _ => {}
        }
    }
    shown
}

fn create_test_pdf(num_pages: usize, inherit_media_box: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let media_box = Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ]);

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q\n".to_vec()));
        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]);
        if !inherit_media_box {
            page.set("MediaBox", media_box.clone());
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    if inherit_media_box {
        pages.set("MediaBox", media_box);
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

// =============================================================================
// Editor Export
// =============================================================================

#[test]
fn test_text_export_has_text_and_footer() {
    let blocks = vec![text_block(1, "Hello", Rect::new(10.0, 10.0, 80.0, 10.0))];
    let report = render_document(&blocks, &EditorOptions::default()).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.page_count, 1);

    let doc = Document::load_mem(&report.bytes).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.get(&1).unwrap();

    let shown = shown_text(&doc, page_id);
    let page = PaperSize::A4.page_size();

    let (_, x, y) = shown.iter().find(|(t, _, _)| t == "Hello").unwrap();
    assert!(*x > page.width * 0.1 && *x < page.width * 0.15);
    assert!(*y < page.height * 0.9 && *y > page.height * 0.85);

    let (_, fx, fy) = shown
        .iter()
        .find(|(t, _, _)| t == "Created with A4Docs")
        .unwrap();
    assert!(*fx < 40.0);
    assert!(*fy < 20.0);
}

#[test]
fn test_long_text_wraps_inside_block() {
    let content = "lorem ipsum dolor sit amet ".repeat(8);
    let blocks = vec![text_block(1, &content, Rect::new(10.0, 10.0, 30.0, 30.0))];
    let report = render_document(&blocks, &EditorOptions::default()).unwrap();

    let doc = Document::load_mem(&report.bytes).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    let lines: Vec<_> = shown_text(&doc, page_id)
        .into_iter()
        .filter(|(t, _, _)| t != "Created with A4Docs")
        .collect();

    assert!(lines.len() > 1);
    let page = PaperSize::A4.page_size();
    let max_width = page.width * 0.3 - 8.0;
    for (text, _, _) in &lines {
        assert!(render::text_width(text, 14.0, false) <= max_width, "{}", text);
    }
    for pair in lines.windows(2) {
        assert!(pair[1].2 < pair[0].2);
    }
}

#[test]
fn test_images_are_embedded() {
    let blocks = vec![
        image_block(1, png_data_url(), Rect::new(10.0, 10.0, 40.0, 10.0)),
        image_block(2, jpeg_data_url(), Rect::new(10.0, 30.0, 40.0, 20.0)),
    ];
    let report = render_document(&blocks, &EditorOptions::default()).unwrap();
    assert!(report.is_complete());

    let doc = Document::load_mem(&report.bytes).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    assert_eq!(xobjects.len(), 2);
}

#[test]
fn test_bad_image_is_skipped_with_one_warning() {
    let bogus = to_data_url("text/plain", b"this is not an image");
    let blocks = vec![
        image_block(1, png_data_url(), Rect::new(10.0, 10.0, 40.0, 10.0)),
        image_block(2, bogus, Rect::new(10.0, 30.0, 40.0, 20.0)),
    ];
    let report = render_document(&blocks, &EditorOptions::default()).unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        ExportWarning::SkippedImage { id, .. } if *id == ElementId(2)
    ));
    assert!(Document::load_mem(&report.bytes).is_ok());
}

#[test]
fn test_empty_content_is_left_out_silently() {
    let blocks = vec![
        text_block(1, "", Rect::new(10.0, 10.0, 80.0, 10.0)),
        Block {
            id: ElementId(2),
            rect: Rect::new(10.0, 30.0, 40.0, 20.0),
            kind: BlockKind::empty_image(),
        },
    ];
    let report = render_document(&blocks, &EditorOptions::default()).unwrap();
    assert!(report.is_complete());
}

#[test]
fn test_nothing_to_export() {
    let result = render_document(&[], &EditorOptions::default());
    assert!(matches!(result, Err(LayoutError::NothingToExport)));
}

#[test]
fn test_letter_paper_page_size() {
    let options = EditorOptions {
        paper: PaperSize::Letter,
        ..Default::default()
    };
    let blocks = vec![text_block(1, "Hi", Rect::new(0.0, 0.0, 50.0, 10.0))];
    let report = render_document(&blocks, &options).unwrap();

    let sizes = render::load_page_sizes(&report.bytes).unwrap();
    assert_eq!(sizes.len(), 1);
    assert!((sizes[0].width - 612.0).abs() < 0.1);
    assert!((sizes[0].height - 792.0).abs() < 0.1);
}

#[tokio::test]
async fn test_export_document_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(export_file_name("My Letter"));
    let blocks = vec![text_block(1, "Hello", Rect::new(10.0, 10.0, 80.0, 10.0))];

    let report = export_document(blocks, EditorOptions::default(), &path)
        .await
        .unwrap();

    assert!(path.ends_with("My_Letter.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), report.bytes);
}

// =============================================================================
// Signing
// =============================================================================

fn placement(id: u64, page_number: u32, image_data: String) -> SignaturePlacement {
    SignaturePlacement {
        id: ElementId(id),
        page_number,
        image_data,
        rect: Rect::new(10.0, 80.0, 30.0, 10.0),
        aspect_ratio: 2.0,
    }
}

#[test]
fn test_sign_skips_invalid_page() {
    let pdf = create_test_pdf(2, false);
    let placements = vec![placement(1, 2, png_data_url()), placement(2, 5, png_data_url())];

    let report = sign_pdf(&pdf, &placements).unwrap();
    assert_eq!(report.page_count, 2);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(
        report.warnings[0],
        ExportWarning::InvalidPage {
            id: ElementId(2),
            page_number: 5,
            page_count: 2,
        }
    );

    let doc = Document::load_mem(&report.bytes).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 2);

    let page = doc.get_dictionary(*pages.get(&2).unwrap()).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    assert_eq!(xobjects.len(), 1);

    let page_one = doc.get_dictionary(*pages.get(&1).unwrap()).unwrap();
    let resources = page_one.get(b"Resources").unwrap().as_dict().unwrap();
    assert!(resources.get(b"XObject").is_err());
}

#[test]
fn test_sign_keeps_original_content_and_adds_footer() {
    let pdf = create_test_pdf(1, false);
    let report = sign_pdf(&pdf, &[placement(1, 1, jpeg_data_url())]).unwrap();
    assert!(report.is_complete());

    let doc = Document::load_mem(&report.bytes).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let contents = page.get(b"Contents").unwrap().as_array().unwrap();
    assert_eq!(contents.len(), 3);

    let shown = shown_text(&doc, page_id);
    assert!(shown.iter().any(|(t, _, _)| t == "Created with A4Docs"));
}

#[test]
fn test_sign_places_image_in_points() {
    let pdf = create_test_pdf(1, false);
    let report = sign_pdf(&pdf, &[placement(1, 1, png_data_url())]).unwrap();

    let doc = Document::load_mem(&report.bytes).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let cm = content
        .operations
        .iter()
        .find(|op| op.operator == "cm")
        .unwrap();
    let values: Vec<f32> = cm.operands.iter().map(number).collect();

    // {10,80,30,10} on 612x792
    assert!((values[0] - 183.6).abs() < 0.01);
    assert!((values[3] - 79.2).abs() < 0.01);
    assert!((values[4] - 61.2).abs() < 0.01);
    assert!((values[5] - 79.2).abs() < 0.01);
}

#[test]
fn test_page_sizes_follow_parent() {
    let pdf = create_test_pdf(3, true);
    let sizes = render::load_page_sizes(&pdf).unwrap();
    assert_eq!(sizes, vec![PageSize::new(612.0, 792.0); 3]);
}

#[test]
fn test_sign_without_placements() {
    let pdf = create_test_pdf(1, false);
    assert!(matches!(
        sign_pdf(&pdf, &[]),
        Err(LayoutError::NothingToExport)
    ));
}

#[tokio::test]
async fn test_load_and_export_signed() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("contract.pdf");
    std::fs::write(&source, create_test_pdf(2, false)).unwrap();

    let loaded = load_pdf(&source).await.unwrap();
    assert_eq!(loaded.page_count(), 2);

    let target = dir.path().join(signed_file_name(&source));
    let report = export_signed_pdf(loaded.bytes, vec![placement(1, 1, png_data_url())], &target)
        .await
        .unwrap();

    assert!(target.ends_with("contract_signed.pdf"));
    assert!(report.is_complete());
    assert!(target.exists());
}
