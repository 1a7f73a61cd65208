use a4_layout::geometry::{PixelPoint, PixelSize, Rect, pixel_aspect};
use a4_layout::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn image(width: u32, height: u32) -> DecodedImage {
    DecodedImage {
        data_url: "data:image/png;base64,AAAA".to_string(),
        pixel_width: width,
        pixel_height: height,
    }
}

fn canvas() -> BlockCanvas {
    BlockCanvas::new(EditorOptions::default(), PixelSize::new(595.0, 842.0))
}

#[test]
fn test_add_blocks_stack_down_the_page() {
    let mut canvas = canvas();
    let text = canvas.add_block(BlockType::Text);
    let img = canvas.add_block(BlockType::Image);
    let more = canvas.add_block(BlockType::Text);

    assert_eq!(canvas.block(text).unwrap().rect, Rect::new(10.0, 5.0, 80.0, 10.0));
    assert_eq!(canvas.block(img).unwrap().rect, Rect::new(10.0, 20.0, 40.0, 20.0));
    assert_eq!(canvas.block(more).unwrap().rect, Rect::new(10.0, 35.0, 80.0, 10.0));
    assert_eq!(canvas.selected(), Some(more));

    match &canvas.block(text).unwrap().kind {
        BlockKind::Text {
            content,
            font_size,
            is_bold,
        } => {
            assert_eq!(content, "Double-click to edit");
            assert_eq!(*font_size, 14.0);
            assert!(!is_bold);
        }
        other => panic!("expected text block, got {:?}", other),
    }
}

#[test]
fn test_new_image_block_waits_for_upload() {
    let mut canvas = canvas();
    let id = canvas.add_block(BlockType::Image);

    assert_eq!(canvas.pending_upload(), Some(id));
    assert!(canvas.block(id).unwrap().is_pending_image());
    assert_eq!(canvas.block(id).unwrap().kind.aspect_ratio(), None);
}

#[test]
fn test_apply_image_sets_ratio_and_height() {
    let mut canvas = canvas();
    let id = canvas.add_block(BlockType::Image);

    assert!(canvas.apply_image(id, &image(400, 200)));
    let block = canvas.block(id).unwrap();
    assert_eq!(block.kind.aspect_ratio(), Some(2.0));
    assert!(!block.is_pending_image());
    assert!(approx(block.rect.width, 40.0));
    assert!(approx(pixel_aspect(&block.rect, canvas.viewport()), 2.0));
    assert_eq!(canvas.pending_upload(), None);
}

#[test]
fn test_apply_image_stops_at_page_bottom() {
    let mut canvas = canvas();
    let id = canvas.add_block(BlockType::Image);
    canvas.update_block(
        id,
        BlockUpdate {
            y: Some(90.0),
            ..Default::default()
        },
    );

    // A tall image would need far more than the remaining 10%
    canvas.apply_image(id, &image(100, 400));
    let rect = canvas.block(id).unwrap().rect;
    assert!(approx(rect.bottom(), 100.0));
}

#[test]
fn test_apply_image_below_the_page_keeps_bottom_cap() {
    let mut canvas = canvas();
    for _ in 0..7 {
        canvas.add_block(BlockType::Text);
    }
    let id = canvas.add_block(BlockType::Image);
    assert_eq!(canvas.block(id).unwrap().rect.y, 110.0);

    assert!(canvas.apply_image(id, &image(400, 200)));
    let rect = canvas.block(id).unwrap().rect;
    assert_eq!(rect.height, -10.0);
    assert!(approx(rect.bottom(), 100.0));
}

#[test]
fn test_reupload_replaces_ratio() {
    let mut canvas = canvas();
    let id = canvas.add_block(BlockType::Image);
    canvas.apply_image(id, &image(400, 200));

    assert!(canvas.request_upload(id));
    assert_eq!(canvas.pending_upload(), Some(id));
    canvas.apply_image(id, &image(100, 100));
    assert_eq!(canvas.block(id).unwrap().kind.aspect_ratio(), Some(1.0));
}

#[test]
fn test_stale_decode_for_deleted_block_is_ignored() {
    let mut canvas = canvas();
    let id = canvas.add_block(BlockType::Image);
    let other = canvas.add_block(BlockType::Text);
    canvas.delete_block(id);

    assert!(!canvas.apply_image(id, &image(10, 10)));
    assert_eq!(canvas.blocks().len(), 1);
    assert_eq!(canvas.blocks()[0].id, other);
}

#[test]
fn test_failed_upload_leaves_block_empty() {
    let mut canvas = canvas();
    let id = canvas.add_block(BlockType::Image);
    canvas.image_failed(id);

    assert_eq!(canvas.pending_upload(), None);
    assert!(canvas.block(id).unwrap().is_pending_image());
}

#[test]
fn test_text_edit_cancel_and_confirm() {
    let mut canvas = canvas();
    let id = canvas.add_block(BlockType::Text);

    let request = canvas
        .double_click(PixelPoint::new(300.0, 80.0))
        .expect("text block under pointer");
    assert_eq!(request.id, id);
    assert_eq!(request.current, "Double-click to edit");

    assert!(!canvas.finish_text_edit(request.clone(), None));
    assert_eq!(canvas.block(id).unwrap().kind.content(), "Double-click to edit");

    assert!(canvas.finish_text_edit(request.clone(), Some("Hello".to_string())));
    assert_eq!(canvas.block(id).unwrap().kind.content(), "Hello");

    assert!(canvas.finish_text_edit(request, Some(String::new())));
    assert_eq!(canvas.block(id).unwrap().kind.content(), "");
}

#[test]
fn test_double_click_on_image_does_not_edit() {
    let mut canvas = canvas();
    let id = canvas.add_block(BlockType::Image);
    let rect = canvas.block(id).unwrap().rect;
    let inside = PixelPoint::new(
        (rect.x + 1.0) / 100.0 * 595.0,
        (rect.y + 1.0) / 100.0 * 842.0,
    );

    assert_eq!(canvas.double_click(inside), None);
    assert_eq!(canvas.selected(), Some(id));
}

#[test]
fn test_style_update_only_touches_text() {
    let mut canvas = canvas();
    let text = canvas.add_block(BlockType::Text);
    let img = canvas.add_block(BlockType::Image);

    let style = BlockUpdate {
        font_size: Some(20.0),
        is_bold: Some(true),
        ..Default::default()
    };
    assert!(canvas.update_block(text, style.clone()));
    assert!(canvas.update_block(img, style));

    match &canvas.block(text).unwrap().kind {
        BlockKind::Text {
            font_size, is_bold, ..
        } => {
            assert_eq!(*font_size, 20.0);
            assert!(*is_bold);
        }
        other => panic!("expected text block, got {:?}", other),
    }
    assert_eq!(canvas.block(img).unwrap().kind, BlockKind::empty_image());
    assert!(!canvas.update_block(ElementId(999), BlockUpdate::content("x")));
}

#[test]
fn test_load_document_continues_ids() {
    let mut source = canvas();
    source.add_block(BlockType::Text);
    source.add_block(BlockType::Text);
    source.set_title("Letter");

    let document = Document {
        id: DocumentId("7".to_string()),
        owner: OwnerId::new("ada"),
        title: "Letter".to_string(),
        blocks: source.blocks().to_vec(),
        created_at: 1,
        updated_at: 2,
    };

    let mut canvas = canvas();
    canvas.load_document(&document);
    assert_eq!(canvas.blocks(), document.blocks.as_slice());
    assert_eq!(canvas.title(), "Letter");
    assert_eq!(canvas.document_id(), Some(&document.id));
    assert_eq!(canvas.selected(), None);

    let fresh = canvas.add_block(BlockType::Image);
    assert!(document.blocks.iter().all(|b| b.id != fresh));

    let draft = canvas.snapshot();
    assert_eq!(draft.title, "Letter");
    assert_eq!(draft.blocks.len(), 3);

    canvas.new_document();
    assert!(canvas.is_empty());
    assert_eq!(canvas.document_id(), None);
    assert_eq!(canvas.snapshot().effective_title(), "Untitled Document");
}
