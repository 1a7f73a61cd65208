use a4_layout::geometry::{PixelSize, Rect};
use a4_layout::*;

fn owner(name: &str) -> OwnerId {
    OwnerId::new(name)
}

fn blocks() -> Vec<Block> {
    vec![
        Block {
            id: ElementId(1),
            rect: Rect::new(10.0, 5.0, 80.0, 10.0),
            kind: BlockKind::Text {
                content: "Dear Ada,".to_string(),
                font_size: 18.0,
                is_bold: true,
            },
        },
        Block {
            id: ElementId(2),
            rect: Rect::new(10.0, 20.0, 40.0, 20.0),
            kind: BlockKind::Image {
                content: "data:image/png;base64,AAAA".to_string(),
                aspect_ratio: Some(2.0),
            },
        },
    ]
}

// =============================================================================
// Serialization
// =============================================================================

#[cfg(feature = "serde")]
mod serialization {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_json_shape() {
        let value = serde_json::to_value(&blocks()).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "id": 1, "x": 10.0, "y": 5.0, "width": 80.0, "height": 10.0,
                    "type": "text", "content": "Dear Ada,", "fontSize": 18.0, "isBold": true
                },
                {
                    "id": 2, "x": 10.0, "y": 20.0, "width": 40.0, "height": 20.0,
                    "type": "image", "content": "data:image/png;base64,AAAA", "aspectRatio": 2.0
                }
            ])
        );
    }

    #[test]
    fn test_block_defaults_when_reading() {
        let text: Block = serde_json::from_value(json!({
            "id": 3, "x": 0, "y": 0, "width": 50, "height": 10,
            "type": "text", "content": "Hi"
        }))
        .unwrap();
        assert_eq!(text.kind, BlockKind::text("Hi"));

        let image: Block = serde_json::from_value(json!({
            "id": 4, "x": 0, "y": 0, "width": 50, "height": 10, "type": "image"
        }))
        .unwrap();
        assert!(image.is_pending_image());
        assert_eq!(image.kind.aspect_ratio(), None);
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let result: std::result::Result<Block, _> = serde_json::from_value(json!({
            "id": 5, "x": 0, "y": 0, "width": 50, "height": 10, "type": "video"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_document_round_trip() {
        let document = Document {
            id: DocumentId("12".to_string()),
            owner: owner("ada"),
            title: "Letter".to_string(),
            blocks: blocks(),
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_500,
        };

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["id"], "12");
        assert_eq!(value["createdAt"], 1_700_000_000_000i64);
        assert_eq!(value["updatedAt"], 1_700_000_000_500i64);

        let back: Document = serde_json::from_value(value).unwrap();
        assert_eq!(back, document);
    }

    #[tokio::test]
    async fn test_import_browser_saved_documents() {
        let drafts: Vec<DocumentDraft> = serde_json::from_value(json!([
            {
                "id": "1712345678000",
                "title": "Doc",
                "blocks": [
                    {
                        "id": "1712345678901", "type": "text", "content": "Hi",
                        "x": 10, "y": 5, "width": 80, "height": 10,
                        "fontSize": 16, "isBold": false
                    },
                    {
                        "id": "1712345679999", "type": "image", "content": "",
                        "x": 10, "y": 20, "width": 30, "height": 20
                    }
                ],
                "createdAt": 1712345678000i64,
                "updatedAt": 1712345680000i64
            }
        ]))
        .unwrap();

        assert_eq!(drafts[0].blocks[0].id, ElementId(1_712_345_678_901));
        assert_eq!(drafts[0].blocks[1].id, ElementId(1_712_345_679_999));
        assert_eq!(drafts[0].created_at, Some(1_712_345_678_000));

        let ada = owner("ada");
        let store = MemoryStore::new();
        let imported = store.import(&ada, drafts).await.unwrap();
        assert_eq!(imported[0].title, "Doc");
        assert_eq!(imported[0].blocks.len(), 2);

        // New blocks continue past the imported ids
        let mut canvas = BlockCanvas::new(EditorOptions::default(), PixelSize::new(595.0, 842.0));
        canvas.load_document(&imported[0]);
        assert_eq!(canvas.add_block(BlockType::Text), ElementId(1_712_345_680_000));
    }

    #[test]
    fn test_element_id_rejects_non_numeric_strings() {
        assert!(serde_json::from_value::<ElementId>(json!("abc")).is_err());
        assert!(serde_json::from_value::<ElementId>(json!(-4)).is_err());
        assert_eq!(serde_json::from_value::<ElementId>(json!(" 12 ")).unwrap(), ElementId(12));
        assert_eq!(serde_json::to_value(ElementId(12)).unwrap(), json!(12));
    }

    #[test]
    fn test_placement_json_shape() {
        let placement = SignaturePlacement {
            id: ElementId(7),
            page_number: 2,
            image_data: "data:image/png;base64,AAAA".to_string(),
            rect: Rect::new(20.0, 20.0, 30.0, 15.0),
            aspect_ratio: 3.0,
        };
        let value = serde_json::to_value(&placement).unwrap();
        assert_eq!(value["pageNumber"], 2);
        assert_eq!(value["imageData"], "data:image/png;base64,AAAA");
        assert_eq!(value["aspectRatio"], 3.0);
        assert_eq!(value["x"], 20.0);
    }
}

// =============================================================================
// Memory Store
// =============================================================================

#[tokio::test]
async fn test_save_assigns_id_and_title() {
    let store = MemoryStore::new();
    let saved = store
        .save(&owner("ada"), DocumentDraft::new("  ", blocks()))
        .await
        .unwrap();

    assert_eq!(saved.title, "Untitled Document");
    assert_eq!(saved.blocks, blocks());
    assert_eq!(saved.created_at, saved.updated_at);
    assert_eq!(saved.owner, owner("ada"));
}

#[tokio::test]
async fn test_load_orders_by_last_update() {
    let store = MemoryStore::new();
    let ada = owner("ada");
    let first = store.save(&ada, DocumentDraft::new("First", vec![])).await.unwrap();
    let second = store.save(&ada, DocumentDraft::new("Second", vec![])).await.unwrap();
    store
        .save(&owner("grace"), DocumentDraft::new("Other", vec![]))
        .await
        .unwrap();

    let titles: Vec<_> = store.load(&ada).await.unwrap().into_iter().map(|d| d.title).collect();
    assert_eq!(titles, vec!["Second", "First"]);
    assert!(second.updated_at > first.updated_at);

    store
        .update(
            &ada,
            &first.id,
            DocumentPatch {
                blocks: Some(blocks()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let loaded = store.load(&ada).await.unwrap();
    assert_eq!(loaded[0].id, first.id);
    assert_eq!(loaded[0].title, "First");
    assert_eq!(loaded[0].blocks, blocks());
    assert_eq!(loaded.len(), 2);
}

#[tokio::test]
async fn test_update_with_blank_title_keeps_title() {
    let store = MemoryStore::new();
    let ada = owner("ada");
    let saved = store.save(&ada, DocumentDraft::new("Letter", blocks())).await.unwrap();

    let updated = store
        .update(
            &ada,
            &saved.id,
            DocumentPatch {
                title: Some(String::new()),
                blocks: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Letter");
    assert_eq!(updated.blocks, blocks());
    assert_eq!(updated.created_at, saved.created_at);
    assert!(updated.updated_at > saved.updated_at);

    let renamed = store
        .update(
            &ada,
            &saved.id,
            DocumentPatch {
                title: Some("Reply".to_string()),
                blocks: Some(vec![]),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.title, "Reply");
    assert!(renamed.blocks.is_empty());
}

#[tokio::test]
async fn test_other_owners_documents_are_invisible() {
    let store = MemoryStore::new();
    let saved = store
        .save(&owner("ada"), DocumentDraft::new("Private", vec![]))
        .await
        .unwrap();

    let grace = owner("grace");
    let result = store.update(&grace, &saved.id, DocumentPatch::default()).await;
    assert!(matches!(result, Err(LayoutError::DocumentNotFound(id)) if id == saved.id));
    assert!(!store.delete(&grace, &saved.id).await.unwrap());
    assert!(store.load(&grace).await.unwrap().is_empty());

    let missing = DocumentId("missing".to_string());
    assert!(store.update(&owner("ada"), &missing, DocumentPatch::default()).await.is_err());
}

#[tokio::test]
async fn test_delete() {
    let store = MemoryStore::new();
    let ada = owner("ada");
    let saved = store.save(&ada, DocumentDraft::new("Gone", vec![])).await.unwrap();

    assert!(store.delete(&ada, &saved.id).await.unwrap());
    assert!(!store.delete(&ada, &saved.id).await.unwrap());
    assert!(store.load(&ada).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_import_keeps_creation_time() {
    let store = MemoryStore::new();
    let ada = owner("ada");
    let drafts = vec![
        DocumentDraft {
            title: "Old".to_string(),
            blocks: blocks(),
            created_at: Some(1_000),
        },
        DocumentDraft::new("New", vec![]),
    ];

    let imported = store.import(&ada, drafts).await.unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].created_at, 1_000);
    assert!(imported[0].updated_at > 1_000);
    assert_eq!(imported[1].created_at, imported[1].updated_at);
    assert_ne!(imported[0].id, imported[1].id);
}

// =============================================================================
// File Store
// =============================================================================

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_file_store_persists_between_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("documents.json");
    let ada = owner("ada");

    let store = JsonFileStore::new(&path);
    assert!(store.load(&ada).await.unwrap().is_empty());
    let first = store.save(&ada, DocumentDraft::new("Letter", blocks())).await.unwrap();
    assert!(path.exists());

    let reopened = JsonFileStore::new(&path);
    let loaded = reopened.load(&ada).await.unwrap();
    assert_eq!(loaded, vec![first.clone()]);

    let second = reopened.save(&ada, DocumentDraft::new("Memo", vec![])).await.unwrap();
    assert_ne!(second.id, first.id);
    assert!(second.updated_at > first.updated_at);

    assert!(store.delete(&ada, &first.id).await.unwrap());
    assert_eq!(reopened.load(&ada).await.unwrap(), vec![second]);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("documents.json");
    std::fs::write(&path, "not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(
        store.load(&owner("ada")).await,
        Err(LayoutError::Serialization(_))
    ));
}

// =============================================================================
// Options and Session
// =============================================================================

#[test]
fn test_default_options_are_valid() {
    assert!(EditorOptions::default().validate().is_ok());
}

#[test]
fn test_invalid_options() {
    let options = EditorOptions {
        min_width_pct: 0.0,
        ..Default::default()
    };
    assert!(matches!(options.validate(), Err(LayoutError::Config(_))));

    let options = EditorOptions {
        paper: PaperSize::Custom {
            width_mm: -1.0,
            height_mm: 100.0,
        },
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_options_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    let options = EditorOptions {
        paper: PaperSize::Letter,
        default_font_size: 12.0,
        ..Default::default()
    };

    options.save(&path).await.unwrap();
    let loaded = EditorOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);

    std::fs::write(&path, r#"{"minHeightPct": 500}"#).unwrap();
    // Unknown keys fall back to defaults
    assert!(EditorOptions::load(&path).await.is_ok());

    std::fs::write(&path, r#"{"min_height_pct": 500}"#).unwrap();
    assert!(matches!(
        EditorOptions::load(&path).await,
        Err(LayoutError::Config(_))
    ));
}

#[test]
fn test_session() {
    let guest = EditorSession::default();
    assert!(!guest.is_signed_in());

    let bad = EditorOptions {
        handle_hit_radius_px: 0.0,
        ..Default::default()
    };
    assert!(EditorSession::start(Some(owner("ada")), bad).is_err());

    let session = EditorSession::start(Some(owner("ada")), EditorOptions::default()).unwrap();
    assert!(session.is_signed_in());

    let mut canvas = session.canvas(PixelSize::new(595.0, 842.0));
    canvas.add_block(BlockType::Text);
    assert_eq!(canvas.blocks().len(), 1);

    let overlay = session.overlay(PixelSize::new(612.0, 792.0));
    assert_eq!(overlay.page_count(), 0);
}
