//! Block canvas for the document editor
//!
//! Owns the ordered block list of the open document. List order is paint
//! order and export order. All mutation of blocks goes through here.

use crate::constants::DEFAULT_TEXT_CONTENT;
use crate::geometry::{PixelPoint, PixelSize, Rect, height_for_width, place_default};
use crate::image_data::DecodedImage;
use crate::interact::{Editable, GestureController, HitTarget, KeyAction, KeyInput, hit_test};
use crate::model::{Block, BlockKind, BlockType, BlockUpdate, Document, DocumentDraft};
use crate::options::EditorOptions;
use crate::types::{DocumentId, ElementId, IdGenerator};

/// Pending request for the user to edit a text block.
///
/// The UI shows whatever editor it likes and hands the answer back to
/// [`BlockCanvas::finish_text_edit`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditRequest {
    pub id: ElementId,
    pub current: String,
}

impl Editable for [Block] {
    fn rect_of(&self, id: ElementId) -> Option<Rect> {
        self.iter().find(|b| b.id == id).map(|b| b.rect)
    }

    fn aspect_ratio_of(&self, id: ElementId) -> Option<f32> {
        self.iter()
            .find(|b| b.id == id)
            .and_then(|b| b.kind.aspect_ratio())
    }

    fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.iter_mut().find(|b| b.id == id) {
            Some(block) => {
                block.rect = rect;
                true
            }
            None => false,
        }
    }
}

pub struct BlockCanvas {
    blocks: Vec<Block>,
    controller: GestureController,
    ids: IdGenerator,
    options: EditorOptions,
    viewport: PixelSize,
    /// Image block waiting for a file from the user
    pending_upload: Option<ElementId>,
    document_id: Option<DocumentId>,
    title: String,
}

impl BlockCanvas {
    /// Create an empty canvas displayed at `viewport` pixels
    pub fn new(options: EditorOptions, viewport: PixelSize) -> Self {
        Self {
            blocks: Vec::new(),
            controller: GestureController::new((&options).into()),
            ids: IdGenerator::new(),
            options,
            viewport,
            pending_upload: None,
            document_id: None,
            title: String::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: ElementId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.controller.selected()
    }

    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn viewport(&self) -> PixelSize {
        self.viewport
    }

    /// The displayed page changed size
    pub fn set_viewport(&mut self, viewport: PixelSize) {
        self.viewport = viewport;
    }

    pub fn pending_upload(&self) -> Option<ElementId> {
        self.pending_upload
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document_id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // =========================================================================
    // Block Operations
    // =========================================================================

    /// Append a block at its default position and select it.
    ///
    /// A new image block is empty until [`apply_image`](Self::apply_image)
    /// delivers its content; the canvas records it as waiting for upload.
    pub fn add_block(&mut self, block_type: BlockType) -> ElementId {
        let id = self.ids.next_id();
        let rect = place_default(self.blocks.len(), block_type);
        let kind = match block_type {
            BlockType::Text => BlockKind::Text {
                content: DEFAULT_TEXT_CONTENT.to_string(),
                font_size: self.options.default_font_size,
                is_bold: false,
            },
            BlockType::Image => {
                self.pending_upload = Some(id);
                BlockKind::empty_image()
            }
        };

        self.blocks.push(Block { id, rect, kind });
        self.controller.select(Some(id));
        log::debug!("Added {:?} block {}", block_type, id);
        id
    }

    /// Shallow-merge `update` into the block. Returns false if it is gone.
    pub fn update_block(&mut self, id: ElementId, update: BlockUpdate) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == id) {
            Some(block) => {
                update.apply(block);
                true
            }
            None => false,
        }
    }

    pub fn delete_block(&mut self, id: ElementId) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        if self.blocks.len() == before {
            return false;
        }

        self.controller.forget(id);
        if self.pending_upload == Some(id) {
            self.pending_upload = None;
        }
        log::debug!("Deleted block {}", id);
        true
    }

    // =========================================================================
    // Image Ingestion
    // =========================================================================

    /// Ask for a new image for an existing image block
    pub fn request_upload(&mut self, id: ElementId) -> bool {
        match self.block(id) {
            Some(block) if block.block_type() == BlockType::Image => {
                self.pending_upload = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Store a decoded upload in image block `id`.
    ///
    /// The block keeps its width; its height is recomputed so the image
    /// keeps its pixel proportions on the displayed page, without running
    /// past the bottom edge. Returns false (and changes nothing) when the
    /// block no longer exists, e.g. it was deleted while decoding.
    ///
    /// Default placement puts the eighth and later blocks below the page
    /// (`y >= 110`). Their height is still capped at `100 - y` and comes out
    /// negative; moving such a block onto the page is left to the user.
    pub fn apply_image(&mut self, id: ElementId, image: &DecodedImage) -> bool {
        if self.pending_upload == Some(id) {
            self.pending_upload = None;
        }

        let viewport = self.viewport;
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            log::debug!("Dropping decoded image for missing block {}", id);
            return false;
        };
        let BlockKind::Image {
            content,
            aspect_ratio,
        } = &mut block.kind
        else {
            log::warn!("Block {} is not an image block", id);
            return false;
        };

        let ratio = image.aspect_ratio();
        *content = image.data_url.clone();
        *aspect_ratio = Some(ratio);

        if !viewport.is_degenerate() {
            let height = height_for_width(block.rect.width, ratio, viewport);
            block.rect.height = height.min(100.0 - block.rect.y);
        }
        true
    }

    /// The upload for `id` could not be decoded. The block stays as it was.
    pub fn image_failed(&mut self, id: ElementId) {
        if self.pending_upload == Some(id) {
            self.pending_upload = None;
        }
        log::warn!("Image upload for block {} failed", id);
    }

    // =========================================================================
    // Text Editing
    // =========================================================================

    pub fn begin_text_edit(&self, id: ElementId) -> Option<TextEditRequest> {
        match &self.block(id)?.kind {
            BlockKind::Text { content, .. } => Some(TextEditRequest {
                id,
                current: content.clone(),
            }),
            BlockKind::Image { .. } => None,
        }
    }

    /// Resume a text edit. `None` means the user cancelled; an explicit
    /// empty string clears the text.
    pub fn finish_text_edit(&mut self, request: TextEditRequest, answer: Option<String>) -> bool {
        match answer {
            Some(text) => self.update_block(request.id, BlockUpdate::content(text)),
            None => false,
        }
    }

    // =========================================================================
    // Pointer & Keyboard
    // =========================================================================

    pub fn hit_test(&self, pos: PixelPoint) -> HitTarget {
        hit_test(
            self.blocks.iter().map(|b| (b.id, &b.rect)),
            self.controller.selected(),
            pos,
            self.viewport,
            self.options.handle_hit_radius_px,
        )
    }

    pub fn pointer_down(&mut self, pos: PixelPoint) -> HitTarget {
        let target = self.hit_test(pos);
        self.pointer_down_on(target, pos);
        target
    }

    /// Pointer press where the UI already knows what was hit
    pub fn pointer_down_on(&mut self, target: HitTarget, pos: PixelPoint) {
        self.controller
            .pointer_down(target, pos, self.blocks.as_slice(), self.viewport);
    }

    pub fn pointer_move(&mut self, pos: PixelPoint) -> bool {
        self.controller
            .pointer_move(pos, self.blocks.as_mut_slice(), self.viewport)
    }

    pub fn pointer_up(&mut self) -> Option<ElementId> {
        self.controller.pointer_up()
    }

    /// Double-click opens the text editor on text blocks
    pub fn double_click(&mut self, pos: PixelPoint) -> Option<TextEditRequest> {
        match self.hit_test(pos) {
            HitTarget::Body(id) | HitTarget::Handle(id, _) => {
                self.controller.select(Some(id));
                self.begin_text_edit(id)
            }
            HitTarget::Empty => None,
        }
    }

    pub fn handle_key(&mut self, input: KeyInput) -> KeyAction {
        if input.focus_in_text_input || !input.is_delete() {
            return KeyAction::Ignored;
        }
        match self.controller.selected() {
            Some(id) if self.delete_block(id) => KeyAction::Deleted(id),
            _ => KeyAction::Ignored,
        }
    }

    // =========================================================================
    // Document
    // =========================================================================

    /// Start over with an empty, unsaved document
    pub fn new_document(&mut self) {
        self.blocks.clear();
        self.controller = GestureController::new((&self.options).into());
        self.pending_upload = None;
        self.document_id = None;
        self.title.clear();
    }

    pub fn load_document(&mut self, document: &Document) {
        self.new_document();
        self.blocks = document.blocks.clone();
        self.ids.reserve_past(self.blocks.iter().map(|b| &b.id));
        self.document_id = Some(document.id.clone());
        self.title = document.title.clone();
    }

    /// The document was persisted under `id`
    pub fn mark_saved(&mut self, id: DocumentId) {
        self.document_id = Some(id);
    }

    /// Current title and blocks, ready for a store
    pub fn snapshot(&self) -> DocumentDraft {
        DocumentDraft::new(self.title.clone(), self.blocks.clone())
    }
}
