//! Signature overlay for the PDF signer
//!
//! Holds signature placements for every page of one loaded PDF and the
//! library of reusable signature images. Only placements on the active
//! page are visible to hit testing and gestures; the rest are kept as-is.

use crate::constants::{
    PASTE_OFFSET_PCT, SIGNATURE_DEFAULT_WIDTH, SIGNATURE_DEFAULT_X, SIGNATURE_DEFAULT_Y,
};
use crate::geometry::{PixelPoint, PixelSize, Rect, clamp_position, height_for_width};
use crate::image_data::DecodedImage;
use crate::interact::{Editable, GestureController, HitTarget, KeyAction, KeyInput, hit_test};
use crate::model::{SignaturePlacement, SignatureTemplate};
use crate::options::EditorOptions;
use crate::types::{ElementId, IdGenerator, PageSize};

/// The placements of one page, seen through the gesture controller
struct PageScope<'a> {
    placements: &'a mut [SignaturePlacement],
    page: u32,
}

impl PageScope<'_> {
    fn find(&self, id: ElementId) -> Option<&SignaturePlacement> {
        self.placements
            .iter()
            .find(|p| p.id == id && p.page_number == self.page)
    }
}

impl Editable for PageScope<'_> {
    fn rect_of(&self, id: ElementId) -> Option<Rect> {
        self.find(id).map(|p| p.rect)
    }

    fn aspect_ratio_of(&self, id: ElementId) -> Option<f32> {
        self.find(id).map(|p| p.aspect_ratio)
    }

    fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        let page = self.page;
        match self
            .placements
            .iter_mut()
            .find(|p| p.id == id && p.page_number == page)
        {
            Some(placement) => {
                placement.rect = rect;
                true
            }
            None => false,
        }
    }
}

pub struct SignatureOverlay {
    placements: Vec<SignaturePlacement>,
    library: Vec<SignatureTemplate>,
    /// Native size of each page of the loaded PDF, in points
    pages: Vec<PageSize>,
    active_page: u32,
    viewport: PixelSize,
    controller: GestureController,
    clipboard: Option<SignaturePlacement>,
    ids: IdGenerator,
    options: EditorOptions,
}

impl SignatureOverlay {
    pub fn new(options: EditorOptions, viewport: PixelSize) -> Self {
        Self {
            placements: Vec::new(),
            library: Vec::new(),
            pages: Vec::new(),
            active_page: 1,
            viewport,
            controller: GestureController::new((&options).into()),
            clipboard: None,
            ids: IdGenerator::new(),
            options,
        }
    }

    // =========================================================================
    // Pages
    // =========================================================================

    /// Start working on a newly loaded PDF.
    ///
    /// Placements belong to the previous PDF and are dropped; the library
    /// survives so signatures can be reused across files.
    pub fn load_pages(&mut self, pages: Vec<PageSize>) {
        self.pages = pages;
        self.placements.clear();
        self.active_page = 1;
        self.controller = GestureController::new((&self.options).into());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[PageSize] {
        &self.pages
    }

    pub fn active_page(&self) -> u32 {
        self.active_page
    }

    pub fn active_page_size(&self) -> Option<PageSize> {
        self.pages.get((self.active_page as usize).checked_sub(1)?).copied()
    }

    /// Switch the displayed page. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if page < 1 || page as usize > self.pages.len() {
            return false;
        }
        self.active_page = page;
        self.controller.cancel();

        let selected_here = self
            .controller
            .selected()
            .and_then(|id| self.placement(id))
            .is_some_and(|p| p.page_number == page);
        if !selected_here {
            self.controller.select(None);
        }
        true
    }

    pub fn viewport(&self) -> PixelSize {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: PixelSize) {
        self.viewport = viewport;
    }

    // =========================================================================
    // Library
    // =========================================================================

    pub fn library(&self) -> &[SignatureTemplate] {
        &self.library
    }

    pub fn add_template(&mut self, image: &DecodedImage) -> ElementId {
        let id = self.ids.next_id();
        self.library.push(SignatureTemplate {
            id,
            image_data: image.data_url.clone(),
            aspect_ratio: image.aspect_ratio(),
        });
        id
    }

    /// Remove a template. Placements made from it keep their own image.
    pub fn delete_template(&mut self, id: ElementId) -> bool {
        let before = self.library.len();
        self.library.retain(|t| t.id != id);
        self.library.len() != before
    }

    /// Put a template on the active page at the default spot.
    ///
    /// The height follows from the template's ratio and the page's own
    /// proportions. Returns `None` when no PDF is loaded or the template
    /// does not exist.
    pub fn place_from_library(&mut self, template_id: ElementId) -> Option<ElementId> {
        let page = self.active_page_size()?;
        let template = self.library.iter().find(|t| t.id == template_id)?.clone();

        let page_px = PixelSize::new(page.width, page.height);
        let height = height_for_width(SIGNATURE_DEFAULT_WIDTH, template.aspect_ratio, page_px);

        let id = self.ids.next_id();
        self.placements.push(SignaturePlacement {
            id,
            page_number: self.active_page,
            image_data: template.image_data,
            rect: Rect::new(
                SIGNATURE_DEFAULT_X,
                SIGNATURE_DEFAULT_Y,
                SIGNATURE_DEFAULT_WIDTH,
                height,
            ),
            aspect_ratio: template.aspect_ratio,
        });
        self.controller.select(Some(id));
        log::debug!("Placed template {} as {} on page {}", template_id, id, self.active_page);
        Some(id)
    }

    // =========================================================================
    // Placements
    // =========================================================================

    /// All placements across all pages, in creation order
    pub fn placements(&self) -> &[SignaturePlacement] {
        &self.placements
    }

    pub fn placement(&self, id: ElementId) -> Option<&SignaturePlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Placements on the active page
    pub fn visible_placements(&self) -> impl DoubleEndedIterator<Item = &SignaturePlacement> + Clone {
        let page = self.active_page;
        self.placements.iter().filter(move |p| p.page_number == page)
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.controller.selected()
    }

    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    pub fn update_placement(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.placements.iter_mut().find(|p| p.id == id) {
            Some(placement) => {
                placement.rect = rect;
                true
            }
            None => false,
        }
    }

    pub fn delete_placement(&mut self, id: ElementId) -> bool {
        let before = self.placements.len();
        self.placements.retain(|p| p.id != id);
        if self.placements.len() == before {
            return false;
        }
        self.controller.forget(id);
        true
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    pub fn clipboard(&self) -> Option<&SignaturePlacement> {
        self.clipboard.as_ref()
    }

    /// Snapshot the selected placement
    pub fn copy_selected(&mut self) -> Option<ElementId> {
        let placement = self.placement(self.controller.selected()?)?.clone();
        let id = placement.id;
        self.clipboard = Some(placement);
        Some(id)
    }

    /// Duplicate the clipboard onto the active page, nudged down and right
    /// and kept fully on the page.
    pub fn paste(&mut self) -> Option<ElementId> {
        if self.pages.is_empty() {
            return None;
        }
        let mut placement = self.clipboard.clone()?;

        placement.id = self.ids.next_id();
        placement.page_number = self.active_page;
        placement.rect = clamp_position(&placement.rect.with_origin(
            placement.rect.x + PASTE_OFFSET_PCT,
            placement.rect.y + PASTE_OFFSET_PCT,
        ));

        let id = placement.id;
        self.placements.push(placement);
        self.controller.select(Some(id));
        Some(id)
    }

    // =========================================================================
    // Pointer & Keyboard
    // =========================================================================

    pub fn hit_test(&self, pos: PixelPoint) -> HitTarget {
        hit_test(
            self.visible_placements().map(|p| (p.id, &p.rect)),
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

    pub fn pointer_down_on(&mut self, target: HitTarget, pos: PixelPoint) {
        let scope = PageScope {
            placements: &mut self.placements,
            page: self.active_page,
        };
        self.controller
            .pointer_down(target, pos, &scope, self.viewport);
    }

    pub fn pointer_move(&mut self, pos: PixelPoint) -> bool {
        let mut scope = PageScope {
            placements: &mut self.placements,
            page: self.active_page,
        };
        self.controller.pointer_move(pos, &mut scope, self.viewport)
    }

    pub fn pointer_up(&mut self) -> Option<ElementId> {
        self.controller.pointer_up()
    }

    pub fn handle_key(&mut self, input: KeyInput) -> KeyAction {
        if input.focus_in_text_input {
            return KeyAction::Ignored;
        }

        if input.is_delete() {
            if let Some(id) = self.controller.selected() {
                if self.delete_placement(id) {
                    return KeyAction::Deleted(id);
                }
            }
        } else if input.is_shortcut('c') {
            if let Some(id) = self.copy_selected() {
                return KeyAction::Copied(id);
            }
        } else if input.is_shortcut('v') {
            if let Some(id) = self.paste() {
                return KeyAction::Pasted(id);
            }
        }

        KeyAction::Ignored
    }
}
