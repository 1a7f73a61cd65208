//! Selection, drag and resize state machine
//!
//! A press on a body selects it right away and waits in `PendingDrag`
//! until the pointer has travelled past the drag threshold, so a click
//! never moves anything. A press on a handle goes straight to `Resizing`.
//! Every move while dragging or resizing is written back immediately.

use crate::geometry::{
    PixelPoint, PixelSize, Rect, ResizeDirection, SizeLimits, clamp_position, pixel_origin,
    resize,
};
use crate::options::EditorOptions;
use crate::types::ElementId;

/// A collection whose entities the controller can move and resize
pub trait Editable {
    /// Current rectangle of an interactable entity
    fn rect_of(&self, id: ElementId) -> Option<Rect>;

    /// Locked width / height ratio, if the entity has one
    fn aspect_ratio_of(&self, id: ElementId) -> Option<f32>;

    /// Write new geometry; returns false if the entity is gone
    fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool;
}

/// What sits under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// One of the eight handles of the selected entity
    Handle(ElementId, ResizeDirection),
    /// The body of an entity
    Body(ElementId),
    /// Bare page
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    PendingDrag {
        id: ElementId,
        down: PixelPoint,
        /// Pointer position relative to the entity's origin
        offset: PixelPoint,
    },
    Dragging {
        id: ElementId,
        offset: PixelPoint,
    },
    Resizing {
        id: ElementId,
        direction: ResizeDirection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub drag_threshold_px: f32,
    pub limits: SizeLimits,
}

impl Default for GestureConfig {
    fn default() -> Self {
        EditorOptions::default().into()
    }
}

impl From<EditorOptions> for GestureConfig {
    fn from(options: EditorOptions) -> Self {
        Self::from(&options)
    }
}

impl From<&EditorOptions> for GestureConfig {
    fn from(options: &EditorOptions) -> Self {
        Self {
            drag_threshold_px: options.drag_threshold_px,
            limits: options.size_limits(),
        }
    }
}

/// Single-gesture controller with single selection
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    selected: Option<ElementId>,
    config: GestureConfig,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            state: GestureState::Idle,
            selected: None,
            config,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// Forget `id` if it is selected or being manipulated
    pub fn forget(&mut self, id: ElementId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.active_id() == Some(id) {
            self.state = GestureState::Idle;
        }
    }

    /// Abandon the gesture in progress, keeping the selection
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    fn active_id(&self) -> Option<ElementId> {
        match self.state {
            GestureState::Idle => None,
            GestureState::PendingDrag { id, .. }
            | GestureState::Dragging { id, .. }
            | GestureState::Resizing { id, .. } => Some(id),
        }
    }

    pub fn pointer_down<E: Editable + ?Sized>(
        &mut self,
        target: HitTarget,
        pos: PixelPoint,
        items: &E,
        page: PixelSize,
    ) {
        match target {
            HitTarget::Handle(id, direction) => {
                if items.rect_of(id).is_some() {
                    self.selected = Some(id);
                    self.state = GestureState::Resizing { id, direction };
                } else {
                    self.state = GestureState::Idle;
                }
            }
            HitTarget::Body(id) => match items.rect_of(id) {
                Some(rect) => {
                    self.selected = Some(id);
                    self.state = GestureState::PendingDrag {
                        id,
                        down: pos,
                        offset: pos.offset_from(pixel_origin(&rect, page)),
                    };
                }
                None => self.state = GestureState::Idle,
            },
            HitTarget::Empty => {
                self.selected = None;
                self.state = GestureState::Idle;
            }
        }
    }

    /// Feed one pointer move. Returns true when geometry was written.
    pub fn pointer_move<E: Editable + ?Sized>(
        &mut self,
        pos: PixelPoint,
        items: &mut E,
        page: PixelSize,
    ) -> bool {
        if page.is_degenerate() {
            return false;
        }

        if let GestureState::PendingDrag { id, down, offset } = self.state {
            let dx = (pos.x - down.x).abs();
            let dy = (pos.y - down.y).abs();
            if dx > self.config.drag_threshold_px || dy > self.config.drag_threshold_px {
                log::debug!("Drag started on {}", id);
                self.state = GestureState::Dragging { id, offset };
            }
        }

        match self.state {
            GestureState::Dragging { id, offset } => {
                let Some(rect) = items.rect_of(id) else {
                    self.state = GestureState::Idle;
                    return false;
                };
                let origin = page.to_percent(pos.offset_from(offset));
                let moved = clamp_position(&rect.with_origin(origin.x, origin.y));
                self.write(items, id, moved)
            }
            GestureState::Resizing { id, direction } => {
                let Some(rect) = items.rect_of(id) else {
                    self.state = GestureState::Idle;
                    return false;
                };
                let pointer = page.to_percent(pos).clamped();
                let resized = resize(
                    &rect,
                    direction,
                    pointer,
                    items.aspect_ratio_of(id),
                    page,
                    self.config.limits,
                );
                self.write(items, id, resized)
            }
            GestureState::Idle | GestureState::PendingDrag { .. } => false,
        }
    }

    /// End the gesture. Returns the entity it was acting on, if any.
    pub fn pointer_up(&mut self) -> Option<ElementId> {
        let id = self.active_id();
        self.state = GestureState::Idle;
        id
    }

    fn write<E: Editable + ?Sized>(&mut self, items: &mut E, id: ElementId, rect: Rect) -> bool {
        if items.set_rect(id, rect) {
            true
        } else {
            self.state = GestureState::Idle;
            false
        }
    }
}

/// Find what lies under `pos`.
///
/// Handles of the selected entity win over bodies; bodies are tested from
/// the last painted to the first.
pub fn hit_test<'a>(
    entities: impl DoubleEndedIterator<Item = (ElementId, &'a Rect)> + Clone,
    selected: Option<ElementId>,
    pos: PixelPoint,
    page: PixelSize,
    handle_radius_px: f32,
) -> HitTarget {
    if page.is_degenerate() {
        return HitTarget::Empty;
    }

    if let Some(selected) = selected {
        if let Some((_, rect)) = entities.clone().find(|(id, _)| *id == selected) {
            let handle = crate::geometry::handle_points(rect, page)
                .into_iter()
                .find(|(_, anchor)| {
                    (anchor.x - pos.x).abs() <= handle_radius_px
                        && (anchor.y - pos.y).abs() <= handle_radius_px
                });
            if let Some((direction, _)) = handle {
                return HitTarget::Handle(selected, direction);
            }
        }
    }

    let point = page.to_percent(pos);
    entities
        .rev()
        .find(|(_, rect)| rect.contains(point))
        .map(|(id, _)| HitTarget::Body(id))
        .unwrap_or(HitTarget::Empty)
}
