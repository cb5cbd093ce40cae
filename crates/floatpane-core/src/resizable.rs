//! Resize controller, one instance per edge or corner handle.

use crate::geometry::{Edge, RuntimeGeometry, clamp_size_offset};
use crate::input::DragStatus;
use crate::surface::{Attachment, ElementId, Owner, PointerSurface};
use kurbo::{Point, Size, Vec2};

/// What a resize controller reports back to its panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeEvent {
    /// A resize began on this controller's edge.
    Started { edge: Edge },
    /// The pointer moved while dragging.
    ///
    /// `runtime` is present only when the controller reports runtime
    /// geometry live.
    Resizing {
        size_offset: Vec2,
        runtime: Option<RuntimeGeometry>,
    },
    /// The drag finished; the panel should commit these values.
    Committed {
        position: Point,
        size: Size,
    },
    /// The drag was aborted and its offset discarded.
    Cancelled,
}

/// Options shared by every resize handle of a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    pub debug: bool,
    pub use_runtime: bool,
    pub min_size: Size,
}

/// Drag state machine bound to one resize handle.
///
/// The raw pointer delta is projected onto the axes the edge affects and
/// clamped against the minimum size before it is stored, so the preview
/// and the commit see the same value.
#[derive(Debug)]
pub struct ResizeController {
    owner: Owner,
    edge: Edge,
    options: ResizeOptions,
    status: DragStatus,
    start: Point,
    size_offset: Vec2,
    /// Committed position and size, as last synced by the panel.
    position: Point,
    size: Size,
    attachment: Option<Attachment>,
}

impl ResizeController {
    pub fn new(owner: Owner, edge: Edge, options: ResizeOptions) -> Self {
        Self {
            owner,
            edge,
            options,
            status: DragStatus::Idle,
            start: Point::ZERO,
            size_offset: Vec2::ZERO,
            position: Point::ZERO,
            size: Size::ZERO,
            attachment: None,
        }
    }

    /// Attach to `handle`. Re-initialising detaches the previous handle first.
    pub fn init(&mut self, surface: &mut PointerSurface, handle: ElementId) {
        self.dispose(surface);
        self.attachment = Some(Attachment::drag(surface, handle, self.owner));
        if self.options.debug {
            log::debug!("[resize:{}] initialised on {:?}", self.edge, handle);
        }
    }

    /// Detach every listener. Safe to call any number of times.
    pub fn dispose(&mut self, surface: &mut PointerSurface) {
        if let Some(attachment) = self.attachment.take() {
            attachment.detach(surface);
            if self.options.debug {
                log::debug!("[resize:{}] disposed", self.edge);
            }
        }
        if self.status.is_dragging() {
            self.reset(surface);
        }
    }

    pub fn update_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn update_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn status(&self) -> DragStatus {
        self.status
    }

    pub fn is_dragging(&self) -> bool {
        self.status.is_dragging()
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn size_offset(&self) -> Vec2 {
        self.size_offset
    }

    /// Committed geometry combined with the current size offset.
    pub fn runtime_geometry(&self) -> RuntimeGeometry {
        RuntimeGeometry::new(
            self.position + self.edge.origin_shift(self.size_offset),
            self.size + self.edge.size_delta(self.size_offset).to_size(),
        )
    }

    /// Start a resize at `pointer`.
    pub fn press(&mut self, surface: &mut PointerSurface, pointer: Point) -> Option<ResizeEvent> {
        if self.status.is_dragging() || !surface.try_capture(self.owner) {
            return None;
        }
        self.status = DragStatus::Dragging;
        self.start = pointer;
        self.size_offset = Vec2::ZERO;
        Some(ResizeEvent::Started { edge: self.edge })
    }

    /// Track the pointer. No-op while idle.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<ResizeEvent> {
        if !self.status.is_dragging() {
            return None;
        }
        let delta = pointer - self.start;
        self.size_offset = clamp_size_offset(self.edge, delta, self.size, self.options.min_size);
        log::trace!("[resize:{}] size offset {:?}", self.edge, self.size_offset);
        Some(ResizeEvent::Resizing {
            size_offset: self.size_offset,
            runtime: self.options.use_runtime.then(|| self.runtime_geometry()),
        })
    }

    /// Finish the resize. No-op while idle.
    pub fn release(&mut self, surface: &mut PointerSurface) -> Option<ResizeEvent> {
        if !self.status.is_dragging() {
            return None;
        }
        let RuntimeGeometry { position, size } = self.runtime_geometry();
        self.reset(surface);
        Some(ResizeEvent::Committed { position, size })
    }

    /// Abort the resize, discarding the offset. No-op while idle.
    pub fn cancel(&mut self, surface: &mut PointerSurface) -> Option<ResizeEvent> {
        if !self.status.is_dragging() {
            return None;
        }
        self.reset(surface);
        Some(ResizeEvent::Cancelled)
    }

    fn reset(&mut self, surface: &mut PointerSurface) {
        self.status = DragStatus::Idle;
        self.size_offset = Vec2::ZERO;
        surface.release_capture(self.owner);
    }
}
