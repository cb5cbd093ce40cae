//! Move controller for a panel's title bar.

use crate::input::DragStatus;
use crate::surface::{Attachment, ElementId, Owner, PointerSurface};
use kurbo::{Point, Vec2};

/// What a move controller reports back to its panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveEvent {
    /// A drag began.
    Started,
    /// The pointer moved while dragging. `position` is committed + offset.
    Moving { position: Point, offset: Vec2 },
    /// The drag finished. Carries the final offset once more; the caller
    /// folds it into the committed position.
    Ended { position: Point, offset: Vec2 },
    /// The drag was aborted and its offset discarded.
    Cancelled,
}

/// Drag state machine bound to one draggable region.
///
/// `Idle --press--> Dragging --release--> Idle`. The controller never
/// writes committed position; it only reports offsets relative to the
/// press point.
#[derive(Debug)]
pub struct MoveController {
    owner: Owner,
    debug: bool,
    status: DragStatus,
    /// Pointer position at press.
    start: Point,
    /// Last reported offset.
    offset: Vec2,
    /// Committed position, as last synced by the panel.
    position: Point,
    attachment: Option<Attachment>,
}

impl MoveController {
    pub fn new(owner: Owner, debug: bool) -> Self {
        Self {
            owner,
            debug,
            status: DragStatus::Idle,
            start: Point::ZERO,
            offset: Vec2::ZERO,
            position: Point::ZERO,
            attachment: None,
        }
    }

    /// Attach to `region`. Re-initialising detaches the previous region first.
    pub fn init(&mut self, surface: &mut PointerSurface, region: ElementId) {
        self.dispose(surface);
        self.attachment = Some(Attachment::drag(surface, region, self.owner));
        if self.debug {
            log::debug!("[movable] initialised on {:?}", region);
        }
    }

    /// Detach every listener. Safe to call any number of times.
    ///
    /// A drag in flight is dropped and its capture released.
    pub fn dispose(&mut self, surface: &mut PointerSurface) {
        if let Some(attachment) = self.attachment.take() {
            attachment.detach(surface);
            if self.debug {
                log::debug!("[movable] disposed");
            }
        }
        if self.status.is_dragging() {
            self.reset(surface);
        }
    }

    /// Sync the committed position.
    pub fn update(&mut self, position: Point) {
        self.position = position;
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

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Start a drag at `pointer`.
    ///
    /// Refused while already dragging or while another controller holds the
    /// surface capture.
    pub fn press(&mut self, surface: &mut PointerSurface, pointer: Point) -> Option<MoveEvent> {
        if self.status.is_dragging() || !surface.try_capture(self.owner) {
            return None;
        }
        self.status = DragStatus::Dragging;
        self.start = pointer;
        self.offset = Vec2::ZERO;
        Some(MoveEvent::Started)
    }

    /// Track the pointer. No-op while idle.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<MoveEvent> {
        if !self.status.is_dragging() {
            return None;
        }
        self.offset = pointer - self.start;
        log::trace!("[movable] offset {:?}", self.offset);
        Some(MoveEvent::Moving {
            position: self.position + self.offset,
            offset: self.offset,
        })
    }

    /// Finish the drag with the last reported offset. No-op while idle.
    pub fn release(&mut self, surface: &mut PointerSurface) -> Option<MoveEvent> {
        if !self.status.is_dragging() {
            return None;
        }
        let offset = self.offset;
        self.reset(surface);
        Some(MoveEvent::Ended {
            position: self.position + offset,
            offset,
        })
    }

    /// Abort the drag without reporting an end position. No-op while idle.
    pub fn cancel(&mut self, surface: &mut PointerSurface) -> Option<MoveEvent> {
        if !self.status.is_dragging() {
            return None;
        }
        self.reset(surface);
        Some(MoveEvent::Cancelled)
    }

    fn reset(&mut self, surface: &mut PointerSurface) {
        self.status = DragStatus::Idle;
        self.offset = Vec2::ZERO;
        surface.release_capture(self.owner);
    }
}
