//! The pointer surface: elements, listeners and the drag capture.
//!
//! This plays the role the DOM plays for a browser widget. Controllers
//! register a press listener on their own element and move/release
//! listeners on the whole surface; [`PointerSurface::dispatch`] turns a raw
//! [`PointerEvent`] into the list of [`Delivery`] values those listeners
//! would receive, in registration order.
//!
//! The surface also holds the single drag capture slot. Every controller
//! must win the capture before it may start dragging, which is what keeps
//! at most one drag in flight across every panel sharing the surface.

use crate::geometry::Edge;
use crate::input::{MouseButton, PointerEvent};
use crate::panel::PanelId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An element registered on a [`PointerSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Handle to a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Which part of a panel a listener belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Title bar, drives the move controller.
    Header,
    /// One of the eight resize handles.
    Handle(Edge),
    /// Button strip in the title bar.
    Tools,
    /// Panel body.
    Body,
}

/// Identifies the controller a listener reports to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Owner {
    pub panel: PanelId,
    pub slot: Slot,
}

impl Owner {
    pub fn new(panel: PanelId, slot: Slot) -> Self {
        Self { panel, slot }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Element(ElementId),
    /// The whole surface, like a document-level listener.
    Document,
}

/// Which events a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    Press,
    Move,
    /// Receives releases and cancellations.
    Release,
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    target: Target,
    kind: ListenerKind,
    owner: Owner,
}

/// What a listener observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Press(Point),
    Move(Point),
    Release(Point),
    Cancel,
}

/// A signal addressed to one listener owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delivery {
    pub owner: Owner,
    pub signal: Signal,
}

/// Element and listener registry plus the system-wide drag capture.
#[derive(Debug, Default)]
pub struct PointerSurface {
    next_element: u64,
    next_listener: u64,
    listeners: Vec<Listener>,
    capture: Option<Owner>,
}

impl PointerSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh element id.
    pub fn create_element(&mut self) -> ElementId {
        self.next_element += 1;
        ElementId(self.next_element)
    }

    /// Register a listener and return its handle.
    pub fn add_listener(&mut self, target: Target, kind: ListenerKind, owner: Owner) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(Listener {
            id,
            target,
            kind,
            owner,
        });
        id
    }

    /// Remove a listener. Removing an unknown listener is a no-op.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners registered by one panel.
    pub fn panel_listener_count(&self, panel: PanelId) -> usize {
        self.listeners.iter().filter(|l| l.owner.panel == panel).count()
    }

    /// Current holder of the drag capture.
    pub fn captured_by(&self) -> Option<Owner> {
        self.capture
    }

    /// Take the drag capture for `owner`.
    ///
    /// Succeeds when the capture is free or already held by `owner`.
    pub fn try_capture(&mut self, owner: Owner) -> bool {
        match self.capture {
            None => {
                self.capture = Some(owner);
                true
            }
            Some(current) => current == owner,
        }
    }

    /// Give up the capture if `owner` holds it.
    pub fn release_capture(&mut self, owner: Owner) {
        if self.capture == Some(owner) {
            self.capture = None;
        }
    }

    /// Work out which listeners receive `event`.
    ///
    /// Only the left button drives drags; other buttons reach nobody.
    pub fn dispatch(&self, event: &PointerEvent) -> Vec<Delivery> {
        let (target, kind, signal) = match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                target,
            } => (Target::Element(target), ListenerKind::Press, Signal::Press(position)),
            PointerEvent::Move { position } => {
                (Target::Document, ListenerKind::Move, Signal::Move(position))
            }
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => (Target::Document, ListenerKind::Release, Signal::Release(position)),
            PointerEvent::Cancel => (Target::Document, ListenerKind::Release, Signal::Cancel),
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => return Vec::new(),
        };

        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| Delivery {
                owner: l.owner,
                signal,
            })
            .collect()
    }
}

/// The set of listeners one controller registered.
///
/// Dropping an attachment without [`Attachment::detach`] leaks its
/// listeners on the surface.
#[derive(Debug)]
pub struct Attachment {
    element: ElementId,
    listeners: Vec<ListenerId>,
}

impl Attachment {
    /// Press on `element` plus surface-wide move and release.
    pub fn drag(surface: &mut PointerSurface, element: ElementId, owner: Owner) -> Self {
        let listeners = vec![
            surface.add_listener(Target::Element(element), ListenerKind::Press, owner),
            surface.add_listener(Target::Document, ListenerKind::Move, owner),
            surface.add_listener(Target::Document, ListenerKind::Release, owner),
        ];
        Self { element, listeners }
    }

    /// Press on `element` only.
    pub fn press(surface: &mut PointerSurface, element: ElementId, owner: Owner) -> Self {
        let listeners = vec![surface.add_listener(
            Target::Element(element),
            ListenerKind::Press,
            owner,
        )];
        Self { element, listeners }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Unregister every listener of this attachment.
    pub fn detach(self, surface: &mut PointerSurface) {
        for id in self.listeners {
            surface.remove_listener(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn owner(slot: Slot) -> Owner {
        Owner::new(Uuid::nil(), slot)
    }

    #[test]
    fn test_elements_are_unique() {
        let mut surface = PointerSurface::new();
        let a = surface.create_element();
        let b = surface.create_element();
        assert_ne!(a, b);
    }

    #[test]
    fn test_press_reaches_only_target_element() {
        let mut surface = PointerSurface::new();
        let header = surface.create_element();
        let handle = surface.create_element();
        let _a = Attachment::drag(&mut surface, header, owner(Slot::Header));
        let _b = Attachment::drag(&mut surface, handle, owner(Slot::Handle(Edge::Right)));

        let deliveries = surface.dispatch(&PointerEvent::down(handle, Point::new(1.0, 1.0)));
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].owner.slot, Slot::Handle(Edge::Right));
        assert_eq!(deliveries[0].signal, Signal::Press(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_move_and_release_are_global_in_registration_order() {
        let mut surface = PointerSurface::new();
        let header = surface.create_element();
        let handle = surface.create_element();
        let _a = Attachment::drag(&mut surface, header, owner(Slot::Header));
        let _b = Attachment::drag(&mut surface, handle, owner(Slot::Handle(Edge::Top)));

        let moves = surface.dispatch(&PointerEvent::moved(Point::new(5.0, 6.0)));
        let slots: Vec<Slot> = moves.iter().map(|d| d.owner.slot).collect();
        assert_eq!(slots, vec![Slot::Header, Slot::Handle(Edge::Top)]);

        let ups = surface.dispatch(&PointerEvent::up(Point::ZERO));
        assert_eq!(ups.len(), 2);
        assert!(ups.iter().all(|d| d.signal == Signal::Release(Point::ZERO)));

        let cancels = surface.dispatch(&PointerEvent::Cancel);
        assert_eq!(cancels.len(), 2);
        assert!(cancels.iter().all(|d| d.signal == Signal::Cancel));
    }

    #[test]
    fn test_non_left_buttons_are_ignored() {
        let mut surface = PointerSurface::new();
        let header = surface.create_element();
        let _a = Attachment::drag(&mut surface, header, owner(Slot::Header));

        let down = PointerEvent::Down {
            position: Point::ZERO,
            button: MouseButton::Right,
            target: header,
        };
        assert!(surface.dispatch(&down).is_empty());
        let up = PointerEvent::Up {
            position: Point::ZERO,
            button: MouseButton::Middle,
        };
        assert!(surface.dispatch(&up).is_empty());
    }

    #[test]
    fn test_press_only_attachment() {
        let mut surface = PointerSurface::new();
        let tools = surface.create_element();
        let attachment = Attachment::press(&mut surface, tools, owner(Slot::Tools));
        assert_eq!(attachment.element(), tools);
        assert_eq!(surface.listener_count(), 1);
        assert!(surface.dispatch(&PointerEvent::moved(Point::ZERO)).is_empty());
    }

    #[test]
    fn test_detach_removes_everything() {
        let mut surface = PointerSurface::new();
        let header = surface.create_element();
        let attachment = Attachment::drag(&mut surface, header, owner(Slot::Header));
        assert_eq!(surface.listener_count(), 3);
        assert_eq!(surface.panel_listener_count(Uuid::nil()), 3);

        attachment.detach(&mut surface);
        assert_eq!(surface.listener_count(), 0);
        assert!(surface.dispatch(&PointerEvent::down(header, Point::ZERO)).is_empty());
        assert!(surface.dispatch(&PointerEvent::moved(Point::ZERO)).is_empty());
    }

    #[test]
    fn test_remove_unknown_listener_is_noop() {
        let mut surface = PointerSurface::new();
        let id = surface.add_listener(Target::Document, ListenerKind::Move, owner(Slot::Body));
        assert!(surface.remove_listener(id));
        assert!(!surface.remove_listener(id));
    }

    #[test]
    fn test_capture_is_exclusive() {
        let mut surface = PointerSurface::new();
        let header = owner(Slot::Header);
        let left = owner(Slot::Handle(Edge::Left));

        assert!(surface.try_capture(header));
        assert!(surface.try_capture(header));
        assert!(!surface.try_capture(left));
        assert_eq!(surface.captured_by(), Some(header));

        surface.release_capture(left);
        assert_eq!(surface.captured_by(), Some(header));
        surface.release_capture(header);
        assert_eq!(surface.captured_by(), None);
        assert!(surface.try_capture(left));
    }
}
