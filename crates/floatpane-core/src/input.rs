//! Pointer input as seen by the drag controllers.

use crate::surface::ElementId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// A raw pointer event in surface coordinates.
///
/// Presses carry the element they landed on; hit-testing belongs to the
/// rendering layer. Moves and releases are global, the way document-level
/// listeners see them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        target: ElementId,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    /// Pointer capture was lost (pointer left the surface, window blurred).
    Cancel,
}

impl PointerEvent {
    /// Left-button press on `target`.
    pub fn down(target: ElementId, position: Point) -> Self {
        Self::Down {
            position,
            button: MouseButton::Left,
            target,
        }
    }

    pub fn moved(position: Point) -> Self {
        Self::Move { position }
    }

    /// Left-button release.
    pub fn up(position: Point) -> Self {
        Self::Up {
            position,
            button: MouseButton::Left,
        }
    }

    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Down { position, .. } | Self::Move { position } | Self::Up { position, .. } => {
                Some(position)
            }
            Self::Cancel => None,
        }
    }
}

/// Per-controller drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragStatus {
    #[default]
    Idle,
    Dragging,
}

impl DragStatus {
    pub fn is_dragging(self) -> bool {
        self == DragStatus::Dragging
    }
}
