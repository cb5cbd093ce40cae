//! Floatpane Core Library
//!
//! Interaction engine for floating panels: a pointer-driven move
//! controller, eight parameterized resize controllers, and the pure
//! geometry functions that turn committed geometry plus live drag offsets
//! into the rectangle on screen. Rendering is left to the caller.

pub mod config;
pub mod desk;
pub mod geometry;
pub mod input;
pub mod movable;
pub mod panel;
pub mod resizable;
pub mod surface;

pub use config::{ConfigError, ConfigResult, PanelConfig};
pub use desk::{Desk, DeskError, DeskResult};
pub use geometry::{
    AxisRule, Edge, PanelGeometry, ParseEdgeError, RuntimeGeometry, clamp_size_offset,
    compute_height, compute_translate, compute_width,
};
pub use input::{DragStatus, MouseButton, PointerEvent};
pub use movable::{MoveController, MoveEvent};
pub use panel::{Panel, PanelElements, PanelEvent, PanelId};
pub use resizable::{ResizeController, ResizeEvent, ResizeOptions};
pub use surface::{Delivery, ElementId, Owner, PointerSurface, Signal, Slot};
