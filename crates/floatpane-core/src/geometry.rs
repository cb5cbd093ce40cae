//! Panel geometry: committed values, live drag offsets, and the pure
//! functions that compose them into the displayed rectangle.
//!
//! The same [`AxisRule`] table drives both sides of a resize: the
//! controller uses it to clamp the pointer delta, and the composition
//! functions use it to turn the stored offset back into a width, height
//! and origin shift. Keeping the sign conventions in one place is what
//! keeps the preview and the commit in agreement.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a drag delta along one axis changes that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRule {
    /// The axis is not affected by this handle.
    Fixed,
    /// The far edge follows the pointer. The dimension grows with a positive
    /// delta and the origin stays put.
    Trailing,
    /// The near edge follows the pointer. The dimension grows with a negative
    /// delta and the origin moves by the delta, so the far edge stays anchored.
    Leading,
}

impl AxisRule {
    /// Change in extent produced by `delta`.
    pub fn dimension_delta(self, delta: f64) -> f64 {
        match self {
            AxisRule::Fixed => 0.0,
            AxisRule::Trailing => delta,
            AxisRule::Leading => -delta,
        }
    }

    /// Change in origin produced by `delta`.
    pub fn origin_shift(self, delta: f64) -> f64 {
        match self {
            AxisRule::Leading => delta,
            AxisRule::Fixed | AxisRule::Trailing => 0.0,
        }
    }

    /// Clamp `delta` so that `extent + dimension_delta(delta) >= floor`.
    ///
    /// An extent already below `floor` uses itself as the floor, so pressing
    /// a handle never grows the panel on its own.
    pub fn clamp(self, delta: f64, extent: f64, floor: f64) -> f64 {
        let floor = floor.min(extent);
        match self {
            AxisRule::Fixed => 0.0,
            AxisRule::Trailing => delta.max(floor - extent),
            AxisRule::Leading => delta.min(extent - floor),
        }
    }
}

/// One of the eight resize handles: four edges and four corners.
///
/// Serialized as the short tag (`"L"`, `"RT"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "T")]
    Top,
    #[serde(rename = "B")]
    Bottom,
    #[serde(rename = "LT")]
    LeftTop,
    #[serde(rename = "RT")]
    RightTop,
    #[serde(rename = "LB")]
    LeftBottom,
    #[serde(rename = "RB")]
    RightBottom,
}

impl Edge {
    /// All handles, in the order panels lay them out.
    pub const ALL: [Edge; 8] = [
        Edge::Left,
        Edge::Right,
        Edge::Top,
        Edge::Bottom,
        Edge::LeftTop,
        Edge::RightTop,
        Edge::LeftBottom,
        Edge::RightBottom,
    ];

    /// Position of this edge in [`Edge::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Right => 1,
            Edge::Top => 2,
            Edge::Bottom => 3,
            Edge::LeftTop => 4,
            Edge::RightTop => 5,
            Edge::LeftBottom => 6,
            Edge::RightBottom => 7,
        }
    }

    /// Rule applied to the x axis (width, position.x).
    pub const fn horizontal(self) -> AxisRule {
        match self {
            Edge::Left | Edge::LeftTop | Edge::LeftBottom => AxisRule::Leading,
            Edge::Right | Edge::RightTop | Edge::RightBottom => AxisRule::Trailing,
            Edge::Top | Edge::Bottom => AxisRule::Fixed,
        }
    }

    /// Rule applied to the y axis (height, position.y).
    pub const fn vertical(self) -> AxisRule {
        match self {
            Edge::Top | Edge::LeftTop | Edge::RightTop => AxisRule::Leading,
            Edge::Bottom | Edge::LeftBottom | Edge::RightBottom => AxisRule::Trailing,
            Edge::Left | Edge::Right => AxisRule::Fixed,
        }
    }

    /// Short tag used in configuration and scripts.
    pub const fn tag(self) -> &'static str {
        match self {
            Edge::Left => "L",
            Edge::Right => "R",
            Edge::Top => "T",
            Edge::Bottom => "B",
            Edge::LeftTop => "LT",
            Edge::RightTop => "RT",
            Edge::LeftBottom => "LB",
            Edge::RightBottom => "RB",
        }
    }

    /// Whether dragging this handle moves the panel origin.
    pub fn shifts_origin(self) -> bool {
        self.horizontal() == AxisRule::Leading || self.vertical() == AxisRule::Leading
    }

    /// Width/height change produced by a stored size offset.
    pub fn size_delta(self, size_offset: Vec2) -> Vec2 {
        Vec2::new(
            self.horizontal().dimension_delta(size_offset.x),
            self.vertical().dimension_delta(size_offset.y),
        )
    }

    /// Origin shift produced by a stored size offset.
    pub fn origin_shift(self, size_offset: Vec2) -> Vec2 {
        Vec2::new(
            self.horizontal().origin_shift(size_offset.x),
            self.vertical().origin_shift(size_offset.y),
        )
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing an unknown edge tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown edge tag: {0:?}")]
pub struct ParseEdgeError(pub String);

impl FromStr for Edge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Edge::ALL
            .into_iter()
            .find(|edge| edge.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEdgeError(s.to_string()))
    }
}

/// Project a raw pointer delta onto the axes `edge` affects, clamped so the
/// resulting size never drops below `min_size`.
pub fn clamp_size_offset(edge: Edge, delta: Vec2, size: Size, min_size: Size) -> Vec2 {
    Vec2::new(
        edge.horizontal().clamp(delta.x, size.width, min_size.width),
        edge.vertical().clamp(delta.y, size.height, min_size.height),
    )
}

/// On-screen top-left of the panel.
///
/// `offset` is non-zero only during a move drag and `size_offset` only
/// during a resize drag, so at most one of them contributes.
pub fn compute_translate(
    position: Point,
    offset: Vec2,
    size_offset: Vec2,
    active: Option<Edge>,
) -> Point {
    let shift = active.map_or(Vec2::ZERO, |edge| edge.origin_shift(size_offset));
    position + offset + shift
}

/// Displayed width.
pub fn compute_width(size: Size, size_offset: Vec2, active: Option<Edge>) -> f64 {
    size.width + active.map_or(0.0, |edge| edge.horizontal().dimension_delta(size_offset.x))
}

/// Displayed height.
pub fn compute_height(size: Size, size_offset: Vec2, active: Option<Edge>) -> f64 {
    size.height + active.map_or(0.0, |edge| edge.vertical().dimension_delta(size_offset.y))
}

/// Geometry exposed to consumers that need current dimensions mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeGeometry {
    pub position: Point,
    pub size: Size,
}

impl RuntimeGeometry {
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// The single owned geometry record of a panel.
///
/// Only the panel writes to it; controllers propose values through their
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    /// Committed top-left.
    pub position: Point,
    /// Committed size.
    pub size: Size,
    /// Live move offset.
    pub offset: Vec2,
    /// Live resize offset, in pointer-delta coordinates.
    pub size_offset: Vec2,
    /// Handle owning the in-flight resize, if any.
    pub active_edge: Option<Edge>,
    /// Mirror for dependent layout.
    pub runtime: RuntimeGeometry,
}

impl PanelGeometry {
    /// Idle geometry at the given committed position and size.
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            offset: Vec2::ZERO,
            size_offset: Vec2::ZERO,
            active_edge: None,
            runtime: RuntimeGeometry::new(position, size),
        }
    }

    pub fn translate(&self) -> Point {
        compute_translate(self.position, self.offset, self.size_offset, self.active_edge)
    }

    pub fn width(&self) -> f64 {
        compute_width(self.size, self.size_offset, self.active_edge)
    }

    pub fn height(&self) -> f64 {
        compute_height(self.size, self.size_offset, self.active_edge)
    }

    /// The rectangle currently on screen, including any live preview.
    pub fn displayed_rect(&self) -> Rect {
        Rect::from_origin_size(self.translate(), Size::new(self.width(), self.height()))
    }

    /// Whether no drag preview is in flight.
    pub fn is_settled(&self) -> bool {
        self.offset == Vec2::ZERO && self.size_offset == Vec2::ZERO && self.active_edge.is_none()
    }
}
