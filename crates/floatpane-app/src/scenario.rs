//! Scenario file format.
//!
//! ```json
//! {
//!   "panels": [
//!     { "name": "notes", "config": { "position": { "x": 50.0, "y": 50.0 } } }
//!   ],
//!   "steps": [
//!     { "type": "down", "panel": "notes", "part": "header", "x": 100.0, "y": 100.0 },
//!     { "type": "move", "x": 130.0, "y": 90.0 },
//!     { "type": "up", "x": 130.0, "y": 90.0 }
//!   ]
//! }
//! ```

use floatpane_core::{Edge, PanelConfig};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A full replay script.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub panels: Vec<PanelEntry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A panel created before the first step.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelEntry {
    pub name: String,
    #[serde(default)]
    pub config: PanelConfig,
}

/// The part of a panel a press lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Part {
    Header,
    Tools,
    Body,
    Handle(Edge),
}

impl FromStr for Part {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(Part::Header),
            "tools" => Ok(Part::Tools),
            "body" => Ok(Part::Body),
            tag => tag
                .parse::<Edge>()
                .map(Part::Handle)
                .map_err(|_| format!("unknown panel part: {tag:?}")),
        }
    }
}

impl TryFrom<String> for Part {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Header => f.write_str("header"),
            Part::Tools => f.write_str("tools"),
            Part::Body => f.write_str("body"),
            Part::Handle(edge) => write!(f, "{edge}"),
        }
    }
}

/// One scripted step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Left-button press on a part of a panel.
    Down { panel: String, part: Part, x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// Pointer capture lost.
    Cancel,
    /// Toggle the minimized state.
    Minimize { panel: String },
    Close { panel: String },
    /// Programmatic reposition.
    Reposition { panel: String, x: f64, y: f64 },
    /// Programmatic resize.
    ResizeTo { panel: String, width: f64, height: f64 },
}
