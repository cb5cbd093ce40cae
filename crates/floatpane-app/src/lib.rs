//! Headless scenario replay for floatpane desks.

pub mod replay;
pub mod scenario;

pub use replay::{
    EventRecord, PanelSnapshot, RecordedEvent, Replay, ReplayError, ReplayReport, ReplayResult,
    run_file, run_str,
};
pub use scenario::{PanelEntry, Part, Scenario, Step};
