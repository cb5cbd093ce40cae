//! Replays a scenario through a desk.

use crate::scenario::{Part, Scenario, Step};
use floatpane_core::{
    ConfigError, Desk, DeskError, PanelElements, PanelEvent, PanelId, PointerEvent,
    RuntimeGeometry,
};
use kurbo::{Point, Size};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scenario error: {0}")]
    Scenario(#[from] serde_json::Error),
    #[error("Config error for panel {name}: {source}")]
    Config { name: String, source: ConfigError },
    #[error("Duplicate panel name: {0}")]
    DuplicatePanel(String),
    #[error("Unknown panel {name} at step {step}")]
    UnknownPanel { name: String, step: usize },
    #[error(transparent)]
    Desk(#[from] DeskError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// A panel event in serializable form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordedEvent {
    Selected,
    MoveStart { position: Point },
    Moving { position: Point },
    MoveEnd { position: Point },
    Resize { size: Size },
    Minified { minimized: bool },
    Closed { position: Point },
}

impl<D> From<&PanelEvent<D>> for RecordedEvent {
    fn from(event: &PanelEvent<D>) -> Self {
        match *event {
            PanelEvent::Selected => Self::Selected,
            PanelEvent::MoveStart { position, .. } => Self::MoveStart { position },
            PanelEvent::Moving { position, .. } => Self::Moving { position },
            PanelEvent::MoveEnd { position, .. } => Self::MoveEnd { position },
            PanelEvent::Resize(size) => Self::Resize { size },
            PanelEvent::Minified(minimized) => Self::Minified { minimized },
            PanelEvent::Closed { position, .. } => Self::Closed { position },
        }
    }
}

/// One emitted event, tagged with the step that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub step: usize,
    pub panel: String,
    #[serde(flatten)]
    pub event: RecordedEvent,
}

/// Final state of a panel still on the desk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub name: String,
    pub title: String,
    pub position: Point,
    pub size: Size,
    pub runtime: RuntimeGeometry,
    pub minimized: bool,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub events: Vec<EventRecord>,
    /// Back to front.
    pub panels: Vec<PanelSnapshot>,
}

/// Drives a [`Desk`] from scripted steps. Panel data is the panel name.
#[derive(Debug)]
pub struct Replay {
    desk: Desk<String>,
    panels: HashMap<String, (PanelId, PanelElements)>,
    events: Vec<EventRecord>,
}

impl Replay {
    /// Build the desk and every panel of `scenario`.
    pub fn new(scenario: &Scenario) -> ReplayResult<Self> {
        let mut desk = Desk::new();
        let mut panels = HashMap::new();
        for entry in &scenario.panels {
            entry.config.validate().map_err(|source| ReplayError::Config {
                name: entry.name.clone(),
                source,
            })?;
            if panels.contains_key(&entry.name) {
                return Err(ReplayError::DuplicatePanel(entry.name.clone()));
            }
            let mounted = desk.add_panel(&entry.config, entry.name.clone());
            panels.insert(entry.name.clone(), mounted);
        }
        Ok(Self {
            desk,
            panels,
            events: Vec::new(),
        })
    }

    pub fn desk(&self) -> &Desk<String> {
        &self.desk
    }

    /// Run a single step.
    pub fn step(&mut self, index: usize, step: &Step) -> ReplayResult<()> {
        log::debug!("step {}: {:?}", index, step);
        let emitted: Vec<(PanelId, PanelEvent<String>)> = match step {
            Step::Down { panel, part, x, y } => {
                let (_, elements) = self.lookup(panel, index)?;
                let target = match part {
                    Part::Header => elements.header,
                    Part::Tools => elements.tools,
                    Part::Body => elements.body,
                    Part::Handle(edge) => elements.handle(*edge),
                };
                self.desk.dispatch(&PointerEvent::down(target, Point::new(*x, *y)))
            }
            Step::Move { x, y } => self.desk.dispatch(&PointerEvent::moved(Point::new(*x, *y))),
            Step::Up { x, y } => self.desk.dispatch(&PointerEvent::up(Point::new(*x, *y))),
            Step::Cancel => self.desk.dispatch(&PointerEvent::Cancel),
            Step::Minimize { panel } => {
                let (id, _) = self.lookup(panel, index)?;
                tag(id, self.desk.toggle_minimized(id)?)
            }
            Step::Close { panel } => {
                let (id, _) = self.lookup(panel, index)?;
                let closed = self.desk.close_panel(id)?;
                self.record(index, panel, &closed);
                self.panels.remove(panel);
                Vec::new()
            }
            Step::Reposition { panel, x, y } => {
                let (id, _) = self.lookup(panel, index)?;
                let moved = self.desk.panel_mut(id)?.set_position(Point::new(*x, *y));
                tag(id, moved.into_iter().collect())
            }
            Step::ResizeTo {
                panel,
                width,
                height,
            } => {
                let (id, _) = self.lookup(panel, index)?;
                let resized = self.desk.panel_mut(id)?.set_size(Size::new(*width, *height));
                tag(id, resized.into_iter().collect())
            }
        };

        for (id, event) in emitted {
            let name = self.desk.panel(id)?.data().clone();
            self.record(index, &name, &event);
        }
        Ok(())
    }

    /// Run every step of `scenario` and report.
    pub fn run(mut self, scenario: &Scenario) -> ReplayResult<ReplayReport> {
        for (index, step) in scenario.steps.iter().enumerate() {
            self.step(index, step)?;
        }
        if self.desk.is_dragging() {
            log::warn!("Scenario ended with a drag still in flight");
        }
        Ok(self.report())
    }

    /// Snapshot of the events so far and of every live panel.
    pub fn report(&self) -> ReplayReport {
        let panels = self
            .desk
            .z_order()
            .iter()
            .filter_map(|&id| self.desk.panel(id).ok())
            .map(|panel| PanelSnapshot {
                name: panel.data().clone(),
                title: panel.title().to_string(),
                position: panel.position(),
                size: panel.size(),
                runtime: panel.runtime(),
                minimized: panel.is_minimized(),
            })
            .collect();
        ReplayReport {
            events: self.events.clone(),
            panels,
        }
    }

    fn lookup(&self, name: &str, step: usize) -> ReplayResult<(PanelId, PanelElements)> {
        self.panels
            .get(name)
            .copied()
            .ok_or_else(|| ReplayError::UnknownPanel {
                name: name.to_string(),
                step,
            })
    }

    fn record(&mut self, step: usize, panel: &str, event: &PanelEvent<String>) {
        log::info!("step {}: {} {:?}", step, panel, RecordedEvent::from(event));
        self.events.push(EventRecord {
            step,
            panel: panel.to_string(),
            event: event.into(),
        });
    }
}

fn tag(id: PanelId, events: Vec<PanelEvent<String>>) -> Vec<(PanelId, PanelEvent<String>)> {
    events.into_iter().map(|event| (id, event)).collect()
}

/// Parse a scenario and replay it.
pub fn run_str(json: &str) -> ReplayResult<ReplayReport> {
    let scenario: Scenario = serde_json::from_str(json)?;
    Replay::new(&scenario)?.run(&scenario)
}

/// Read a scenario file and replay it.
pub fn run_file(path: impl AsRef<Path>) -> ReplayResult<ReplayReport> {
    let json = std::fs::read_to_string(path)?;
    run_str(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MOVE_AND_RESIZE: &str = r#"{
        "panels": [
            {
                "name": "notes",
                "config": { "title": "Notes", "position": { "x": 50.0, "y": 50.0 } }
            },
            {
                "name": "log",
                "config": { "position": { "x": 400.0, "y": 0.0 }, "header_height": 20.0 }
            }
        ],
        "steps": [
            { "type": "down", "panel": "notes", "part": "header", "x": 100.0, "y": 100.0 },
            { "type": "move", "x": 130.0, "y": 90.0 },
            { "type": "up", "x": 130.0, "y": 90.0 },
            { "type": "down", "panel": "log", "part": "RB", "x": 640.0, "y": 240.0 },
            { "type": "move", "x": 440.0, "y": 40.0 },
            { "type": "up", "x": 440.0, "y": 40.0 }
        ]
    }"#;

    #[test]
    fn test_replay_move_and_resize() {
        let report = run_str(MOVE_AND_RESIZE).unwrap();

        let notes = report.panels.iter().find(|p| p.name == "notes").unwrap();
        assert_eq!(notes.title, "Notes");
        assert_eq!(notes.position, Point::new(80.0, 40.0));

        let log = report.panels.iter().find(|p| p.name == "log").unwrap();
        assert_eq!(log.size, Size::new(100.0, 100.0));
        assert_eq!(log.position, Point::new(400.0, 0.0));
        // Last pressed panel is on top.
        assert_eq!(report.panels.last().unwrap().name, "log");

        let resize = report
            .events
            .iter()
            .find(|r| r.panel == "log" && matches!(r.event, RecordedEvent::Resize { .. }))
            .unwrap();
        assert_eq!(resize.step, 5);
        let size = Size::new(100.0, 80.0);
        assert_eq!(resize.event, RecordedEvent::Resize { size });
    }

    #[test]
    fn test_replay_close_removes_panel() {
        let report = run_str(
            r#"{
                "panels": [ { "name": "a" }, { "name": "b" } ],
                "steps": [ { "type": "close", "panel": "a" } ]
            }"#,
        )
        .unwrap();
        assert_eq!(report.panels.len(), 1);
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].panel, "a");
        let position = Point::ZERO;
        assert_eq!(report.events[0].event, RecordedEvent::Closed { position });
    }

    #[test]
    fn test_replay_minimize_and_programmatic_geometry() {
        let report = run_str(
            r#"{
                "panels": [ { "name": "a" } ],
                "steps": [
                    { "type": "minimize", "panel": "a" },
                    { "type": "reposition", "panel": "a", "x": 10.0, "y": 20.0 },
                    { "type": "resize_to", "panel": "a", "width": 320.0, "height": 200.0 }
                ]
            }"#,
        )
        .unwrap();
        let a = &report.panels[0];
        assert!(a.minimized);
        assert_eq!(a.position, Point::new(10.0, 20.0));
        assert_eq!(a.size, Size::new(320.0, 200.0));
        assert_eq!(
            report.events.iter().map(|r| r.event.clone()).collect::<Vec<_>>(),
            vec![
                RecordedEvent::Minified { minimized: true },
                RecordedEvent::MoveEnd {
                    position: Point::new(10.0, 20.0)
                },
                RecordedEvent::Resize {
                    size: Size::new(320.0, 200.0)
                },
            ]
        );
    }

    #[test]
    fn test_unknown_panel_step() {
        let result = run_str(
            r#"{ "panels": [], "steps": [ { "type": "minimize", "panel": "ghost" } ] }"#,
        );
        assert!(matches!(
            result,
            Err(ReplayError::UnknownPanel { ref name, step: 0 }) if name == "ghost"
        ));
    }

    #[test]
    fn test_duplicate_and_invalid_panels() {
        let result = run_str(r#"{ "panels": [ { "name": "a" }, { "name": "a" } ] }"#);
        assert!(matches!(result, Err(ReplayError::DuplicatePanel(_))));

        let result = run_str(
            r#"{ "panels": [ { "name": "a", "config": { "header_height": -5.0 } } ] }"#,
        );
        assert!(matches!(result, Err(ReplayError::Config { .. })));
    }

    #[test]
    fn test_report_serializes() {
        let report = run_str(MOVE_AND_RESIZE).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["events"][0]["type"], "selected");
        assert_eq!(json["events"][0]["panel"], "notes");
        assert!(json["panels"].as_array().unwrap().len() == 2);
    }

    #[test]
    fn test_run_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MOVE_AND_RESIZE.as_bytes()).unwrap();
        let report = run_file(file.path()).unwrap();
        assert_eq!(report.panels.len(), 2);

        let missing = run_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ReplayError::Io(_))));
    }
}
