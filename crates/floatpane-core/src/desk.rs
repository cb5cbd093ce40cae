//! A desk of panels sharing one pointer surface.

use crate::config::PanelConfig;
use crate::input::PointerEvent;
use crate::panel::{Panel, PanelElements, PanelEvent, PanelId};
use crate::surface::PointerSurface;
use std::collections::HashMap;
use thiserror::Error;

/// Desk errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeskError {
    #[error("Panel not found: {0}")]
    UnknownPanel(PanelId),
}

/// Result type for desk operations.
pub type DeskResult<T> = Result<T, DeskError>;

/// Owns the pointer surface and every panel on it.
///
/// Deliveries are handed to panels strictly in the order the surface
/// produced them, so a release always reaches the dragging controller
/// before any later press is considered.
#[derive(Debug)]
pub struct Desk<D> {
    surface: PointerSurface,
    panels: HashMap<PanelId, Panel<D>>,
    /// Back to front.
    z_order: Vec<PanelId>,
}

impl<D: Clone> Default for Desk<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Clone> Desk<D> {
    pub fn new() -> Self {
        Self {
            surface: PointerSurface::new(),
            panels: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    pub fn surface(&self) -> &PointerSurface {
        &self.surface
    }

    /// Create a panel on top of the stack and attach all of its parts.
    pub fn add_panel(&mut self, config: &PanelConfig, data: D) -> (PanelId, PanelElements) {
        let mut panel = Panel::new(config, data);
        let elements = panel.mount(&mut self.surface);
        let id = panel.id();
        self.panels.insert(id, panel);
        self.z_order.push(id);
        log::debug!("Added panel {} ({})", id, config.title);
        (id, elements)
    }

    /// Dispose and remove a panel.
    pub fn remove_panel(&mut self, id: PanelId) -> DeskResult<Panel<D>> {
        let mut panel = self.panels.remove(&id).ok_or(DeskError::UnknownPanel(id))?;
        panel.dispose(&mut self.surface);
        self.z_order.retain(|&other| other != id);
        Ok(panel)
    }

    /// Close a panel: report `Closed` and remove it.
    pub fn close_panel(&mut self, id: PanelId) -> DeskResult<PanelEvent<D>> {
        let event = self.panel(id)?.close();
        self.remove_panel(id)?;
        Ok(event)
    }

    pub fn toggle_minimized(&mut self, id: PanelId) -> DeskResult<Vec<PanelEvent<D>>> {
        let panel = self.panels.get_mut(&id).ok_or(DeskError::UnknownPanel(id))?;
        Ok(panel.toggle_minimized(&mut self.surface))
    }

    pub fn panel(&self, id: PanelId) -> DeskResult<&Panel<D>> {
        self.panels.get(&id).ok_or(DeskError::UnknownPanel(id))
    }

    pub fn panel_mut(&mut self, id: PanelId) -> DeskResult<&mut Panel<D>> {
        self.panels.get_mut(&id).ok_or(DeskError::UnknownPanel(id))
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panel ids, back to front.
    pub fn z_order(&self) -> &[PanelId] {
        &self.z_order
    }

    /// The front-most panel, which is also the focused one.
    pub fn active(&self) -> Option<PanelId> {
        self.z_order.last().copied()
    }

    /// Move a panel to the front.
    pub fn bring_to_front(&mut self, id: PanelId) -> DeskResult<()> {
        let index = self
            .z_order
            .iter()
            .position(|&other| other == id)
            .ok_or(DeskError::UnknownPanel(id))?;
        let id = self.z_order.remove(index);
        self.z_order.push(id);
        Ok(())
    }

    /// Whether any panel has a drag in flight.
    pub fn is_dragging(&self) -> bool {
        self.surface.captured_by().is_some()
    }

    /// Route one pointer event through the surface to the panels.
    ///
    /// Any `Selected` panel is raised to the front.
    pub fn dispatch(&mut self, event: &PointerEvent) -> Vec<(PanelId, PanelEvent<D>)> {
        let mut out = Vec::new();
        for delivery in self.surface.dispatch(event) {
            let id = delivery.owner.panel;
            let Some(panel) = self.panels.get_mut(&id) else {
                continue;
            };
            out.extend(
                panel
                    .deliver(&mut self.surface, &delivery)
                    .into_iter()
                    .map(|event| (id, event)),
            );
        }

        let selected: Vec<PanelId> = out
            .iter()
            .filter(|(_, event)| matches!(event, PanelEvent::Selected))
            .map(|(id, _)| *id)
            .collect();
        for id in selected {
            // Ids come from live panels, so this cannot fail.
            let _ = self.bring_to_front(id);
        }
        out
    }
}
