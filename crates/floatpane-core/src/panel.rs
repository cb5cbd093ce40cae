//! The panel: composition of one move controller and eight resize
//! controllers over a single owned geometry record.
//!
//! Controllers only propose values through [`MoveEvent`] and
//! [`ResizeEvent`]; the panel is the one place committed geometry is
//! written, after which every controller is resynced.

use crate::config::PanelConfig;
use crate::geometry::{Edge, PanelGeometry, RuntimeGeometry};
use crate::input::{DragStatus, PointerEvent};
use crate::movable::{MoveController, MoveEvent};
use crate::resizable::{ResizeController, ResizeEvent, ResizeOptions};
use crate::surface::{Attachment, Delivery, ElementId, Owner, PointerSurface, Signal, Slot};
use kurbo::{Point, Rect, Size, Vec2};
use uuid::Uuid;

/// Unique identifier for a panel.
pub type PanelId = Uuid;

/// Events a panel reports to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent<D> {
    /// Any press inside the panel (used for focus and z-order).
    Selected,
    /// A move drag started at the committed position.
    MoveStart { position: Point, data: D },
    /// Live position during a move drag.
    Moving { position: Point, data: D },
    /// Committed position after a drag.
    MoveEnd { position: Point, data: D },
    /// Content size changed (runtime size minus header height).
    Resize(Size),
    /// Minimized state toggled.
    Minified(bool),
    /// The close button was used.
    Closed { position: Point, data: D },
}

/// Element ids of every interactive part of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelElements {
    pub header: ElementId,
    pub tools: ElementId,
    pub body: ElementId,
    /// Indexed by [`Edge::index`].
    pub handles: [ElementId; 8],
}

impl PanelElements {
    /// Allocate a fresh set of elements on `surface`.
    pub fn create(surface: &mut PointerSurface) -> Self {
        Self {
            header: surface.create_element(),
            tools: surface.create_element(),
            body: surface.create_element(),
            handles: std::array::from_fn(|_| surface.create_element()),
        }
    }

    pub fn handle(&self, edge: Edge) -> ElementId {
        self.handles[edge.index()]
    }
}

/// A floating, draggable, resizable panel.
#[derive(Debug)]
pub struct Panel<D> {
    id: PanelId,
    title: String,
    data: D,
    header_height: f64,
    debug: bool,
    use_runtime: bool,
    min_size: Size,
    geometry: PanelGeometry,
    mover: MoveController,
    /// Indexed by [`Edge::index`].
    resizers: [ResizeController; 8],
    /// Remembered so handles can be re-attached after minimizing.
    handle_elements: [Option<ElementId>; 8],
    tools: Option<Attachment>,
    body: Option<Attachment>,
    minimized: bool,
}

impl<D: Clone> Panel<D> {
    /// Create a panel with a fresh id.
    pub fn new(config: &PanelConfig, data: D) -> Self {
        Self::with_id(Uuid::new_v4(), config, data)
    }

    /// Create a panel with a caller-chosen id.
    pub fn with_id(id: PanelId, config: &PanelConfig, data: D) -> Self {
        let options = ResizeOptions {
            debug: config.debug,
            use_runtime: config.use_runtime,
            min_size: config.min_size,
        };
        let mut panel = Self {
            id,
            title: config.title.clone(),
            data,
            header_height: config.header_height,
            debug: config.debug,
            use_runtime: config.use_runtime,
            min_size: config.min_size,
            geometry: PanelGeometry::new(config.position, config.size),
            mover: MoveController::new(Owner::new(id, Slot::Header), config.debug),
            resizers: Edge::ALL.map(|edge| {
                ResizeController::new(Owner::new(id, Slot::Handle(edge)), edge, options)
            }),
            handle_elements: [None; 8],
            tools: None,
            body: None,
            minimized: false,
        };
        panel.sync_controllers();
        panel
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn set_data(&mut self, data: D) {
        self.data = data;
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Committed position.
    pub fn position(&self) -> Point {
        self.geometry.position
    }

    /// Committed size.
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    pub fn runtime(&self) -> RuntimeGeometry {
        self.geometry.runtime
    }

    pub fn active_edge(&self) -> Option<Edge> {
        self.geometry.active_edge
    }

    pub fn move_status(&self) -> DragStatus {
        self.mover.status()
    }

    pub fn resize_status(&self, edge: Edge) -> DragStatus {
        self.resizers[edge.index()].status()
    }

    /// Whether any controller of this panel is dragging.
    pub fn is_dragging(&self) -> bool {
        self.mover.is_dragging() || self.resizers.iter().any(ResizeController::is_dragging)
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn header_height(&self) -> f64 {
        self.header_height
    }

    /// On-screen top-left, including any live preview.
    pub fn translate(&self) -> Point {
        self.geometry.translate()
    }

    pub fn width(&self) -> f64 {
        self.geometry.width()
    }

    /// Displayed height; collapses to the header while minimized.
    pub fn height(&self) -> f64 {
        if self.minimized {
            self.header_height
        } else {
            self.geometry.height()
        }
    }

    pub fn displayed_rect(&self) -> Rect {
        Rect::from_origin_size(self.translate(), Size::new(self.width(), self.height()))
    }

    /// Size handed to the panel content.
    pub fn content_size(&self) -> Size {
        let runtime = self.geometry.runtime.size;
        Size::new(runtime.width, (runtime.height - self.header_height).max(0.0))
    }

    /// Create elements for every part of the panel and attach to them.
    pub fn mount(&mut self, surface: &mut PointerSurface) -> PanelElements {
        let elements = PanelElements::create(surface);
        self.attach_header(surface, elements.header);
        self.attach_tools(surface, elements.tools);
        self.attach_body(surface, elements.body);
        for edge in Edge::ALL {
            self.attach_handle(surface, edge, elements.handle(edge));
        }
        elements
    }

    pub fn attach_header(&mut self, surface: &mut PointerSurface, element: ElementId) {
        self.mover.init(surface, element);
    }

    /// Attach a resize handle. While minimized the element is only
    /// remembered and attached on restore.
    pub fn attach_handle(&mut self, surface: &mut PointerSurface, edge: Edge, element: ElementId) {
        self.handle_elements[edge.index()] = Some(element);
        if !self.minimized {
            self.resizers[edge.index()].init(surface, element);
        }
    }

    pub fn attach_tools(&mut self, surface: &mut PointerSurface, element: ElementId) {
        if let Some(previous) = self.tools.take() {
            previous.detach(surface);
        }
        self.tools = Some(Attachment::press(surface, element, Owner::new(self.id, Slot::Tools)));
    }

    pub fn attach_body(&mut self, surface: &mut PointerSurface, element: ElementId) {
        if let Some(previous) = self.body.take() {
            previous.detach(surface);
        }
        self.body = Some(Attachment::press(surface, element, Owner::new(self.id, Slot::Body)));
    }

    /// Detach every listener this panel registered and drop any drag in
    /// flight. Safe to call repeatedly.
    pub fn dispose(&mut self, surface: &mut PointerSurface) {
        self.mover.dispose(surface);
        for resizer in &mut self.resizers {
            resizer.dispose(surface);
        }
        if let Some(tools) = self.tools.take() {
            tools.detach(surface);
        }
        if let Some(body) = self.body.take() {
            body.detach(surface);
        }
        self.handle_elements = [None; 8];
        // Nobody listens to a disposed panel, so the size report is dropped.
        let _ = self.discard_preview();
        if self.debug {
            log::debug!("[panel {}] disposed", self.id);
        }
    }

    /// Reposition programmatically. Reports `MoveEnd` when the committed
    /// position actually changed.
    pub fn set_position(&mut self, position: Point) -> Option<PanelEvent<D>> {
        let moved = position != self.geometry.position;
        self.geometry.position = position;
        self.geometry.runtime.position = position;
        self.sync_controllers();
        moved.then(|| PanelEvent::MoveEnd {
            position,
            data: self.data.clone(),
        })
    }

    /// Resize programmatically. Each axis is raised to the minimum size.
    pub fn set_size(&mut self, size: Size) -> Option<PanelEvent<D>> {
        let clamped = Size::new(
            size.width.max(self.min_size.width),
            size.height.max(self.min_size.height),
        );
        if clamped != size {
            log::warn!("[panel {}] size {:?} raised to {:?}", self.id, size, clamped);
        }
        self.geometry.size = clamped;
        self.sync_controllers();
        self.set_runtime(RuntimeGeometry::new(self.geometry.runtime.position, clamped))
    }

    /// Update the measured header height.
    pub fn set_header_height(&mut self, height: f64) -> Option<PanelEvent<D>> {
        if height == self.header_height {
            return None;
        }
        self.header_height = height;
        Some(PanelEvent::Resize(self.content_size()))
    }

    /// Flip the minimized state. Resize handles are detached while
    /// minimized; a resize in flight is discarded.
    pub fn toggle_minimized(&mut self, surface: &mut PointerSurface) -> Vec<PanelEvent<D>> {
        let mut events = Vec::new();
        self.minimized = !self.minimized;
        if self.minimized {
            for resizer in &mut self.resizers {
                resizer.dispose(surface);
            }
            if self.geometry.active_edge.is_some() {
                events.extend(self.discard_preview());
            }
        } else {
            for (resizer, element) in self.resizers.iter_mut().zip(self.handle_elements) {
                if let Some(element) = element {
                    resizer.init(surface, element);
                }
            }
        }
        events.push(PanelEvent::Minified(self.minimized));
        events
    }

    /// Report the close request.
    pub fn close(&self) -> PanelEvent<D> {
        PanelEvent::Closed {
            position: self.geometry.position,
            data: self.data.clone(),
        }
    }

    /// Dispatch `event` on `surface` and handle the deliveries addressed to
    /// this panel.
    pub fn handle_pointer(
        &mut self,
        surface: &mut PointerSurface,
        event: &PointerEvent,
    ) -> Vec<PanelEvent<D>> {
        let deliveries = surface.dispatch(event);
        deliveries
            .iter()
            .flat_map(|delivery| self.deliver(surface, delivery))
            .collect()
    }

    /// Handle one delivery. Deliveries for other panels are ignored.
    pub fn deliver(
        &mut self,
        surface: &mut PointerSurface,
        delivery: &Delivery,
    ) -> Vec<PanelEvent<D>> {
        if delivery.owner.panel != self.id {
            return Vec::new();
        }
        match (delivery.owner.slot, delivery.signal) {
            (Slot::Header, signal) => self.drive_move(surface, signal),
            (Slot::Handle(edge), signal) => self.drive_resize(surface, edge, signal),
            (Slot::Tools | Slot::Body, Signal::Press(_)) => vec![PanelEvent::Selected],
            (Slot::Tools | Slot::Body, _) => Vec::new(),
        }
    }

    fn drive_move(&mut self, surface: &mut PointerSurface, signal: Signal) -> Vec<PanelEvent<D>> {
        let mut events = Vec::new();
        let reported = match signal {
            Signal::Press(pointer) => {
                events.push(PanelEvent::Selected);
                if self.mover.is_dragging() {
                    log::warn!("[panel {}] move release lost, committing stale drag", self.id);
                    if let Some(ended) = self.mover.release(surface) {
                        events.extend(self.apply_move(ended));
                    }
                }
                self.mover.press(surface, pointer)
            }
            Signal::Move(pointer) => self.mover.pointer_move(pointer),
            Signal::Release(_) => self.mover.release(surface),
            Signal::Cancel => self.mover.cancel(surface),
        };
        if let Some(event) = reported {
            events.extend(self.apply_move(event));
        }
        events
    }

    fn drive_resize(
        &mut self,
        surface: &mut PointerSurface,
        edge: Edge,
        signal: Signal,
    ) -> Vec<PanelEvent<D>> {
        let mut events = Vec::new();
        let index = edge.index();
        let reported = match signal {
            Signal::Press(pointer) => {
                events.push(PanelEvent::Selected);
                if self.resizers[index].is_dragging() {
                    log::warn!(
                        "[panel {}] {} release lost, committing stale resize",
                        self.id,
                        edge
                    );
                    if let Some(committed) = self.resizers[index].release(surface) {
                        events.extend(self.apply_resize(committed));
                    }
                }
                self.resizers[index].press(surface, pointer)
            }
            Signal::Move(pointer) => self.resizers[index].pointer_move(pointer),
            Signal::Release(_) => self.resizers[index].release(surface),
            Signal::Cancel => self.resizers[index].cancel(surface),
        };
        if let Some(event) = reported {
            events.extend(self.apply_resize(event));
        }
        events
    }

    fn apply_move(&mut self, event: MoveEvent) -> Vec<PanelEvent<D>> {
        match event {
            MoveEvent::Started => {
                let mut events: Vec<_> = self.discard_preview().into_iter().collect();
                events.push(PanelEvent::MoveStart {
                    position: self.geometry.position,
                    data: self.data.clone(),
                });
                events
            }
            MoveEvent::Moving { position, offset } => {
                self.geometry.offset = offset;
                if self.use_runtime {
                    self.geometry.runtime.position = position;
                }
                vec![PanelEvent::Moving {
                    position,
                    data: self.data.clone(),
                }]
            }
            MoveEvent::Ended { position, .. } => {
                let size = self.geometry.size;
                let mut events: Vec<_> = self.commit(position, size).into_iter().collect();
                events.push(PanelEvent::MoveEnd {
                    position,
                    data: self.data.clone(),
                });
                events
            }
            MoveEvent::Cancelled => {
                self.geometry.offset = Vec2::ZERO;
                self.geometry.runtime.position = self.geometry.position;
                vec![PanelEvent::MoveEnd {
                    position: self.geometry.position,
                    data: self.data.clone(),
                }]
            }
        }
    }

    fn apply_resize(&mut self, event: ResizeEvent) -> Vec<PanelEvent<D>> {
        match event {
            ResizeEvent::Started { edge } => {
                self.geometry.offset = Vec2::ZERO;
                self.geometry.size_offset = Vec2::ZERO;
                self.geometry.active_edge = Some(edge);
                Vec::new()
            }
            ResizeEvent::Resizing {
                size_offset,
                runtime,
            } => {
                self.geometry.size_offset = size_offset;
                runtime.and_then(|runtime| self.set_runtime(runtime)).into_iter().collect()
            }
            ResizeEvent::Committed { position, size } => {
                let moved = position != self.geometry.position;
                let mut events: Vec<_> = self.commit(position, size).into_iter().collect();
                if moved {
                    events.push(PanelEvent::MoveEnd {
                        position,
                        data: self.data.clone(),
                    });
                }
                events
            }
            ResizeEvent::Cancelled => self.discard_preview().into_iter().collect(),
        }
    }

    /// Write committed geometry, clear the live preview and resync.
    fn commit(&mut self, position: Point, size: Size) -> Option<PanelEvent<D>> {
        self.geometry.position = position;
        self.geometry.size = size;
        self.geometry.offset = Vec2::ZERO;
        self.geometry.size_offset = Vec2::ZERO;
        self.geometry.active_edge = None;
        self.sync_controllers();
        self.set_runtime(RuntimeGeometry::new(position, size))
    }

    /// Drop any live offsets and put runtime geometry back on the
    /// committed geometry.
    fn discard_preview(&mut self) -> Option<PanelEvent<D>> {
        self.geometry.offset = Vec2::ZERO;
        self.geometry.size_offset = Vec2::ZERO;
        self.geometry.active_edge = None;
        let committed = RuntimeGeometry::new(self.geometry.position, self.geometry.size);
        self.set_runtime(committed)
    }

    /// Store runtime geometry, reporting the content size if it changed.
    fn set_runtime(&mut self, runtime: RuntimeGeometry) -> Option<PanelEvent<D>> {
        let resized = runtime.size != self.geometry.runtime.size;
        self.geometry.runtime = runtime;
        resized.then(|| PanelEvent::Resize(self.content_size()))
    }

    fn sync_controllers(&mut self) {
        self.mover.update(self.geometry.position);
        for resizer in &mut self.resizers {
            resizer.update_position(self.geometry.position);
            resizer.update_size(self.geometry.size);
        }
    }
}
