//! In-memory hosts
//!
//! Recording implementations of the host traits. Clones share state, so a
//! caller can hand one clone to the engine and inspect another.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{PointFrame, PointSurface, PointVertex, SpriteLayer, Viewport};
use crate::foundation::math::Mat4;
use crate::sprites::{SpriteIcon, SpriteId, SpriteVisual};

#[derive(Debug, Default)]
struct SurfaceLog {
    viewport: Option<Viewport>,
    draws: u64,
    draws_after_detach: u64,
    vertices: Vec<PointVertex>,
    model: Option<Mat4>,
    point_size: f32,
    detach_calls: u32,
}

/// Point surface that remembers the last frame it was given
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl MemorySurface {
    /// Create an attached, never-drawn surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames drawn
    pub fn draws(&self) -> u64 {
        self.log.borrow().draws
    }

    /// Frames drawn after the surface was detached
    pub fn draws_after_detach(&self) -> u64 {
        self.log.borrow().draws_after_detach
    }

    /// Vertices of the last drawn frame
    pub fn last_vertices(&self) -> Vec<PointVertex> {
        self.log.borrow().vertices.clone()
    }

    /// Model matrix of the last drawn frame
    pub fn last_model(&self) -> Option<Mat4> {
        self.log.borrow().model
    }

    /// Point size of the last drawn frame
    pub fn last_point_size(&self) -> f32 {
        self.log.borrow().point_size
    }

    /// Size set by the last resize
    pub fn viewport(&self) -> Option<Viewport> {
        self.log.borrow().viewport
    }

    /// Whether `detach` was called
    pub fn is_detached(&self) -> bool {
        self.log.borrow().detach_calls > 0
    }

    /// How many times `detach` was called
    pub fn detach_calls(&self) -> u32 {
        self.log.borrow().detach_calls
    }
}

impl PointSurface for MemorySurface {
    fn resize(&mut self, viewport: Viewport) {
        self.log.borrow_mut().viewport = Some(viewport);
    }

    fn draw(&mut self, frame: &PointFrame<'_>) {
        let mut log = self.log.borrow_mut();
        if log.detach_calls > 0 {
            log.draws_after_detach += 1;
        }
        log.draws += 1;
        log.vertices.clear();
        log.vertices.extend_from_slice(frame.vertices);
        log.model = Some(frame.model);
        log.point_size = frame.point_size;
    }

    fn detach(&mut self) {
        self.log.borrow_mut().detach_calls += 1;
    }
}

/// A sprite element as the layer last saw it
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryElement {
    /// Glyph the element was created with
    pub icon: SpriteIcon,
    /// Last applied visual, if any frame reached it
    pub visual: Option<SpriteVisual>,
    /// Number of visual updates applied
    pub updates: u32,
}

#[derive(Debug, Default)]
struct LayerLog {
    bounds: Option<Viewport>,
    elements: HashMap<SpriteId, MemoryElement>,
    attach_calls: u64,
    detach_calls: u64,
    stray_detaches: u64,
    stray_updates: u64,
    progress_regressions: u64,
    max_progress: f32,
}

/// Sprite container that tracks its live elements
#[derive(Debug, Clone, Default)]
pub struct MemorySpriteLayer {
    log: Rc<RefCell<LayerLog>>,
}

impl MemorySpriteLayer {
    /// Create a container with the given size
    pub fn new(bounds: Viewport) -> Self {
        let layer = Self::default();
        layer.set_bounds(Some(bounds));
        layer
    }

    /// Resize the container, or remove it from the page with `None`
    pub fn set_bounds(&self, bounds: Option<Viewport>) {
        self.log.borrow_mut().bounds = bounds;
    }

    /// Elements currently attached
    pub fn attached_count(&self) -> usize {
        self.log.borrow().elements.len()
    }

    /// Snapshot of one element
    pub fn element(&self, id: SpriteId) -> Option<MemoryElement> {
        self.log.borrow().elements.get(&id).cloned()
    }

    /// Snapshot of every attached element
    pub fn elements(&self) -> Vec<(SpriteId, MemoryElement)> {
        self.log
            .borrow()
            .elements
            .iter()
            .map(|(id, element)| (*id, element.clone()))
            .collect()
    }

    /// Total `attach` calls
    pub fn attach_calls(&self) -> u64 {
        self.log.borrow().attach_calls
    }

    /// Total `detach` calls
    pub fn detach_calls(&self) -> u64 {
        self.log.borrow().detach_calls
    }

    /// `detach` calls for ids that were not attached
    pub fn stray_detaches(&self) -> u64 {
        self.log.borrow().stray_detaches
    }

    /// `update` calls for ids that were not attached
    pub fn stray_updates(&self) -> u64 {
        self.log.borrow().stray_updates
    }

    /// Updates whose progress went backwards for the same element
    pub fn progress_regressions(&self) -> u64 {
        self.log.borrow().progress_regressions
    }

    /// Highest progress ever rendered
    pub fn max_progress(&self) -> f32 {
        self.log.borrow().max_progress
    }
}

impl SpriteLayer for MemorySpriteLayer {
    fn bounds(&self) -> Option<Viewport> {
        self.log.borrow().bounds
    }

    fn attach(&mut self, id: SpriteId, icon: SpriteIcon) {
        let mut log = self.log.borrow_mut();
        log.attach_calls += 1;
        log.elements.insert(id, MemoryElement { icon, visual: None, updates: 0 });
    }

    fn update(&mut self, id: SpriteId, visual: &SpriteVisual) {
        let mut guard = self.log.borrow_mut();
        let log = &mut *guard;
        log.max_progress = log.max_progress.max(visual.progress);

        let Some(element) = log.elements.get_mut(&id) else {
            log.stray_updates += 1;
            return;
        };
        if element.visual.is_some_and(|last| visual.progress < last.progress) {
            log.progress_regressions += 1;
        }
        element.visual = Some(*visual);
        element.updates += 1;
    }

    fn detach(&mut self, id: SpriteId) {
        let mut log = self.log.borrow_mut();
        log.detach_calls += 1;
        if log.elements.remove(&id).is_none() {
            log.stray_detaches += 1;
        }
    }
}
