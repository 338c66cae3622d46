//! Text-mode hosts: the particle cloud and the sprites rasterised to a
//! character grid.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ambient_engine::host::{PointFrame, PointSurface, SpriteLayer, Viewport};
use ambient_engine::sprites::{SpriteIcon, SpriteId, SpriteVisual};
use log::debug;
use nalgebra::Vector4;

const SHADES: [char; 4] = ['.', ':', '*', '#'];

#[derive(Debug, Default)]
struct Canvas {
    viewport: Viewport,
    cells: Vec<char>,
    detached: bool,
}

/// Point surface that rasterises each frame into a `cols × rows` grid
#[derive(Debug, Clone)]
pub struct AsciiSurface {
    cols: usize,
    rows: usize,
    canvas: Rc<RefCell<Canvas>>,
}

impl AsciiSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            canvas: Rc::new(RefCell::new(Canvas {
                cells: vec![' '; cols * rows],
                ..Canvas::default()
            })),
        }
    }

    pub fn is_detached(&self) -> bool {
        self.canvas.borrow().detached
    }

    /// Viewport the host last sized the surface to
    pub fn viewport(&self) -> Viewport {
        self.canvas.borrow().viewport
    }

    /// Last frame with the sprites layered on top
    pub fn render(&self, sprites: &TerminalSpriteLayer) -> String {
        let canvas = self.canvas.borrow();
        let mut cells = canvas.cells.clone();

        if let Some(bounds) = sprites.bounds().filter(|b| !b.is_empty()) {
            for (icon, visual) in sprites.visible() {
                let col = (visual.x / bounds.width as f32 * self.cols as f32) as isize;
                let row = (visual.y / bounds.height as f32 * self.rows as f32) as isize;
                if (0..self.cols as isize).contains(&col) && (0..self.rows as isize).contains(&row) {
                    cells[row as usize * self.cols + col as usize] = icon.fallback_char();
                }
            }
        }

        cells
            .chunks(self.cols)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PointSurface for AsciiSurface {
    fn resize(&mut self, viewport: Viewport) {
        debug!("Surface resized to {}x{}", viewport.width, viewport.height);
        self.canvas.borrow_mut().viewport = viewport;
    }

    fn draw(&mut self, frame: &PointFrame<'_>) {
        let mut canvas = self.canvas.borrow_mut();
        canvas.cells.fill(' ');

        let mvp = frame.view_projection * frame.model;
        for vertex in frame.vertices {
            let [x, y, z] = vertex.position;
            let clip = mvp * Vector4::new(x, y, z, 1.0);
            if clip.w <= 0.0 {
                continue;
            }
            let (nx, ny) = (clip.x / clip.w, clip.y / clip.w);
            if nx.abs() > 1.0 || ny.abs() > 1.0 {
                continue;
            }

            let col = (((nx + 1.0) * 0.5 * self.cols as f32) as usize).min(self.cols - 1);
            let row = (((1.0 - ny) * 0.5 * self.rows as f32) as usize).min(self.rows - 1);
            let shade = ((vertex.color[0] * SHADES.len() as f32) as usize).min(SHADES.len() - 1);
            canvas.cells[row * self.cols + col] = SHADES[shade];
        }
    }

    fn detach(&mut self) {
        debug!("Surface detached");
        self.canvas.borrow_mut().detached = true;
    }
}

#[derive(Debug, Default)]
struct Overlay {
    bounds: Option<Viewport>,
    elements: HashMap<SpriteId, (SpriteIcon, Option<SpriteVisual>)>,
}

/// Sprite container that keeps the latest visual of each element
#[derive(Debug, Clone, Default)]
pub struct TerminalSpriteLayer {
    overlay: Rc<RefCell<Overlay>>,
}

impl TerminalSpriteLayer {
    pub fn new(bounds: Viewport) -> Self {
        let layer = Self::default();
        layer.overlay.borrow_mut().bounds = Some(bounds);
        layer
    }

    /// Follow the container being resized
    pub fn set_bounds(&self, bounds: Viewport) {
        self.overlay.borrow_mut().bounds = Some(bounds);
    }

    pub fn element_count(&self) -> usize {
        self.overlay.borrow().elements.len()
    }

    fn visible(&self) -> Vec<(SpriteIcon, SpriteVisual)> {
        self.overlay
            .borrow()
            .elements
            .values()
            .filter_map(|(icon, visual)| visual.map(|visual| (*icon, visual)))
            .collect()
    }
}

impl SpriteLayer for TerminalSpriteLayer {
    fn bounds(&self) -> Option<Viewport> {
        self.overlay.borrow().bounds
    }

    fn attach(&mut self, id: SpriteId, icon: SpriteIcon) {
        debug!("Sprite {id:?} attached as {icon}");
        self.overlay.borrow_mut().elements.insert(id, (icon, None));
    }

    fn update(&mut self, id: SpriteId, visual: &SpriteVisual) {
        if let Some(element) = self.overlay.borrow_mut().elements.get_mut(&id) {
            element.1 = Some(*visual);
        }
    }

    fn detach(&mut self, id: SpriteId) {
        debug!("Sprite {id:?} detached");
        self.overlay.borrow_mut().elements.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_tracks_viewport() {
        let mut surface = AsciiSurface::new(8, 4);
        surface.resize(Viewport::new(640, 360));
        assert_eq!(surface.viewport(), Viewport::new(640, 360));
    }

    #[test]
    fn test_sprite_layer_follows_resize() {
        let layer = TerminalSpriteLayer::new(Viewport::new(1280, 720));
        layer.set_bounds(Viewport::new(640, 720));
        assert_eq!(layer.bounds(), Some(Viewport::new(640, 720)));
    }
}
