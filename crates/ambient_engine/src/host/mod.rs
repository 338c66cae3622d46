//! Host boundary
//!
//! The engine draws nothing itself. The host hands it a [`PointSurface`] for
//! the particle cloud and a [`SpriteLayer`] for the glyph overlay, and the
//! engine pushes geometry into them. Both traits are object safe so the
//! composition can hold them boxed.

pub mod memory;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::foundation::math::Mat4;
use crate::sprites::{SpriteIcon, SpriteId, SpriteVisual};

/// Pixel dimensions of a mount region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Either dimension is zero
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, `None` for an empty viewport
    pub fn aspect(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

/// Packed per-particle vertex as uploaded to a surface
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct PointVertex {
    /// Cloud-local position
    pub position: [f32; 3],
    /// Linear RGB in [0, 1]
    pub color: [f32; 3],
}

/// Everything a surface needs to draw one frame of the cloud
#[derive(Debug, Clone, Copy)]
pub struct PointFrame<'a> {
    /// One vertex per particle, in cloud-local space
    pub vertices: &'a [PointVertex],
    /// Cloud rotation (local to world)
    pub model: Mat4,
    /// Camera projection times view
    pub view_projection: Mat4,
    /// Point size in world units
    pub point_size: f32,
}

impl PointFrame<'_> {
    /// Vertex data as raw bytes, ready for a GPU buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices)
    }
}

/// Render target for the particle cloud
pub trait PointSurface {
    /// The drawable area changed size
    fn resize(&mut self, viewport: Viewport);

    /// Draw one frame
    fn draw(&mut self, frame: &PointFrame<'_>);

    /// Remove the surface from the page and release it
    fn detach(&mut self);
}

/// Overlay container holding one visual element per live sprite
pub trait SpriteLayer {
    /// Current container size, `None` once the container is gone
    fn bounds(&self) -> Option<Viewport>;

    /// Create the visual element for a new sprite
    fn attach(&mut self, id: SpriteId, icon: SpriteIcon);

    /// Apply this frame's derived visual to an element
    fn update(&mut self, id: SpriteId, visual: &SpriteVisual);

    /// Remove an element
    fn detach(&mut self, id: SpriteId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_aspect() {
        assert_eq!(Viewport::new(1600, 800).aspect(), Some(2.0));
        assert_eq!(Viewport::new(0, 800).aspect(), None);
        assert!(Viewport::new(640, 0).is_empty());
    }

    #[test]
    fn test_vertex_bytes_are_tightly_packed() {
        let vertices = [PointVertex::default(); 3];
        let frame = PointFrame {
            vertices: &vertices,
            model: Mat4::identity(),
            view_projection: Mat4::identity(),
            point_size: 0.1,
        };
        assert_eq!(frame.vertex_bytes().len(), 3 * 6 * std::mem::size_of::<f32>());
    }
}
