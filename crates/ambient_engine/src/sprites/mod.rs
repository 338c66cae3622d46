//! Sprite layer
//!
//! Legal-themed glyphs that rise from the bottom edge of the overlay, drift
//! sideways, pulse and spin, and are removed when their lifetime runs out.

pub mod config;
pub mod emitter;
pub mod icon;
pub mod lifetime;
pub mod sprite;

pub use config::SpriteEmitterConfig;
pub use emitter::{AmbientSpriteEmitter, EmitterState, SpriteId};
pub use icon::SpriteIcon;
pub use lifetime::Lifetime;
pub use sprite::{Sprite, SpriteVisual};
