//! Error types
//!
//! None of these ever reach the host: the public operations log them and skip
//! the affected frame or spawn.

use thiserror::Error;

/// Reasons a unit of ambient work was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmbientError {
    /// No surface or container was provided at mount time
    #[error("mount target is absent")]
    MountMissing,

    /// The viewport or container has no area
    #[error("viewport is empty ({width}x{height})")]
    EmptyViewport {
        /// Reported width in pixels
        width: u32,
        /// Reported height in pixels
        height: u32,
    },

    /// The sprite container no longer reports bounds
    #[error("sprite container is detached")]
    ContainerDetached,

    /// The subsystem was already set up
    #[error("{operation} was already performed")]
    AlreadyDone {
        /// Name of the skipped operation
        operation: &'static str,
    },

    /// The operation needs a running subsystem
    #[error("{operation} requires a running subsystem")]
    NotRunning {
        /// Name of the skipped operation
        operation: &'static str,
    },

    /// The active sprite set is full
    #[error("active sprite cap of {cap} reached")]
    SpriteCapReached {
        /// Configured cap
        cap: usize,
    },
}

/// Result alias for internal engine steps
pub type AmbientResult<T> = Result<T, AmbientError>;
