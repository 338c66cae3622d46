//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system for a binary.
///
/// Honours `RUST_LOG` and falls back to `default_filter` when it is unset.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::trace!("Logger already initialised");
    }
}
