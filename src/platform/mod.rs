//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging setup
//! - Input sources
//! - Storage (LocalStorage on web, a JSON file natively)
//! - Frame timing

pub mod input;
pub mod storage;
pub mod time;

pub use input::{Autopilot, Button, InputSource, Keyboard, bound_button};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use time::FixedStep;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;

/// Install the platform logger (safe to call more than once)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Install the platform logger (safe to call more than once)
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Fresh seed for a new run when none is supplied
pub fn entropy_seed() -> u64 {
    rand::random()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
        log::info!("logging still works");
    }
}
