//! Platform abstraction layer
//!
//! Handles browser/native differences. Storage goes through the
//! [`storage::StorageBackend`] port (LocalStorage on the web, an in-memory
//! map natively and in tests). Frame scheduling stays host-owned: the wasm
//! entry point re-requests an animation frame at the end of each callback,
//! while tests and the headless demo drive the simulation by calling
//! `sim::tick` directly.

pub mod storage;

pub use storage::{MemoryStorage, StorageBackend, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
