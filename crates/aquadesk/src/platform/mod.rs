//! Platform abstraction for client-side persistence.
//!
//! Connections are the one collection the backend does not own. They live in
//! a key-value slot: a JSON file per key on native builds, browser
//! LocalStorage on the web.

mod storage;

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "web")]
pub mod web;

pub use storage::{MemoryStorage, Storage, StorageError, load_collection, save_collection};

#[cfg(feature = "native")]
pub use native::FileStorage;

#[cfg(feature = "web")]
pub use web::WebStorage;
