//! Water-utility admin console
//!
//! Terminal front end over the list engine and resource catalogue in
//! `aquadesk_core`:
//! - A REST client and a background worker so the UI never blocks on I/O
//! - Mount-scoped screen state that drops responses for screens already left
//! - Local key-value storage for collections kept on the client
//! - Tabbed ratatui screens for every resource plus a customer usage dashboard

// ============================================================================
// Core modules
// ============================================================================

pub mod api;
pub mod config;
pub mod logging;
pub mod platform;
pub mod state;
pub mod worker;

// ============================================================================
// Terminal UI (native only)
// ============================================================================

#[cfg(feature = "native")]
pub mod app;
#[cfg(feature = "native")]
pub mod components;
#[cfg(feature = "native")]
pub mod modals;
#[cfg(feature = "native")]
pub mod screens;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

#[cfg(feature = "native")]
pub use app::App;
pub use config::{AppConfig, ConfigError};
pub use logging::init_logging;
