//! Water-utility console core library
//!
//! This crate holds the logic shared by every administrative list screen and
//! the customer portal of the water-utility console:
//! - A generic list-state engine (filter, sort, paginate, select, mutate)
//! - Form drafts with declarative validation and a submission state machine
//! - The resource catalogue (users, connections, bills, readings, ...)
//! - Seeded monthly usage series for the customer dashboard
//!
//! Nothing in here performs I/O; the console crate supplies the REST client,
//! local storage and terminal rendering.
//!
//! # Example
//!
//! ```ignore
//! use aquadesk_core::list::{ListState, Mutation};
//! use aquadesk_core::resources::{Resource, User};
//!
//! let mut list = ListState::new(User::list_config());
//! list.apply_mutation(Mutation::Create(user))?;
//! let view = list.view();
//! assert_eq!(view.total_filtered, 1);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod form;
pub mod list;
pub mod record;
pub mod usage;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod resources;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{ListError, ListResult, SubmitError, SubmitFailure};
pub use form::{
    Draft, FieldKind, FieldRule, FormErrors, FormMode, FormPhase, FormState, RuleSet, validate,
};
pub use list::{
    CategoryFilter, ListConfig, ListState, Mutation, SortDirection, SortValue, View, ViewParams,
    compute_view,
};
pub use record::Record;
pub use resources::{Resource, ResourceKind};
pub use usage::{UsagePoint, UsageSummary};
