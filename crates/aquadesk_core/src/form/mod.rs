//! Add/edit form state shared by every entity form.

mod draft;
mod errors;
pub mod rules;
mod state;

pub use draft::Draft;
pub use errors::{API_KEY, FormErrors};
pub use rules::{FieldKind, FieldRule, FieldSpec, RuleSet, validate};
pub use state::{FormMode, FormPhase, FormState};
