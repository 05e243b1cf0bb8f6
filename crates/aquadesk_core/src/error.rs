use std::collections::BTreeMap;

/// Errors raised when a mutation does not fit the current collection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("record {0} already exists")]
    DuplicateId(String),

    #[error("record {0} not found")]
    RecordNotFound(String),
}

/// Failure reported by the external submit collaborator (REST call, local store).
///
/// `details` maps field names to messages when the backend sent a field-level
/// error payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SubmitFailure {
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl SubmitFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.details.insert(field.into(), message.into());
        self
    }
}

pub type ListResult<T> = std::result::Result<T, ListError>;

/// Why a form submission did not go through
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("form is not open")]
    NotOpen,

    #[error("a submission is already in flight")]
    InFlight,

    /// A business rule blocks the submission regardless of field validity
    #[error("{0}")]
    Blocked(String),

    #[error("{} field(s) failed validation", .0.len())]
    Invalid(crate::form::FormErrors),

    #[error("submission rejected: {0}")]
    Rejected(SubmitFailure),
}
