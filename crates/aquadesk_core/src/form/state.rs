use tracing::debug;

use super::draft::Draft;
use super::errors::{API_KEY, FormErrors};
use super::rules::{RuleSet, validate};
use crate::error::{SubmitError, SubmitFailure};

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Add,
    Edit(Id),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Closed,
    Open,
    Submitting,
}

/// Add/edit form: draft values, per-field errors and the submit state machine.
///
/// ```text
/// Closed -> Open(Add)           -> Submitting -> Closed | Open(Add, errors)
/// Closed -> Open(Edit, prefill) -> Submitting -> Closed | Open(Edit, errors)
/// ```
#[derive(Debug, Clone)]
pub struct FormState<Id> {
    template: Draft,
    draft: Draft,
    mode: FormMode<Id>,
    errors: FormErrors,
    warning: Option<String>,
    phase: FormPhase,
}

impl<Id: Clone> FormState<Id> {
    /// A closed form whose add mode starts from `template`
    pub fn new(template: Draft) -> Self {
        Self {
            draft: template.clone(),
            template,
            mode: FormMode::Add,
            errors: FormErrors::new(),
            warning: None,
            phase: FormPhase::Closed,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn mode(&self) -> &FormMode<Id> {
        &self.mode
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn editing_id(&self) -> Option<&Id> {
        match &self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Add => None,
        }
    }

    pub fn open_add(&mut self) {
        self.reset();
        self.mode = FormMode::Add;
        self.phase = FormPhase::Open;
    }

    pub fn open_edit(&mut self, id: Id, draft: Draft) {
        self.reset();
        self.draft = draft;
        self.mode = FormMode::Edit(id);
        self.phase = FormPhase::Open;
    }

    /// Update one field. Its error, if any, is cleared.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        self.draft.set(name, value);
        self.errors.remove(name);
    }

    /// Set or clear the blocking business-rule warning
    pub fn set_warning(&mut self, warning: Option<String>) {
        self.warning = warning;
    }

    /// Validate and move to `Submitting`.
    ///
    /// Returns the draft to send. On validation failure the form stays open
    /// with its field errors populated.
    pub fn begin_submit(&mut self, rules: &RuleSet) -> Result<Draft, SubmitError> {
        match self.phase {
            FormPhase::Closed => return Err(SubmitError::NotOpen),
            FormPhase::Submitting => return Err(SubmitError::InFlight),
            FormPhase::Open => {}
        }
        if let Some(warning) = &self.warning {
            return Err(SubmitError::Blocked(warning.clone()));
        }

        let errors = validate(&self.draft, rules);
        if !errors.is_empty() {
            debug!(fields = errors.len(), "form validation failed");
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        self.errors.clear();
        self.phase = FormPhase::Submitting;
        Ok(self.draft.clone())
    }

    /// Record the outcome of the external submit call.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmitFailure>) {
        if !self.is_submitting() {
            return;
        }
        match outcome {
            Ok(()) => self.close(),
            Err(failure) => {
                self.errors.insert(API_KEY, failure.message);
                for (field, message) in failure.details {
                    self.errors.insert(field, message);
                }
                self.phase = FormPhase::Open;
            }
        }
    }

    /// Synchronous submit: validate, run `send`, record the outcome.
    pub fn submit<T>(
        &mut self,
        rules: &RuleSet,
        send: impl FnOnce(&Draft) -> Result<T, SubmitFailure>,
    ) -> Result<T, SubmitError> {
        let draft = self.begin_submit(rules)?;
        match send(&draft) {
            Ok(value) => {
                self.finish_submit(Ok(()));
                Ok(value)
            }
            Err(failure) => {
                self.finish_submit(Err(failure.clone()));
                Err(SubmitError::Rejected(failure))
            }
        }
    }

    /// Escape or backdrop click. Refused while a submission is in flight.
    pub fn dismiss(&mut self) -> bool {
        match self.phase {
            FormPhase::Submitting => false,
            FormPhase::Open => {
                self.close();
                true
            }
            FormPhase::Closed => false,
        }
    }

    fn close(&mut self) {
        self.reset();
        self.mode = FormMode::Add;
        self.phase = FormPhase::Closed;
    }

    fn reset(&mut self) {
        self.draft = self.template.clone();
        self.errors.clear();
        self.warning = None;
    }
}
