//! Everything one resource screen owns, independent of rendering.
//!
//! A [`ResourceState`] pairs the list engine with the add/edit form and
//! knows where its records come from: the REST backend through the API
//! worker, or a local key-value slot.

use std::cell::Cell;
use std::rc::Rc;

use aquadesk_core::form::{Draft, FormMode, FormState, RuleSet};
use aquadesk_core::list::{ListState, Mutation};
use aquadesk_core::resources::{
    Alert, AuditLog, Bill, Complaint, Connection, Customer, Employee, QualityRecord, Reading, User,
    WaterSource,
};
use aquadesk_core::{Record, Resource, ResourceKind, SubmitError, SubmitFailure};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::app_state::AppState;
use super::directory::Directory;
use super::modal_session::{Focus, FocusCell, ModalSession};
use super::mounts::{ScreenId, ScreenToken};
use crate::api::{ApiCall, ApiError, ApiOutcome, DeleteReport};
use crate::platform::{Storage, load_collection, save_collection};

/// Per-resource hooks that involve state outside the screen
pub trait ScreenResource: Resource {
    /// Called with the whole collection after every load or change
    fn collection_changed(_items: &[Self], _directory: &mut Directory) {}

    /// Extra line shown under the form title
    fn form_hint(_draft: &Draft, _directory: &Directory) -> Option<String> {
        None
    }
}

impl ScreenResource for User {
    fn collection_changed(items: &[Self], directory: &mut Directory) {
        directory.replace_users(items);
    }
}

impl ScreenResource for Connection {
    fn form_hint(draft: &Draft, directory: &Directory) -> Option<String> {
        directory.describe_user(draft.get("UserID"))
    }
}

impl ScreenResource for Bill {}
impl ScreenResource for Reading {}
impl ScreenResource for WaterSource {}
impl ScreenResource for Employee {}
impl ScreenResource for Complaint {}
impl ScreenResource for Alert {}
impl ScreenResource for AuditLog {}
impl ScreenResource for Customer {}
impl ScreenResource for QualityRecord {}

pub enum DataSource {
    Remote,
    Local {
        storage: Rc<dyn Storage>,
        key: &'static str,
    },
}

impl DataSource {
    /// Local slot when the resource has one, the backend otherwise
    pub fn for_kind(kind: ResourceKind, storage: &Rc<dyn Storage>) -> Self {
        match kind.storage_key() {
            Some(key) => DataSource::Local {
                storage: Rc::clone(storage),
                key,
            },
            None => DataSource::Remote,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Shown as a banner until the next successful load
    Failed(String),
}

/// One-line message above the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Keyboard position inside the open form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormCursor {
    pub field: usize,
    /// Character offset into the focused value while editing
    pub cursor: usize,
    pub editing: bool,
}

#[derive(Debug)]
pub enum ResourceModal<Id> {
    Form(FormCursor),
    ConfirmDelete(Vec<Id>),
}

pub struct ResourceState<R: ScreenResource> {
    list: ListState<R>,
    form: FormState<R::Id>,
    rules: RuleSet,
    source: DataSource,
    load: LoadStatus,
    notice: Option<Notice>,
    /// Highlighted row on the current page
    cursor: usize,
    focus: FocusCell,
    modal: Option<ModalSession<ResourceModal<R::Id>>>,
    token: Option<ScreenToken>,
}

impl<R: ScreenResource> ResourceState<R> {
    pub fn new(source: DataSource, page_size: Option<usize>) -> Self {
        let mut config = R::list_config();
        if let Some(size) = page_size {
            config = config.page_size(size);
        }
        Self {
            list: ListState::new(config),
            form: FormState::new(R::template()),
            rules: R::form_rules(),
            source,
            load: LoadStatus::Idle,
            notice: None,
            cursor: 0,
            focus: Rc::new(Cell::new(Focus::Table)),
            modal: None,
            token: None,
        }
    }

    pub fn screen() -> ScreenId {
        ScreenId::Resource(R::KIND)
    }

    // ========== Accessors ==========

    pub fn list(&self) -> &ListState<R> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<R> {
        &mut self.list
    }

    pub fn form(&self) -> &FormState<R::Id> {
        &self.form
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus(&self) -> Focus {
        self.focus.get()
    }

    pub fn modal(&self) -> Option<&ResourceModal<R::Id>> {
        self.modal.as_ref().map(|m| &m.content)
    }

    pub fn is_local(&self) -> bool {
        matches!(self.source, DataSource::Local { .. })
    }

    /// Cursor, draft and rules of the open form, for key handling
    pub fn form_parts(&mut self) -> Option<(&mut FormCursor, &Draft, &RuleSet)> {
        match self.modal.as_mut().map(|m| &mut m.content) {
            Some(ResourceModal::Form(cursor)) => Some((cursor, self.form.draft(), &self.rules)),
            _ => None,
        }
    }

    pub fn form_hint(&self, directory: &Directory) -> Option<String> {
        R::form_hint(self.form.draft(), directory)
    }

    pub fn current_record(&self) -> Option<&R> {
        self.list.view().page_items.get(self.cursor).copied()
    }

    // ========== Lifecycle ==========

    pub fn mount(&mut self, state: &mut AppState) {
        self.token = Some(state.mounts.mount(Self::screen()));
        self.reload(state);
    }

    /// Leave the screen. Anything still in flight for this mount is orphaned.
    pub fn unmount(&mut self, state: &mut AppState) {
        state.mounts.unmount(Self::screen());
        self.token = None;
        if self.form.is_submitting() {
            self.form
                .finish_submit(Err(SubmitFailure::new("Screen closed before the server answered")));
        }
        self.form.dismiss();
        self.modal = None;
        self.focus.set(Focus::Table);
        if self.load == LoadStatus::Loading {
            self.load = LoadStatus::Idle;
        }
    }

    /// Fetch the collection again (initial load and the retry key)
    pub fn reload(&mut self, state: &mut AppState) {
        if let Some((storage, key)) = self.local() {
            match load_collection::<R>(storage.as_ref(), key) {
                Ok(items) => {
                    self.list.replace_items(items);
                    self.load = LoadStatus::Loaded;
                    self.collection_changed(state);
                }
                Err(e) => {
                    warn!(resource = %R::KIND, error = %e, "Local collection unreadable");
                    self.load = LoadStatus::Failed(format!(
                        "Failed to load {}: {e}",
                        R::KIND.title().to_lowercase()
                    ));
                }
            }
            return;
        }

        let Some(token) = self.token else {
            debug!(resource = %R::KIND, "Reload ignored while unmounted");
            return;
        };
        self.load = LoadStatus::Loading;
        state.request(token, R::KIND, ApiCall::List);
    }

    fn local(&self) -> Option<(Rc<dyn Storage>, &'static str)> {
        match &self.source {
            DataSource::Local { storage, key } => Some((Rc::clone(storage), key)),
            DataSource::Remote => None,
        }
    }

    fn collection_changed(&mut self, state: &mut AppState) {
        R::collection_changed(self.list.items(), &mut state.directory);
        self.clamp_cursor();
    }

    // ========== Navigation ==========

    /// Move the row cursor, wrapping within the page
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.list.view().page_items.len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    pub fn next_page(&mut self) {
        self.list.next_page();
        self.cursor = 0;
    }

    pub fn prev_page(&mut self) {
        self.list.prev_page();
        self.cursor = 0;
    }

    fn clamp_cursor(&mut self) {
        let len = self.list.view().page_items.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn focus_search(&mut self) {
        if self.modal.is_none() {
            self.focus.set(Focus::Search);
        }
    }

    pub fn focus_table(&mut self) {
        if self.modal.is_none() {
            self.focus.set(Focus::Table);
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut term = self.list.search().to_string();
        term.push(c);
        self.list.set_search(term);
        self.cursor = 0;
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.list.search().to_string();
        term.pop();
        self.list.set_search(term);
        self.cursor = 0;
    }

    pub fn cycle_category(&mut self) {
        self.list.cycle_category();
        self.cursor = 0;
    }

    pub fn cycle_sort_key(&mut self) {
        self.list.cycle_sort_key();
        self.cursor = 0;
    }

    pub fn toggle_sort_direction(&mut self) {
        self.list.toggle_sort_direction();
        self.cursor = 0;
    }

    pub fn reset_view(&mut self) {
        self.list.reset_view();
        self.cursor = 0;
    }

    pub fn toggle_current_selection(&mut self) {
        if let Some(id) = self.current_record().map(Record::id) {
            self.list.toggle_select(&id);
        }
    }

    pub fn toggle_page_selection(&mut self) {
        let ids = self.list.visible_ids();
        self.list.toggle_select_all_visible(&ids);
    }

    // ========== Modals ==========

    fn open_modal(&mut self, content: ResourceModal<R::Id>) {
        // Close any previous session first so its focus is restored before the
        // new one captures it
        self.modal = None;
        self.modal = Some(ModalSession::open(&self.focus, content));
    }

    /// Escape: close the modal unless a submission is in flight
    pub fn dismiss_modal(&mut self) {
        let is_form = matches!(self.modal(), Some(ResourceModal::Form(_)));
        let closes = if is_form {
            self.form.dismiss()
        } else {
            self.modal.is_some()
        };
        if closes {
            self.modal = None;
        }
    }

    pub fn open_add(&mut self) {
        if R::READ_ONLY {
            self.notice = Some(Notice::error(format!(
                "{} is read-only",
                R::KIND.title()
            )));
            return;
        }
        self.form.open_add();
        self.refresh_guard();
        self.open_modal(ResourceModal::Form(FormCursor::default()));
    }

    pub fn open_edit(&mut self) {
        if R::READ_ONLY {
            self.notice = Some(Notice::error(format!(
                "{} is read-only",
                R::KIND.title()
            )));
            return;
        }
        let Some(record) = self.current_record() else {
            return;
        };
        let id = record.id();
        match Draft::from_record(record) {
            Ok(draft) => {
                self.form.open_edit(id, draft);
                self.refresh_guard();
                self.open_modal(ResourceModal::Form(FormCursor::default()));
            }
            Err(e) => {
                warn!(resource = %R::KIND, id = %id, error = %e, "Could not prefill edit form");
                self.notice = Some(Notice::error(format!("Cannot edit {id}: {e}")));
            }
        }
    }

    pub fn set_field(&mut self, name: &str, value: String) {
        self.form.set_field(name, value);
        self.refresh_guard();
    }

    fn refresh_guard(&mut self) {
        let warning =
            R::submission_guard(self.list.items(), self.form.draft(), self.form.editing_id());
        self.form.set_warning(warning);
    }

    pub fn request_delete_current(&mut self) {
        if R::READ_ONLY {
            return;
        }
        if let Some(id) = self.current_record().map(Record::id) {
            self.open_modal(ResourceModal::ConfirmDelete(vec![id]));
        }
    }

    pub fn request_delete_selected(&mut self) {
        if R::READ_ONLY {
            return;
        }
        let ids = self.list.selected_in_order();
        if ids.is_empty() {
            self.notice = Some(Notice::info("Nothing selected. Space marks a row."));
            return;
        }
        self.open_modal(ResourceModal::ConfirmDelete(ids));
    }

    /// Text for the delete confirmation
    pub fn delete_prompt(&self) -> Option<String> {
        match self.modal() {
            Some(ResourceModal::ConfirmDelete(ids)) if ids.len() == 1 => Some(format!(
                "Delete {} {}?",
                R::KIND.noun(),
                ids[0]
            )),
            Some(ResourceModal::ConfirmDelete(ids)) => Some(format!(
                "Delete {}?",
                count_noun(ids.len(), R::KIND.noun())
            )),
            _ => None,
        }
    }

    // ========== Submission ==========

    pub fn submit(&mut self, state: &mut AppState) {
        if self.is_local() {
            self.submit_local(state);
        } else {
            self.submit_remote(state);
        }
    }

    fn submit_remote(&mut self, state: &mut AppState) {
        let Some(token) = self.token else {
            return;
        };
        match self.form.begin_submit(&self.rules) {
            Ok(draft) => {
                let body = draft.to_json(&self.rules);
                let call = match self.form.editing_id() {
                    Some(id) => ApiCall::Update {
                        id: id.to_string(),
                        body,
                    },
                    None => ApiCall::Create(body),
                };
                state.request(token, R::KIND, call);
            }
            Err(e) => self.submit_refused(e),
        }
    }

    fn submit_local(&mut self, state: &mut AppState) {
        let Some((storage, key)) = self.local() else {
            return;
        };
        let mode = self.form.mode().clone();
        let rules = &self.rules;
        let list = &mut self.list;
        let result = self.form.submit(rules, |draft| {
            commit_local(list, storage.as_ref(), key, &mode, draft, rules)
        });
        match result {
            Ok(touched) => {
                self.modal = None;
                self.notice = Some(Notice::info(saved_message::<R>(&touched)));
                self.collection_changed(state);
            }
            Err(e) => self.submit_refused(e),
        }
    }

    fn submit_refused(&mut self, error: SubmitError) {
        match error {
            SubmitError::Invalid(errors) => {
                // Jump to the first field that needs attention
                let first = self
                    .rules
                    .fields()
                    .iter()
                    .position(|f| errors.get(f.name).is_some());
                if let (Some(idx), Some((cursor, _, _))) = (first, self.form_parts()) {
                    cursor.field = idx;
                    cursor.editing = false;
                }
            }
            SubmitError::Rejected(failure) => {
                info!(resource = %R::KIND, error = %failure, "Local save rejected");
            }
            other => debug!(resource = %R::KIND, reason = %other, "Submit refused"),
        }
    }

    pub fn confirm_delete(&mut self, state: &mut AppState) {
        let ids = match self.modal() {
            Some(ResourceModal::ConfirmDelete(ids)) => ids.clone(),
            _ => return,
        };
        self.modal = None;

        if let Some((storage, key)) = self.local() {
            let previous = self.list.items().to_vec();
            let marked = self.list.selected_in_order();
            let removed = match self.list.apply_mutation(Mutation::BulkDelete(ids)) {
                Ok(removed) => removed,
                Err(e) => {
                    self.notice = Some(Notice::error(e.to_string()));
                    return;
                }
            };
            if let Err(e) = save_collection(storage.as_ref(), key, self.list.items()) {
                warn!(resource = %R::KIND, error = %e, "Local delete not saved; rolled back");
                self.list.restore(previous, &marked);
                self.clamp_cursor();
                self.notice = Some(Notice::error(format!("Could not save to local storage: {e}")));
                return;
            }
            self.notice = Some(Notice::info(format!(
                "Deleted {}",
                count_noun(removed.len(), R::KIND.noun())
            )));
            self.collection_changed(state);
            return;
        }

        let Some(token) = self.token else {
            return;
        };
        let mut ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let call = if ids.len() == 1 {
            ApiCall::Delete { id: ids.remove(0) }
        } else {
            ApiCall::BulkDelete { ids }
        };
        state.request(token, R::KIND, call);
    }

    // ========== Responses ==========

    /// Apply a worker response addressed to this screen's current mount
    pub fn handle_response(&mut self, outcome: ApiOutcome, state: &mut AppState) {
        match outcome {
            ApiOutcome::Listed(Ok(values)) => self.apply_listing(values, state),
            ApiOutcome::Listed(Err(e)) => {
                self.load = LoadStatus::Failed(format!(
                    "Failed to load {}: {e}",
                    R::KIND.title().to_lowercase()
                ));
            }
            ApiOutcome::Created(result) => self.finish_remote_save(None, result, state),
            ApiOutcome::Updated { id, result } => self.finish_remote_save(Some(id), result, state),
            ApiOutcome::Deleted { id, result } => {
                self.finish_remote_delete(vec![DeleteReport { id, result }], state);
            }
            ApiOutcome::BulkDeleted(reports) => self.finish_remote_delete(reports, state),
        }
    }

    fn apply_listing(&mut self, values: Vec<Value>, state: &mut AppState) {
        let total = values.len();
        let items: Vec<R> = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<R>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(resource = %R::KIND, error = %e, "Skipping unreadable record");
                    None
                }
            })
            .collect();
        let skipped = total - items.len();

        self.list.replace_items(items);
        self.load = LoadStatus::Loaded;
        if skipped > 0 {
            self.notice = Some(Notice::error(format!(
                "{} could not be read and {} skipped",
                count_noun(skipped, R::KIND.noun()),
                if skipped == 1 { "was" } else { "were" }
            )));
        }
        self.collection_changed(state);
    }

    /// Id in the collection whose text form is `raw`
    fn find_id(&self, raw: &str) -> Option<R::Id> {
        self.list
            .items()
            .iter()
            .map(Record::id)
            .find(|id| id.to_string() == raw)
    }

    fn finish_remote_save(
        &mut self,
        edited: Option<String>,
        result: Result<Value, ApiError>,
        state: &mut AppState,
    ) {
        let value = match result {
            Ok(value) => value,
            Err(e) => {
                // Form stays open with the server's message
                self.form.finish_submit(Err(e.to_submit_failure()));
                return;
            }
        };
        self.form.finish_submit(Ok(()));
        self.modal = None;

        let applied = serde_json::from_value::<R>(value)
            .map_err(|e| format!("unreadable response: {e}"))
            .and_then(|record| {
                let mutation = match edited {
                    None => Mutation::Create(record),
                    Some(raw) => {
                        let id = self
                            .find_id(&raw)
                            .ok_or_else(|| format!("{raw} is no longer listed"))?;
                        Mutation::Update { id, record }
                    }
                };
                self.list.apply_mutation(mutation).map_err(|e| e.to_string())
            });

        match applied {
            Ok(touched) => {
                self.notice = Some(Notice::info(saved_message::<R>(&touched)));
                self.collection_changed(state);
            }
            Err(reason) => {
                warn!(
                    resource = %R::KIND,
                    reason = %reason,
                    "Saved record could not be merged; reloading"
                );
                self.notice = Some(Notice::error(format!("Saved, but {reason}. Reloading.")));
                self.reload(state);
            }
        }
    }

    fn finish_remote_delete(&mut self, reports: Vec<DeleteReport>, state: &mut AppState) {
        let requested = reports.len();
        let (done, failed): (Vec<_>, Vec<_>) = reports.into_iter().partition(|r| r.result.is_ok());

        let ids: Vec<R::Id> = done.iter().filter_map(|r| self.find_id(&r.id)).collect();
        if let Err(e) = self.list.apply_mutation(Mutation::BulkDelete(ids)) {
            warn!(resource = %R::KIND, error = %e, "Deleted records could not be removed");
        }
        self.collection_changed(state);

        let noun = R::KIND.noun();
        self.notice = Some(if failed.is_empty() {
            Notice::info(format!("Deleted {}", count_noun(done.len(), noun)))
        } else if requested == 1 {
            let failure = &failed[0];
            Notice::error(format!(
                "Could not delete {noun} {}: {}",
                failure.id,
                describe_failure(&failure.result)
            ))
        } else {
            let reasons: Vec<String> = failed
                .iter()
                .map(|r| format!("{} ({})", r.id, describe_failure(&r.result)))
                .collect();
            Notice::error(format!(
                "Deleted {} of {}. Failed: {}",
                done.len(),
                count_noun(requested, noun),
                reasons.join(", ")
            ))
        });
    }
}

fn describe_failure(result: &Result<(), ApiError>) -> String {
    match result {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    }
}

fn saved_message<R: Resource>(touched: &[R::Id]) -> String {
    match touched.first() {
        Some(id) => format!("Saved {} {id}", R::KIND.noun()),
        None => format!("Saved {}", R::KIND.noun()),
    }
}

/// `1 bill`, `3 bills`, `2 audit entries`
pub fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        return format!("1 {noun}");
    }
    match noun.strip_suffix('y') {
        Some(stem) => format!("{count} {stem}ies"),
        None => format!("{count} {noun}s"),
    }
}

/// Overlay form fields on an existing record.
///
/// Fields the form owns but left out of `patch` (cleared optional values)
/// are removed so the record falls back to its serde default.
fn merge_record<R: Serialize + DeserializeOwned>(
    existing: &R,
    patch: Value,
    rules: &RuleSet,
) -> Result<R, serde_json::Error> {
    let mut value = serde_json::to_value(existing)?;
    if let (Value::Object(target), Value::Object(fields)) = (&mut value, patch) {
        for spec in rules.fields() {
            if !fields.contains_key(spec.name) {
                target.remove(spec.name);
            }
        }
        target.extend(fields);
    }
    serde_json::from_value(value)
}

/// Apply a form submission to a locally stored collection and persist it.
///
/// The collection is rolled back when the slot cannot be written.
fn commit_local<R: Resource>(
    list: &mut ListState<R>,
    storage: &dyn Storage,
    key: &str,
    mode: &FormMode<R::Id>,
    draft: &Draft,
    rules: &RuleSet,
) -> Result<Vec<R::Id>, SubmitFailure> {
    let noun = R::KIND.noun();
    let body = draft.to_json(rules);
    let mutation = match mode {
        FormMode::Add => {
            let mut record: R = serde_json::from_value(body)
                .map_err(|e| SubmitFailure::new(format!("Could not build {noun}: {e}")))?;
            record.assign_local_id(list.items());
            Mutation::Create(record)
        }
        FormMode::Edit(id) => {
            let existing = list
                .get(id)
                .ok_or_else(|| SubmitFailure::new(format!("{noun} {id} no longer exists")))?;
            let record = merge_record(existing, body, rules)
                .map_err(|e| SubmitFailure::new(format!("Could not update {noun}: {e}")))?;
            Mutation::Update {
                id: id.clone(),
                record,
            }
        }
    };

    let previous = list.items().to_vec();
    let touched = list
        .apply_mutation(mutation)
        .map_err(|e| SubmitFailure::new(e.to_string()))?;
    if let Err(e) = save_collection(storage, key, list.items()) {
        list.replace_items(previous);
        return Err(SubmitFailure::new(format!("Could not save to local storage: {e}")));
    }
    info!(resource = %R::KIND, ids = ?touched, "Local collection saved");
    Ok(touched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_noun() {
        assert_eq!(count_noun(1, "bill"), "1 bill");
        assert_eq!(count_noun(3, "bill"), "3 bills");
        assert_eq!(count_noun(2, "audit entry"), "2 audit entries");
        assert_eq!(count_noun(0, "water source"), "0 water sources");
    }

    #[test]
    fn test_merge_clears_omitted_form_fields() {
        let existing = Connection {
            id: "CONN-001".to_string(),
            user_id: 1,
            installation_date: "2023-03-14".to_string(),
            address: "12 Lakeview Rd".to_string(),
            ..Connection::default()
        };
        let patch = serde_json::json!({"UserID": 3, "Address": "9 Elm St"});
        let merged: Connection = merge_record(&existing, patch, &Connection::form_rules()).unwrap();
        assert_eq!(merged.id, "CONN-001");
        assert_eq!(merged.user_id, 3);
        assert_eq!(merged.address, "9 Elm St");
        assert_eq!(merged.installation_date, "");
    }
}
