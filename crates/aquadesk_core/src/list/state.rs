//! Stateful list engine owned by one screen.

use rustc_hash::FxHashSet;

use super::config::{CategoryFilter, ListConfig, SortDirection};
use super::view::{View, ViewParams, clamp_page, compute_view, page_count, passes_filters};
use crate::error::{ListError, ListResult};
use crate::record::Record;

/// A successful server (or local store) response to apply to the collection.
#[derive(Debug, Clone)]
pub enum Mutation<R: Record> {
    Create(R),
    Update { id: R::Id, record: R },
    Delete(R::Id),
    BulkDelete(Vec<R::Id>),
}

/// Collection, view parameters and selection for one list screen.
///
/// Invariants kept after every call:
/// - ids in `items` are unique
/// - `selected` only holds ids present in `items`
/// - `page` lies in `[1, max(1, total_pages)]`
pub struct ListState<R: Record> {
    config: ListConfig<R>,
    items: Vec<R>,
    search: String,
    category: CategoryFilter,
    sort_key: &'static str,
    direction: SortDirection,
    page: usize,
    selected: FxHashSet<R::Id>,
}

impl<R: Record> ListState<R> {
    pub fn new(config: ListConfig<R>) -> Self {
        Self {
            sort_key: config.default_sort,
            direction: config.default_direction,
            config,
            items: Vec::new(),
            search: String::new(),
            category: CategoryFilter::All,
            page: 1,
            selected: FxHashSet::default(),
        }
    }

    pub fn with_items(config: ListConfig<R>, items: Vec<R>) -> Self {
        let mut state = Self::new(config);
        state.replace_items(items);
        state
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &ListConfig<R> {
        &self.config
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.items.iter().find(|r| &r.id() == id)
    }

    pub fn contains(&self, id: &R::Id) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &R::Id) -> Option<usize> {
        self.items.iter().position(|r| &r.id() == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn sort_key(&self) -> &'static str {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.direction
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn params(&self) -> ViewParams {
        ViewParams {
            search: self.search.clone(),
            category: self.category.clone(),
            sort_key: self.sort_key,
            direction: self.direction,
            page: self.page,
            page_size: self.config.page_size,
        }
    }

    /// Current page of the filtered, sorted collection
    pub fn view(&self) -> View<'_, R> {
        compute_view(&self.items, &self.config, &self.params())
    }

    /// Number of records passing the current search and category
    pub fn filtered_count(&self) -> usize {
        let needle = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|r| passes_filters(*r, &self.config, &needle, &self.category))
            .count()
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.filtered_count(), self.config.page_size)
    }

    // ========== View parameters ==========

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    pub fn cycle_category(&mut self) {
        let next = self.config.next_category(&self.category);
        self.set_category(next);
    }

    pub fn set_sort(&mut self, key: &'static str, direction: SortDirection) {
        self.sort_key = key;
        self.direction = direction;
        self.page = 1;
    }

    pub fn cycle_sort_key(&mut self) {
        let next = self.config.next_sort_key(self.sort_key);
        self.set_sort(next, self.direction);
    }

    pub fn toggle_sort_direction(&mut self) {
        self.set_sort(self.sort_key, self.direction.toggled());
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Restore search, category, sort and page to the screen defaults.
    /// Selection is left alone.
    pub fn reset_view(&mut self) {
        self.search.clear();
        self.category = CategoryFilter::All;
        self.sort_key = self.config.default_sort;
        self.direction = self.config.default_direction;
        self.page = 1;
    }

    // ========== Selection ==========

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: &R::Id) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in collection order
    pub fn selected_in_order(&self) -> Vec<R::Id> {
        self.items
            .iter()
            .map(Record::id)
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    /// Flip one id in or out of the selection. Ids that are not in the
    /// collection are ignored.
    pub fn toggle_select(&mut self, id: &R::Id) {
        if !self.selected.remove(id) && self.contains(id) {
            self.selected.insert(id.clone());
        }
    }

    /// Select every id on the current page, or clear them all if every one is
    /// already selected.
    pub fn toggle_select_all_visible(&mut self, page_ids: &[R::Id]) {
        if page_ids.is_empty() {
            return;
        }
        if page_ids.iter().all(|id| self.selected.contains(id)) {
            for id in page_ids {
                self.selected.remove(id);
            }
        } else {
            for id in page_ids {
                if self.contains(id) {
                    self.selected.insert(id.clone());
                }
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Put back a collection and selection captured before a mutation that
    /// could not be persisted. Selected ids missing from `items` are dropped.
    pub fn restore(&mut self, items: Vec<R>, selection: &[R::Id]) {
        self.replace_items(items);
        self.clear_selection();
        for id in selection {
            if self.contains(id) {
                self.selected.insert(id.clone());
            }
        }
    }

    /// Ids of the records on the current page
    pub fn visible_ids(&self) -> Vec<R::Id> {
        self.view().page_items.iter().map(|r| r.id()).collect()
    }

    // ========== Mutation ==========

    /// Replace the whole collection (initial load or refetch).
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn replace_items(&mut self, items: Vec<R>) {
        let mut seen = FxHashSet::default();
        let before = items.len();
        self.items = items
            .into_iter()
            .filter(|r| seen.insert(r.id()))
            .collect();
        if self.items.len() != before {
            tracing::warn!(
                dropped = before - self.items.len(),
                "Collection contained duplicate ids; kept first occurrences"
            );
        }
        self.selected.retain(|id| seen.contains(id));
        self.clamp_page();
    }

    /// Apply a successful mutation and return the ids it touched.
    pub fn apply_mutation(&mut self, mutation: Mutation<R>) -> ListResult<Vec<R::Id>> {
        let touched = match mutation {
            Mutation::Create(record) => {
                let id = record.id();
                if self.contains(&id) {
                    return Err(ListError::DuplicateId(id.to_string()));
                }
                self.items.push(record);
                vec![id]
            }
            Mutation::Update { id, record } => {
                let idx = self
                    .position(&id)
                    .ok_or_else(|| ListError::RecordNotFound(id.to_string()))?;
                let new_id = record.id();
                if new_id != id && self.contains(&new_id) {
                    return Err(ListError::DuplicateId(new_id.to_string()));
                }
                self.items[idx] = record;
                if new_id != id && self.selected.remove(&id) {
                    self.selected.insert(new_id.clone());
                }
                vec![new_id]
            }
            Mutation::Delete(id) => {
                let idx = self
                    .position(&id)
                    .ok_or_else(|| ListError::RecordNotFound(id.to_string()))?;
                self.items.remove(idx);
                self.selected.remove(&id);
                vec![id]
            }
            Mutation::BulkDelete(ids) => {
                let doomed: FxHashSet<R::Id> = ids.into_iter().collect();
                let mut removed = Vec::new();
                self.items.retain(|r| {
                    let id = r.id();
                    if doomed.contains(&id) {
                        removed.push(id);
                        false
                    } else {
                        true
                    }
                });
                for id in &doomed {
                    self.selected.remove(id);
                }
                removed
            }
        };
        self.clamp_page();
        Ok(touched)
    }

    fn clamp_page(&mut self) {
        self.page = clamp_page(self.page, self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::list::config::SortValue;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
        label: String,
    }

    impl Record for Item {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn item(id: u32) -> Item {
        Item {
            id,
            label: format!("item {id:02}"),
        }
    }

    fn state(count: u32, page_size: usize) -> ListState<Item> {
        let config = ListConfig::new()
            .search(|i: &Item| i.label.as_str())
            .sort_key("label", "Label", |i| SortValue::text(&i.label))
            .default_sort("label", SortDirection::Asc)
            .page_size(page_size);
        ListState::with_items(config, (1..=count).map(item).collect())
    }

    #[test]
    fn test_toggle_select_is_symmetric() {
        let mut list = state(3, 10);
        list.toggle_select(&2);
        assert!(list.is_selected(&2));
        list.toggle_select(&2);
        assert!(!list.is_selected(&2));
    }

    #[test]
    fn test_toggle_select_ignores_unknown_id() {
        let mut list = state(3, 10);
        list.toggle_select(&99);
        assert_eq!(list.selection_len(), 0);
    }

    #[test]
    fn test_select_all_visible_adds_then_removes() {
        let mut list = state(5, 2);
        let visible = list.visible_ids();
        assert_eq!(visible, vec![1, 2]);

        list.toggle_select_all_visible(&visible);
        assert!(list.is_selected(&1) && list.is_selected(&2));
        assert_eq!(list.selection_len(), 2);

        list.toggle_select_all_visible(&visible);
        assert_eq!(list.selection_len(), 0);
    }

    #[test]
    fn test_select_all_visible_with_partial_selection_adds_rest() {
        let mut list = state(5, 2);
        list.toggle_select(&1);
        list.toggle_select(&5);
        list.toggle_select_all_visible(&[1, 2]);
        assert!(list.is_selected(&1) && list.is_selected(&2) && list.is_selected(&5));
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut list = state(30, 5);
        list.set_page(4);
        assert_eq!(list.page(), 4);
        list.set_search("item 1");
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut list = state(7, 5);
        list.set_page(10);
        assert_eq!(list.page(), 2);
        list.set_page(0);
        assert_eq!(list.page(), 1);
        list.prev_page();
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_delete_clamps_page_after_shrink() {
        let mut list = state(6, 5);
        list.set_page(2);
        list.apply_mutation(Mutation::Delete(6)).unwrap();
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_update_miss_is_error() {
        let mut list = state(2, 5);
        let err = list
            .apply_mutation(Mutation::Update {
                id: 9,
                record: item(9),
            })
            .unwrap_err();
        assert_eq!(err, ListError::RecordNotFound("9".to_string()));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut list = state(3, 5);
        let mut changed = item(2);
        changed.label = "renamed".to_string();
        list.apply_mutation(Mutation::Update {
            id: 2,
            record: changed.clone(),
        })
        .unwrap();
        assert_eq!(list.items()[1], changed);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_create_duplicate_is_error() {
        let mut list = state(2, 5);
        let err = list.apply_mutation(Mutation::Create(item(1))).unwrap_err();
        assert_eq!(err, ListError::DuplicateId("1".to_string()));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_replace_items_prunes_selection_and_dedups() {
        let mut list = state(4, 5);
        list.toggle_select(&1);
        list.toggle_select(&4);
        list.replace_items(vec![item(1), item(2), item(2)]);
        assert_eq!(list.len(), 2);
        assert!(list.is_selected(&1));
        assert!(!list.is_selected(&4));
    }

    #[test]
    fn test_reset_view_keeps_selection() {
        let mut list = state(20, 5);
        list.toggle_select(&3);
        list.set_search("item");
        list.toggle_sort_direction();
        list.set_page(2);
        list.reset_view();
        assert_eq!(list.search(), "");
        assert_eq!(list.sort_direction(), SortDirection::Asc);
        assert_eq!(list.page(), 1);
        assert!(list.is_selected(&3));
    }

    #[test]
    fn test_selected_in_order_follows_collection() {
        let mut list = state(5, 5);
        list.toggle_select(&4);
        list.toggle_select(&2);
        assert_eq!(list.selected_in_order(), vec![2, 4]);
    }

    #[test]
    fn test_restore_brings_back_deleted_selection() {
        let mut list = state(5, 5);
        list.toggle_select(&2);
        list.toggle_select(&4);
        let items = list.items().to_vec();
        let selection = list.selected_in_order();

        list.apply_mutation(Mutation::BulkDelete(selection.clone())).unwrap();
        assert_eq!(list.selection_len(), 0);

        list.restore(items, &selection);
        assert_eq!(list.len(), 5);
        assert_eq!(list.selected_in_order(), vec![2, 4]);
    }
}
