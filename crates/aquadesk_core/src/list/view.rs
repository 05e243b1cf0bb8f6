//! Pure view computation: filter, sort, paginate.

use super::config::{CategoryFilter, ListConfig, SortDirection, SortValue};

/// The user-adjustable parameters that shape a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewParams {
    pub search: String,
    pub category: CategoryFilter,
    pub sort_key: &'static str,
    pub direction: SortDirection,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl ViewParams {
    /// Parameters a freshly mounted screen starts with
    pub fn initial<R>(config: &ListConfig<R>) -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            sort_key: config.default_sort,
            direction: config.default_direction,
            page: 1,
            page_size: config.page_size,
        }
    }
}

/// One displayable page of a filtered, sorted collection.
#[derive(Debug)]
pub struct View<'a, R> {
    pub page_items: Vec<&'a R>,
    pub total_filtered: usize,
    /// 0 when nothing matches
    pub total_pages: usize,
    /// Effective page after clamping
    pub page: usize,
}

impl<R> View<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }

    /// Page count for display; an empty result still shows as one page
    pub fn display_pages(&self) -> usize {
        self.total_pages.max(1)
    }
}

/// Number of pages needed for `count` rows
pub fn page_count(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page into `[1, max(1, total_pages)]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Whether a record passes the search term and category filter
pub fn passes_filters<R>(
    record: &R,
    config: &ListConfig<R>,
    needle: &str,
    category: &CategoryFilter,
) -> bool {
    let search_ok = needle.is_empty()
        || config
            .search_fields
            .iter()
            .any(|field| field(record).to_lowercase().contains(needle));

    let category_ok = match (category, config.filter_field) {
        (CategoryFilter::All, _) => true,
        (filter, Some(field)) => filter.matches(field(record)),
        // No filter field configured: a category cannot exclude anything
        (_, None) => true,
    };

    search_ok && category_ok
}

/// Filter and sort without paginating.
///
/// Sorting is stable: records with equal keys keep their collection order in
/// both directions.
pub fn filter_and_sort<'a, R>(
    items: &'a [R],
    config: &ListConfig<R>,
    params: &ViewParams,
) -> Vec<&'a R> {
    let needle = params.search.trim().to_lowercase();

    let mut keyed: Vec<(SortValue, &R)> = match config.find_sort_key(params.sort_key) {
        Some(key) => items
            .iter()
            .filter(|r| passes_filters(*r, config, &needle, &params.category))
            .map(|r| ((key.extract)(r), r))
            .collect(),
        None => items
            .iter()
            .filter(|r| passes_filters(*r, config, &needle, &params.category))
            .map(|r| (SortValue::Missing, r))
            .collect(),
    };

    keyed.sort_by(|(a, _), (b, _)| a.compare(b, params.direction));
    keyed.into_iter().map(|(_, r)| r).collect()
}

/// Turn a collection plus view parameters into a displayable page.
///
/// This is a pure function of its inputs, so callers may memoize on
/// `(items identity, params)`.
pub fn compute_view<'a, R>(
    items: &'a [R],
    config: &ListConfig<R>,
    params: &ViewParams,
) -> View<'a, R> {
    let filtered = filter_and_sort(items, config, params);
    let total_filtered = filtered.len();
    let page_size = params.page_size.max(1);
    let total_pages = page_count(total_filtered, page_size);
    let page = clamp_page(params.page, total_pages);

    let page_items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    View {
        page_items,
        total_filtered,
        total_pages,
        page,
    }
}
