//! Per-screen list configuration: which fields are searched, which field the
//! category dropdown filters on, and how each sort key is extracted.

use std::cmp::Ordering;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

/// Default number of rows per page on admin list screens
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Accessor for a string-valued field of a record
pub type TextField<R> = fn(&R) -> &str;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Categorical filter with the `"all"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Value(String),
}

impl CategoryFilter {
    /// Parse a dropdown value; `"all"` (any case) and the empty string mean no filter.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Value(trimmed.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Value(expected) => value.trim().eq_ignore_ascii_case(expected),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Value(v) => v,
        }
    }
}

/// Comparable value extracted from a record for one sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Lower-cased text, compared lexicographically
    Text(String),
    Number(f64),
    Date(Timestamp),
    /// Absent or unparsable; always sorted after present values
    Missing,
}

impl SortValue {
    pub fn text(raw: &str) -> Self {
        SortValue::Text(raw.to_lowercase())
    }

    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            SortValue::Missing
        } else {
            SortValue::Number(value)
        }
    }

    pub fn date(raw: &str) -> Self {
        parse_timestamp(raw).map_or(SortValue::Missing, SortValue::Date)
    }

    pub fn opt_date(raw: Option<&str>) -> Self {
        raw.map_or(SortValue::Missing, SortValue::date)
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Date(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Missing => 3,
        }
    }

    /// Order two values for the given direction. Missing values go last
    /// regardless of direction.
    pub fn compare(&self, other: &SortValue, direction: SortDirection) -> Ordering {
        let ordering = match (self, other) {
            (SortValue::Missing, SortValue::Missing) => return Ordering::Equal,
            (SortValue::Missing, _) => return Ordering::Greater,
            (_, SortValue::Missing) => return Ordering::Less,
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Parse the date formats the backend emits: RFC 3339 instants, naive
/// date-times and plain dates (taken as UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = raw.parse::<jiff::civil::DateTime>() {
        return dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }
    raw.parse::<jiff::civil::Date>()
        .ok()
        .and_then(|d| d.to_zoned(TimeZone::UTC).ok())
        .map(|z| z.timestamp())
}

/// A named sort key and its extractor
pub struct SortKey<R> {
    pub name: &'static str,
    pub label: &'static str,
    pub extract: fn(&R) -> SortValue,
}

impl<R> Clone for SortKey<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            label: self.label,
            extract: self.extract,
        }
    }
}

/// Everything that distinguishes one list screen from another.
///
/// Built with the fluent methods:
///
/// ```ignore
/// ListConfig::new()
///     .search(|u: &User| u.name.as_str())
///     .filter_on(|u| u.connection_type.as_str(), &["Residential", "Commercial"])
///     .sort_key("name", "Name", |u| SortValue::text(&u.name))
///     .default_sort("name", SortDirection::Asc)
/// ```
pub struct ListConfig<R> {
    pub search_fields: Vec<TextField<R>>,
    pub filter_field: Option<TextField<R>>,
    pub filter_options: Vec<&'static str>,
    pub sort_keys: Vec<SortKey<R>>,
    pub default_sort: &'static str,
    pub default_direction: SortDirection,
    pub page_size: usize,
}

impl<R> Clone for ListConfig<R> {
    fn clone(&self) -> Self {
        Self {
            search_fields: self.search_fields.clone(),
            filter_field: self.filter_field,
            filter_options: self.filter_options.clone(),
            sort_keys: self.sort_keys.clone(),
            default_sort: self.default_sort,
            default_direction: self.default_direction,
            page_size: self.page_size,
        }
    }
}

impl<R> Default for ListConfig<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ListConfig<R> {
    pub fn new() -> Self {
        Self {
            search_fields: Vec::new(),
            filter_field: None,
            filter_options: Vec::new(),
            sort_keys: Vec::new(),
            default_sort: "",
            default_direction: SortDirection::Asc,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn search(mut self, field: TextField<R>) -> Self {
        self.search_fields.push(field);
        self
    }

    pub fn filter_on(mut self, field: TextField<R>, options: &[&'static str]) -> Self {
        self.filter_field = Some(field);
        self.filter_options = options.to_vec();
        self
    }

    pub fn sort_key(
        mut self,
        name: &'static str,
        label: &'static str,
        extract: fn(&R) -> SortValue,
    ) -> Self {
        self.sort_keys.push(SortKey {
            name,
            label,
            extract,
        });
        self
    }

    pub fn default_sort(mut self, name: &'static str, direction: SortDirection) -> Self {
        self.default_sort = name;
        self.default_direction = direction;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn find_sort_key(&self, name: &str) -> Option<&SortKey<R>> {
        self.sort_keys.iter().find(|k| k.name == name)
    }

    /// Name of the sort key after `current`, wrapping around
    pub fn next_sort_key(&self, current: &str) -> &'static str {
        if self.sort_keys.is_empty() {
            return self.default_sort;
        }
        let idx = self
            .sort_keys
            .iter()
            .position(|k| k.name == current)
            .map_or(0, |i| (i + 1) % self.sort_keys.len());
        self.sort_keys[idx].name
    }

    /// Category after `current` in dropdown order, with `All` first
    pub fn next_category(&self, current: &CategoryFilter) -> CategoryFilter {
        if self.filter_options.is_empty() {
            return CategoryFilter::All;
        }
        let next_idx = match current {
            CategoryFilter::All => 0,
            CategoryFilter::Value(v) => match self
                .filter_options
                .iter()
                .position(|o| o.eq_ignore_ascii_case(v))
            {
                Some(i) if i + 1 < self.filter_options.len() => i + 1,
                _ => return CategoryFilter::All,
            },
        };
        CategoryFilter::Value(self.filter_options[next_idx].to_string())
    }
}
