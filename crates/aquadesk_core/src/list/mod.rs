//! Client-side list engine shared by every admin list screen.
//!
//! The engine is split three ways:
//! - [`config`]: per-screen parameters (searchable fields, filter field, sort keys, page size)
//! - [`view`]: the pure `compute_view` pipeline (filter → stable sort → paginate)
//! - [`state`]: [`ListState`], which owns the collection, view parameters and selection

pub mod config;
mod state;
pub mod view;

pub use config::{
    CategoryFilter, DEFAULT_PAGE_SIZE, ListConfig, SortDirection, SortKey, SortValue, TextField,
    parse_timestamp,
};
pub use state::{ListState, Mutation};
pub use view::{View, ViewParams, clamp_page, compute_view, filter_and_sort, page_count};
