/// State management module
///
/// This module handles all per-view state of the catalog browser:
/// - Shared data structures (data.rs)
/// - The fetched collection and its liveness (store.rs)
/// - Faceted filtering (filter.rs)
/// - Pagination and the page window (paging.rs)
/// - Media carousels (carousel.rs)
/// - Filter panel input and debouncing (panel.rs)
/// - Generation tokens for timers and fetches (schedule.rs)

pub mod carousel;
pub mod data;
pub mod filter;
pub mod paging;
pub mod panel;
pub mod schedule;
pub mod store;
