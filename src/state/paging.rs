/// Pagination of a filtered collection
///
/// `paginate` is pure; `PageState` owns the current page of one list view
/// and keeps it clamped.

use std::ops::Range;

/// Page counts at or below this show every page number
pub const DEFAULT_WINDOW_THRESHOLD: usize = 20;

/// One control in the compact pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageWindowEntry {
    Page { number: usize, current: bool },
    /// Collapsed run of pages between page 1 and the middle window
    LeadingEllipsis,
    /// Collapsed run of pages between the middle window and the last page
    TrailingEllipsis,
}

/// Result of paginating a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Item bounds of the current page, always within `0..total`
    pub slice: Range<usize>,
    pub pages: usize,
    /// The clamped current page
    pub current: usize,
    pub window: Vec<PageWindowEntry>,
}

/// ceil(total / page_size); a zero page size is treated as one
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Clamp `current` into `[1, max(1, pages)]`
pub fn clamp_page(current: usize, pages: usize) -> usize {
    current.clamp(1, pages.max(1))
}

/// `paginate_with_threshold` at the default window threshold
#[cfg(test)]
pub fn paginate(total: usize, page_size: usize, current: usize) -> Page {
    paginate_with_threshold(total, page_size, current, DEFAULT_WINDOW_THRESHOLD)
}

pub fn paginate_with_threshold(
    total: usize,
    page_size: usize,
    current: usize,
    threshold: usize,
) -> Page {
    let page_size = page_size.max(1);
    let pages = page_count(total, page_size);
    let current = clamp_page(current, pages);

    let start = ((current - 1) * page_size).min(total);
    let end = (start + page_size).min(total);

    Page {
        slice: start..end,
        pages,
        current,
        window: page_window(pages, current, threshold),
    }
}

/// Page-number controls for `pages` total pages, collapsed with ellipses
/// once the page count exceeds `threshold`
pub fn page_window(pages: usize, current: usize, threshold: usize) -> Vec<PageWindowEntry> {
    let current = clamp_page(current, pages);
    let page = |number: usize| PageWindowEntry::Page {
        number,
        current: number == current,
    };

    if pages <= threshold.max(1) {
        return (1..=pages).map(page).collect();
    }

    let mut window = Vec::with_capacity(7);
    window.push(page(1));
    if current > 3 {
        window.push(PageWindowEntry::LeadingEllipsis);
    }

    let middle_start = current.saturating_sub(1).max(2);
    let middle_end = (current + 1).min(pages - 1);
    window.extend((middle_start..=middle_end).map(page));

    if current + 2 < pages {
        window.push(PageWindowEntry::TrailingEllipsis);
    }
    window.push(page(pages));
    window
}

/// Current page of one list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    page_size: usize,
    current: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to page 1, used on every committed filter change
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Jump to `page`, clamped to the available pages
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.current = clamp_page(page, page_count(total, self.page_size));
    }

    /// No-op on the last page
    pub fn next(&mut self, total: usize) {
        self.go_to(self.current.saturating_add(1), total);
    }

    /// No-op on the first page
    pub fn previous(&mut self, total: usize) {
        self.go_to(self.current.saturating_sub(1), total);
    }

    pub fn paginate(&self, total: usize, threshold: usize) -> Page {
        paginate_with_threshold(total, self.page_size, self.current, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageWindowEntry::{LeadingEllipsis, TrailingEllipsis};

    fn p(number: usize, current: bool) -> PageWindowEntry {
        PageWindowEntry::Page { number, current }
    }

    #[test]
    fn test_first_page_slice() {
        let page = paginate(47, 10, 1);
        assert_eq!(page.slice, 0..10);
        assert_eq!(page.pages, 5);
    }

    #[test]
    fn test_last_page_slice_is_clamped() {
        let page = paginate(47, 10, 5);
        assert_eq!(page.slice, 40..47);
    }

    #[test]
    fn test_current_beyond_range_is_clamped() {
        let page = paginate(47, 10, 9);
        assert_eq!(page.current, 5);
        assert_eq!(page.slice, 40..47);

        let page = paginate(47, 10, 0);
        assert_eq!(page.current, 1);
    }

    #[test]
    fn test_empty_collection() {
        let page = paginate(0, 10, 3);
        assert_eq!(page.pages, 0);
        assert_eq!(page.current, 1);
        assert_eq!(page.slice, 0..0);
        assert!(page.window.is_empty());
    }

    #[test]
    fn test_small_page_counts_show_every_page() {
        let window = page_window(4, 2, 20);
        assert_eq!(window, vec![p(1, false), p(2, true), p(3, false), p(4, false)]);
        assert_eq!(page_window(20, 7, 20).len(), 20);
    }

    #[test]
    fn test_window_at_first_page() {
        let window = page_window(25, 1, 20);
        assert_eq!(
            window,
            vec![p(1, true), p(2, false), TrailingEllipsis, p(25, false)]
        );
    }

    #[test]
    fn test_window_near_start_omits_leading_ellipsis() {
        let window = page_window(25, 3, 20);
        assert_eq!(
            window,
            vec![p(1, false), p(2, false), p(3, true), p(4, false), TrailingEllipsis, p(25, false)]
        );
    }

    #[test]
    fn test_window_in_middle_has_both_ellipses() {
        let window = page_window(25, 12, 20);
        assert_eq!(
            window,
            vec![
                p(1, false),
                LeadingEllipsis,
                p(11, false),
                p(12, true),
                p(13, false),
                TrailingEllipsis,
                p(25, false),
            ]
        );
    }

    #[test]
    fn test_window_near_end_omits_trailing_ellipsis() {
        let window = page_window(25, 23, 20);
        assert_eq!(
            window,
            vec![p(1, false), LeadingEllipsis, p(22, false), p(23, true), p(24, false), p(25, false)]
        );

        let window = page_window(25, 25, 20);
        assert_eq!(
            window,
            vec![p(1, false), LeadingEllipsis, p(24, false), p(25, true)]
        );
    }

    #[test]
    fn test_page_state_navigation_clamps() {
        let mut state = PageState::new(10);
        state.previous(47);
        assert_eq!(state.current(), 1);

        state.go_to(5, 47);
        state.next(47);
        assert_eq!(state.current(), 5);

        state.previous(47);
        assert_eq!(state.current(), 4);
    }

    #[test]
    fn test_reset_returns_to_first_page() {
        let mut state = PageState::new(10);
        state.go_to(3, 100);
        state.reset();
        assert_eq!(state.current(), 1);
    }
}
