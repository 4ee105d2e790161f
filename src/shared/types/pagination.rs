//! Page assembly and navigation arithmetic
//!
//! A [`Page`] is a bounded slice of a larger result set plus the metadata a
//! listing view needs to render its navigation bar.

/// Number of page links shown in the navigation window.
pub const PAGE_WINDOW: u32 = 5;

/// Row offset of the first element of a 1-based `page`.
pub fn page_offset(page: u32, size: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(size)
}

/// Paginated result
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    current_page: u32,
    size: u32,
    total_elements: u64,
    total_pages: u32,
}

impl<T> Page<T> {
    /// Assemble a page. `total_pages` is `ceil(total_elements / size)`.
    pub fn of(content: Vec<T>, current_page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX)
        };
        Self {
            content,
            current_page,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// First page number of the navigation window.
    ///
    /// `min(max(1, current - 2), max(1, total - 4))`
    pub fn start_page(&self) -> u32 {
        let current = i64::from(self.current_page);
        let total = i64::from(self.total_pages);
        let start = (current - 2).max(1);
        start.min((total - 4).max(1)) as u32
    }

    /// Last page number of the navigation window. Below `start_page` when
    /// there are no pages at all.
    ///
    /// `max(min(total, current + 2), min(5, total))`
    pub fn end_page(&self) -> u32 {
        let current = i64::from(self.current_page);
        let total = i64::from(self.total_pages);
        let end = total.min(current + 2);
        end.max(total.min(i64::from(PAGE_WINDOW))).max(0) as u32
    }

    /// Page numbers of the navigation window, empty when there are no pages.
    pub fn page_numbers(&self) -> Vec<u32> {
        (self.start_page()..=self.end_page()).collect()
    }

    /// Transform the content, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            current_page: self.current_page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_page(current_page: u32, size: u32, total_elements: u64) -> Page<()> {
        Page::of(Vec::new(), current_page, size, total_elements)
    }

    #[test]
    fn assemble_first_of_three_pages() {
        let page = Page::of(vec!['A', 'B', 'C'], 1, 10, 23);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert!(page.is_first());
        assert!(!page.is_last());
        assert_eq!(page.content(), &['A', 'B', 'C']);
    }

    #[test]
    fn total_pages_is_ceiling_of_elements_over_size() {
        for size in 1..=12u32 {
            for total in 0..=60u64 {
                let page = empty_page(1, size, total);
                let expected = (total + u64::from(size) - 1) / u64::from(size);
                assert_eq!(u64::from(page.total_pages()), expected, "size={size} total={total}");
                assert_eq!(page.total_pages() == 0, total == 0);
            }
        }
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(empty_page(1, 10, 30).total_pages(), 3);
        assert_eq!(empty_page(1, 10, 31).total_pages(), 4);
    }

    #[test]
    fn last_page_flags() {
        let page = empty_page(3, 10, 23);
        assert!(!page.has_next());
        assert!(page.has_previous());
        assert!(!page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn has_next_and_is_last_track_current_page() {
        for current in 1..=6u32 {
            let page = empty_page(current, 5, 22);
            assert_eq!(page.has_next(), current < 5);
            assert_eq!(page.is_last(), current == 5);
        }
    }

    #[test]
    fn empty_result_has_no_pages_and_empty_window() {
        let page = empty_page(1, 10, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert!(!page.is_last());
        assert!(page.is_first());
        assert!(page.page_numbers().is_empty());
    }

    #[test]
    fn window_covers_all_pages_when_few() {
        let page = empty_page(2, 10, 30);
        assert_eq!(page.start_page(), 1);
        assert_eq!(page.end_page(), 3);
        assert_eq!(page.page_numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn window_centers_on_current_page() {
        let page = empty_page(10, 10, 200);
        assert_eq!(page.total_pages(), 20);
        assert_eq!(page.page_numbers(), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn window_near_start_shows_five_pages() {
        let page = empty_page(1, 10, 200);
        assert_eq!(page.page_numbers(), vec![1, 2, 3, 4, 5]);
        let page = empty_page(2, 10, 200);
        assert_eq!(page.page_numbers(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_near_end_shifts_back() {
        let page = empty_page(20, 10, 200);
        assert_eq!(page.page_numbers(), vec![16, 17, 18, 19, 20]);
        let page = empty_page(19, 10, 200);
        assert_eq!(page.page_numbers(), vec![16, 17, 18, 19, 20]);
    }

    #[test]
    fn window_for_page_beyond_last() {
        // start = min(max(1, 8), max(1, -1)) = 1, end = max(min(3, 12), 3) = 3
        let page = empty_page(10, 10, 30);
        assert_eq!(page.page_numbers(), vec![1, 2, 3]);
        assert!(!page.has_next());
        assert!(!page.is_last());
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
        assert_eq!(page_offset(0, 10), 0);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::of(vec![1, 2], 2, 2, 5).map(|n| n * 10);
        assert_eq!(page.content(), &[10, 20]);
        assert_eq!(page.current_page(), 2);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_elements(), 5);
    }
}
