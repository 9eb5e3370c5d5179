//! Pagination Slicer

/// Current page (1-based) over a projected collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    page: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1), page: 1 }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Always at least one, so an empty list still shows "page 1 of 1"
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Pull the page back into range after the projected count changed
    pub fn clamp(&mut self, count: usize) {
        self.page = self.page.clamp(1, self.total_pages(count));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn go_to(&mut self, page: usize, count: usize) {
        self.page = page;
        self.clamp(count);
    }

    pub fn next(&mut self, count: usize) {
        self.go_to(self.page + 1, count);
    }

    pub fn prev(&mut self, count: usize) {
        self.go_to(self.page.saturating_sub(1), count);
    }

    pub fn has_next(&self, count: usize) -> bool {
        self.page < self.total_pages(count)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// 1-based (first, last) row numbers shown on this page, `None` when empty
    pub fn visible_range(&self, count: usize) -> Option<(usize, usize)> {
        let start = (self.page - 1) * self.page_size;
        if start >= count {
            return None;
        }
        Some((start + 1, (start + self.page_size).min(count)))
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_pages() {
        let items: Vec<u32> = (1..=25).collect();
        let mut pager = Pager::new(10);
        assert_eq!(pager.slice(&items), &items[0..10]);
        pager.next(items.len());
        assert_eq!(pager.slice(&items), &items[10..20]);
        pager.next(items.len());
        assert_eq!(pager.slice(&items), &[21, 22, 23, 24, 25]);
        pager.next(items.len());
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn test_total_pages() {
        let pager = Pager::new(10);
        assert_eq!(pager.total_pages(0), 1);
        assert_eq!(pager.total_pages(10), 1);
        assert_eq!(pager.total_pages(11), 2);
    }

    #[test]
    fn test_clamp_after_filter_narrows() {
        let mut pager = Pager::new(5);
        pager.go_to(4, 20);
        assert_eq!(pager.page(), 4);

        pager.clamp(7);
        assert_eq!(pager.page(), 2);

        pager.clamp(0);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let mut pager = Pager::new(5);
        pager.go_to(3, 50);
        pager.set_page_size(20);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.page_size(), 20);

        pager.set_page_size(0);
        assert_eq!(pager.page_size(), 1);
    }

    #[test]
    fn test_prev_stops_at_first_page() {
        let mut pager = Pager::new(5);
        pager.prev(12);
        assert_eq!(pager.page(), 1);
        assert!(!pager.has_prev());
        assert!(pager.has_next(12));
    }

    #[test]
    fn test_no_empty_page_within_range() {
        for count in 1..40usize {
            let items: Vec<usize> = (0..count).collect();
            for size in 1..12 {
                let mut pager = Pager::new(size);
                for page in 1..=pager.total_pages(count) {
                    pager.go_to(page, count);
                    assert!(!pager.slice(&items).is_empty(), "count={count} size={size} page={page}");
                }
            }
        }
    }

    #[test]
    fn test_visible_range() {
        let mut pager = Pager::new(10);
        pager.go_to(2, 35);
        assert_eq!(pager.visible_range(35), Some((11, 20)));
        assert_eq!(Pager::new(10).visible_range(0), None);
    }
}
