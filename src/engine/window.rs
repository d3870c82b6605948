//! Page window selection for paginator controls.

use crate::error::{AppError, Result};

/// Page numbers a paginator should render around the current page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageWindow {
    /// Contiguous page numbers, empty when there is nothing to navigate.
    pub pages: Vec<usize>,
    /// Gap between page 1 and the first windowed page.
    pub show_leading_ellipsis: bool,
    /// Gap between the last windowed page and the final page.
    pub show_trailing_ellipsis: bool,
    /// Page 1 is outside the window and needs its own shortcut.
    pub show_first: bool,
    /// The final page is outside the window and needs its own shortcut.
    pub show_last: bool,
    pub current_page: usize,
    pub total_pages: usize,
}

impl PageWindow {
    /// True when the paginator should be hidden or disabled.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        !self.is_empty() && self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        !self.is_empty() && self.current_page < self.total_pages
    }
}

/// Reject a paginator width below 1.
pub fn validate_max_visible(max_visible: usize) -> Result<usize> {
    if max_visible < 1 {
        return Err(AppError::InvalidMaxVisible(max_visible));
    }
    Ok(max_visible)
}

/// Choose up to `max_visible` pages centered on `current_page`.
///
/// Near either end the window shifts instead of shrinking, so it stays full
/// whenever `total_pages >= max_visible`. A single page needs no navigation
/// and yields an empty window. Inputs below 1 are treated as 1 and
/// `current_page` is clamped into `[1, total_pages]`.
pub fn compute_page_window(current_page: usize, total_pages: usize, max_visible: usize) -> PageWindow {
    let total_pages = total_pages.max(1);
    let max_visible = max_visible.max(1);
    let current_page = current_page.clamp(1, total_pages);

    if total_pages <= 1 {
        return PageWindow {
            current_page,
            total_pages,
            ..Default::default()
        };
    }

    let half = max_visible / 2;
    let mut start = current_page.saturating_sub(half).max(1);
    let end = (start + max_visible - 1).min(total_pages);
    if end - start + 1 < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    PageWindow {
        pages: (start..=end).collect(),
        show_leading_ellipsis: start > 2,
        show_trailing_ellipsis: end + 1 < total_pages,
        show_first: start > 1,
        show_last: end < total_pages,
        current_page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_of_long_range() {
        let window = compute_page_window(10, 20, 5);
        assert_eq!(window.pages, vec![8, 9, 10, 11, 12]);
        assert!(window.show_leading_ellipsis);
        assert!(window.show_trailing_ellipsis);
        assert!(window.show_first);
        assert!(window.show_last);
    }

    #[test]
    fn test_fewer_pages_than_window() {
        let window = compute_page_window(1, 3, 5);
        assert_eq!(window.pages, vec![1, 2, 3]);
        assert!(!window.show_leading_ellipsis);
        assert!(!window.show_trailing_ellipsis);
        assert!(!window.show_first);
        assert!(!window.show_last);
    }

    #[test]
    fn test_single_page_is_empty() {
        let window = compute_page_window(1, 1, 5);
        assert!(window.is_empty());
        assert!(!window.has_prev());
        assert!(!window.has_next());
        assert!(compute_page_window(1, 0, 5).is_empty());
    }

    #[test]
    fn test_window_shifts_at_end() {
        let window = compute_page_window(20, 20, 5);
        assert_eq!(window.pages, vec![16, 17, 18, 19, 20]);
        assert!(window.show_leading_ellipsis);
        assert!(!window.show_trailing_ellipsis);
        assert!(!window.show_last);
    }

    #[test]
    fn test_window_at_start() {
        let window = compute_page_window(1, 20, 5);
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        assert!(!window.show_leading_ellipsis);
        assert!(window.show_trailing_ellipsis);
        assert!(window.has_next());
        assert!(!window.has_prev());
    }

    #[test]
    fn test_adjacent_edge_needs_shortcut_but_no_ellipsis() {
        // Window 2..=6 of 7: pages 1 and 7 are one step away.
        let window = compute_page_window(4, 7, 5);
        assert_eq!(window.pages, vec![2, 3, 4, 5, 6]);
        assert!(window.show_first);
        assert!(window.show_last);
        assert!(!window.show_leading_ellipsis);
        assert!(!window.show_trailing_ellipsis);
    }

    #[test]
    fn test_even_width() {
        let window = compute_page_window(10, 20, 4);
        assert_eq!(window.pages, vec![8, 9, 10, 11]);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let window = compute_page_window(99, 6, 3);
        assert_eq!(window.current_page, 6);
        assert_eq!(window.pages, vec![4, 5, 6]);

        let window = compute_page_window(0, 6, 0);
        assert_eq!(window.pages, vec![1]);
    }

    #[test]
    fn test_window_always_contains_current_page() {
        for total in 1..=30 {
            for max_visible in 1..=9 {
                for current in 1..=total {
                    let window = compute_page_window(current, total, max_visible);
                    if total > 1 {
                        assert!(window.pages.contains(&current), "{current}/{total} w={max_visible}");
                        assert!(window.pages.len() <= max_visible);
                    }
                    assert!(window.pages.iter().all(|&p| p >= 1 && p <= total));
                }
            }
        }
    }

    #[test]
    fn test_validate_max_visible() {
        assert!(matches!(validate_max_visible(0), Err(AppError::InvalidMaxVisible(0))));
        assert_eq!(validate_max_visible(7).unwrap(), 7);
    }
}
