//! Pagination window calculation and control layout
//!
//! [`compute_window`] decides which page buttons and ellipses to show;
//! [`PaginationControls`] wraps that window with first/prev/next/last
//! shortcuts and their enabled state.

use thiserror::Error;

/// Smallest window for which the ellipsis layout is well defined
pub const MIN_VISIBLE_PAGES: u32 = 3;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("max visible pages must be at least 3, got {0}")]
    MaxVisibleTooSmall(u32),
}

/// Which side of the window a skipped range sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipsisPosition {
    Start,
    End,
}

impl EllipsisPosition {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Start => "ellipsis-start",
            Self::End => "ellipsis-end",
        }
    }
}

/// One entry in the rendered page list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageMarker {
    Page(u32),
    Ellipsis(EllipsisPosition),
}

impl PageMarker {
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Page(n) => Some(*n),
            Self::Ellipsis(_) => None,
        }
    }

    /// Stable key for keyed list rendering
    pub fn key(&self) -> String {
        match self {
            Self::Page(n) => format!("page-{}", n),
            Self::Ellipsis(pos) => pos.key().to_string(),
        }
    }
}

/// Compute the ordered page markers to display.
///
/// `current_page` is expected to already be clamped to `[1, total_pages]`.
/// A total of zero pages yields an empty window.
pub fn compute_window(
    current_page: u32,
    total_pages: u32,
    max_visible_pages: u32,
) -> Result<Vec<PageMarker>, PaginationError> {
    if max_visible_pages < MIN_VISIBLE_PAGES {
        return Err(PaginationError::MaxVisibleTooSmall(max_visible_pages));
    }
    if total_pages == 0 {
        return Ok(Vec::new());
    }
    if total_pages <= max_visible_pages {
        return Ok((1..=total_pages).map(PageMarker::Page).collect());
    }

    let middle = max_visible_pages / 2;
    let (start, end) = if current_page <= middle + 1 {
        (1, max_visible_pages - 1)
    } else if current_page >= total_pages - middle {
        (total_pages - max_visible_pages + 2, total_pages)
    } else {
        let k = (max_visible_pages - 3) / 2;
        (current_page - k, current_page + k)
    };

    let mut markers = Vec::with_capacity(max_visible_pages as usize + 4);

    if start > 1 {
        markers.push(PageMarker::Page(1));
        match start - 1 {
            1 => {}
            2 => markers.push(PageMarker::Page(2)),
            _ => markers.push(PageMarker::Ellipsis(EllipsisPosition::Start)),
        }
    }

    markers.extend((start..=end).map(PageMarker::Page));

    if end < total_pages {
        match total_pages - end {
            1 => {}
            2 => markers.push(PageMarker::Page(total_pages - 1)),
            _ => markers.push(PageMarker::Ellipsis(EllipsisPosition::End)),
        }
        markers.push(PageMarker::Page(total_pages));
    }

    Ok(markers)
}

// ============================================================================
// CONTROLS
// ============================================================================

/// Pagination widget configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub max_visible_pages: u32,
    pub show_first_last: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_visible_pages: 5,
            show_first_last: true,
        }
    }
}

impl PaginationConfig {
    pub fn max_visible(mut self, pages: u32) -> Self {
        self.max_visible_pages = pages;
        self
    }

    pub fn first_last(mut self, show: bool) -> Self {
        self.show_first_last = show;
        self
    }
}

/// A navigation button and the page it leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControl {
    pub target: u32,
    pub enabled: bool,
}

/// Everything a pagination widget needs to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub current_page: u32,
    pub total_pages: u32,
    pub first: Option<NavControl>,
    pub previous: NavControl,
    pub markers: Vec<PageMarker>,
    pub next: NavControl,
    pub last: Option<NavControl>,
    /// Whether page-number buttons accept clicks
    pub pages_enabled: bool,
}

impl PaginationControls {
    /// Build the control layout, or `Ok(None)` when there is at most one page
    /// and no pagination should be shown.
    pub fn build(
        current_page: u32,
        total_pages: u32,
        config: PaginationConfig,
        disabled: bool,
    ) -> Result<Option<Self>, PaginationError> {
        if total_pages <= 1 {
            return Ok(None);
        }

        let markers = compute_window(current_page, total_pages, config.max_visible_pages)?;

        let first = config.show_first_last.then(|| NavControl {
            target: 1,
            enabled: current_page != 1 && !disabled,
        });
        let last = config.show_first_last.then(|| NavControl {
            target: total_pages,
            enabled: current_page != total_pages && !disabled,
        });

        Ok(Some(Self {
            current_page,
            total_pages,
            first,
            previous: NavControl {
                target: current_page.saturating_sub(1).max(1),
                enabled: current_page > 1 && !disabled,
            },
            markers,
            next: NavControl {
                target: (current_page + 1).min(total_pages),
                enabled: current_page < total_pages && !disabled,
            },
            last,
            pages_enabled: !disabled,
        }))
    }

    pub fn is_current(&self, marker: &PageMarker) -> bool {
        marker.page() == Some(self.current_page)
    }

    /// Options for the compact "go to page" selector
    pub fn jump_options(&self) -> impl Iterator<Item = u32> {
        1..=self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EllipsisPosition::{End, Start};
    use PageMarker::{Ellipsis, Page};

    fn window(current: u32, total: u32, max: u32) -> Vec<PageMarker> {
        compute_window(current, total, max).unwrap()
    }

    #[test]
    fn test_single_page() {
        assert_eq!(window(1, 1, 5), vec![Page(1)]);
    }

    #[test]
    fn test_all_pages_fit() {
        assert_eq!(window(3, 5, 5), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn test_near_start() {
        assert_eq!(
            window(1, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis(End), Page(10)]
        );
        assert_eq!(window(3, 10, 5), window(1, 10, 5));
    }

    #[test]
    fn test_near_end() {
        assert_eq!(
            window(10, 10, 5),
            vec![Page(1), Ellipsis(Start), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(window(8, 10, 5), window(10, 10, 5));
    }

    #[test]
    fn test_middle_window() {
        assert_eq!(
            window(5, 10, 5),
            vec![
                Page(1),
                Ellipsis(Start),
                Page(4),
                Page(5),
                Page(6),
                Ellipsis(End),
                Page(10)
            ]
        );
    }

    #[test]
    fn test_minimum_window_has_single_center_page() {
        assert_eq!(
            window(5, 10, 3),
            vec![Page(1), Ellipsis(Start), Page(5), Ellipsis(End), Page(10)]
        );
    }

    #[test]
    fn test_single_page_gap_renders_page_number() {
        // start = 3 and end = 5 leave exactly one hidden page on each side
        assert_eq!(
            window(4, 7, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_even_max_visible_tie_break() {
        // middle = 3: pages up to 4 count as "near start"
        assert_eq!(
            window(4, 12, 6),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis(End), Page(12)]
        );
        assert_eq!(
            window(9, 12, 6),
            vec![Page(1), Ellipsis(Start), Page(8), Page(9), Page(10), Page(11), Page(12)]
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(window(6, 40, 7), window(6, 40, 7));
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            compute_window(1, 10, 2),
            Err(PaginationError::MaxVisibleTooSmall(2))
        );
        assert_eq!(compute_window(1, 0, 5), Ok(vec![]));
    }

    #[test]
    fn test_controls_hidden_for_single_page() {
        let controls = PaginationControls::build(1, 1, PaginationConfig::default(), false).unwrap();
        assert!(controls.is_none());
    }

    #[test]
    fn test_controls_enabled_state() {
        let controls = PaginationControls::build(1, 10, PaginationConfig::default(), false)
            .unwrap()
            .unwrap();

        assert_eq!(controls.first, Some(NavControl { target: 1, enabled: false }));
        assert!(!controls.previous.enabled);
        assert_eq!(controls.next, NavControl { target: 2, enabled: true });
        assert_eq!(controls.last, Some(NavControl { target: 10, enabled: true }));
        assert!(controls.is_current(&Page(1)));
        assert_eq!(controls.jump_options().count(), 10);
    }

    #[test]
    fn test_controls_without_first_last_and_disabled() {
        let config = PaginationConfig::default().first_last(false);
        let controls = PaginationControls::build(5, 10, config, true).unwrap().unwrap();

        assert_eq!(controls.first, None);
        assert_eq!(controls.last, None);
        assert!(!controls.previous.enabled);
        assert!(!controls.next.enabled);
        assert!(!controls.pages_enabled);
    }
}
