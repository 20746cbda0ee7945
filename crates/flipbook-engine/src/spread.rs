//! Visible pages and leaf/page index math
//!
//! With `c` leaves turned the reader sees the back of leaf `c - 1` and the
//! front of leaf `c`. At either end of the book only one of them exists.

use crate::direction::FlipDirection;
use crate::semantics::PageSemantic;

/// Pages visible at rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisiblePages {
    /// Closed book or the last page alone
    Single(usize),
    /// Open two-page spread, in reading order
    Spread(usize, usize),
}

impl VisiblePages {
    /// Pages shown when `current_leaf` leaves are turned
    pub fn at_leaf(current_leaf: usize, pages_count: usize) -> Self {
        let left = current_leaf
            .checked_sub(1)
            .map(|leaf| 2 * leaf + 1)
            .filter(|&page| page < pages_count);
        let right = Some(2 * current_leaf).filter(|&page| page < pages_count);
        match (left, right) {
            (Some(left), Some(right)) => Self::Spread(left, right),
            (Some(page), None) | (None, Some(page)) => Self::Single(page),
            // Unreachable for a current leaf within bounds
            (None, None) => Self::Single(pages_count.saturating_sub(1)),
        }
    }

    pub fn first(self) -> usize {
        match self {
            Self::Single(page) | Self::Spread(page, _) => page,
        }
    }

    pub fn contains(self, page: usize) -> bool {
        match self {
            Self::Single(only) => only == page,
            Self::Spread(left, right) => left == page || right == page,
        }
    }

    pub fn to_vec(self) -> Vec<usize> {
        match self {
            Self::Single(page) => vec![page],
            Self::Spread(left, right) => vec![left, right],
        }
    }
}

/// Details passed to flip callbacks
#[derive(Debug, Clone, PartialEq)]
pub struct PageFlipParams {
    pub leaf_index: usize,
    pub direction: FlipDirection,
    /// Pages the turn reveals
    pub pages: VisiblePages,
    pub semantics: Vec<PageSemantic>,
}

/// Current leaf at which `page` is visible
pub(crate) fn leaf_for_page(page: usize) -> usize {
    if page % 2 == 1 { page / 2 + 1 } else { page / 2 }
}

/// Furthest the book can be turned: every leaf that has a back page
pub(crate) fn max_current_leaf(pages_count: usize) -> usize {
    pages_count / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_book_spreads() {
        assert_eq!(VisiblePages::at_leaf(0, 6), VisiblePages::Single(0));
        assert_eq!(VisiblePages::at_leaf(1, 6), VisiblePages::Spread(1, 2));
        assert_eq!(VisiblePages::at_leaf(2, 6), VisiblePages::Spread(3, 4));
        assert_eq!(VisiblePages::at_leaf(3, 6), VisiblePages::Single(5));
        assert_eq!(max_current_leaf(6), 3);
    }

    #[test]
    fn test_odd_book_ends_on_spread() {
        assert_eq!(max_current_leaf(5), 2);
        assert_eq!(VisiblePages::at_leaf(2, 5), VisiblePages::Spread(3, 4));
        assert_eq!(VisiblePages::at_leaf(0, 1), VisiblePages::Single(0));
        assert_eq!(max_current_leaf(1), 0);
    }

    #[test]
    fn test_every_page_visible_at_its_leaf() {
        for pages in 1..12 {
            for page in 0..pages {
                let leaf = leaf_for_page(page);
                assert!(leaf <= max_current_leaf(pages));
                assert!(VisiblePages::at_leaf(leaf, pages).contains(page));
            }
        }
    }

    #[test]
    fn test_first_and_to_vec() {
        let spread = VisiblePages::Spread(3, 4);
        assert_eq!(spread.first(), 3);
        assert_eq!(spread.to_vec(), vec![3, 4]);
        assert!(!spread.contains(5));
    }
}
