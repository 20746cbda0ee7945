//! Table-of-contents landing page

use serde::{Deserialize, Serialize};

/// Default TOC page: after front/back covers and soft covers
pub const DEFAULT_TOC_PAGE_INDEX: usize = 4;

/// Book-level TOC page index.
///
/// Set from configuration and read when the book opens to its contents.
/// No validation; the last write wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TocStore {
    page_index: usize,
}

impl TocStore {
    pub fn new(page_index: usize) -> Self {
        Self { page_index }
    }

    pub fn get(&self) -> usize {
        self.page_index
    }

    pub fn set(&mut self, page_index: usize) {
        self.page_index = page_index;
    }
}

impl Default for TocStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOC_PAGE_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_last_write_wins() {
        let mut toc = TocStore::default();
        assert_eq!(toc.get(), 4);
        toc.set(9);
        toc.set(2);
        assert_eq!(toc.get(), 2);
    }
}
