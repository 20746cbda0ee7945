//! Page semantics
//!
//! Physical page indices start at 0, but books number pages their own
//! way: covers carry no number, front matter uses roman numerals, and so
//! on. A [`PageSemantics`] implementation bridges the two.

/// Bidirectional mapping between page indices and display names
pub trait PageSemantics {
    /// Displayed page name for an index; empty for unnumbered pages
    fn index_to_semantic_name(&self, page_index: usize) -> String;

    /// Page index for a displayed name, `None` when the name is unknown
    fn semantic_name_to_index(&self, semantic_name: &str) -> Option<usize>;

    /// Title used for tables of contents; empty when the page has none
    fn index_to_title(&self, page_index: usize) -> String;
}

/// Semantics used when the host supplies none
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSemantics;

impl PageSemantics for NoSemantics {
    fn index_to_semantic_name(&self, _page_index: usize) -> String {
        String::new()
    }

    fn semantic_name_to_index(&self, _semantic_name: &str) -> Option<usize> {
        None
    }

    fn index_to_title(&self, _page_index: usize) -> String {
        String::new()
    }
}

/// Semantic info for one page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSemantic {
    pub semantic_name: String,
    pub title: String,
}

impl PageSemantic {
    pub(crate) fn lookup(semantics: &dyn PageSemantics, page_index: usize) -> Self {
        Self {
            semantic_name: semantics.index_to_semantic_name(page_index),
            title: semantics.index_to_title(page_index),
        }
    }
}
