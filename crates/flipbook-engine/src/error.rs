//! Error types for flipbook operations

use flipbook_geometry::GeometryError;

/// Errors reported by the flipbook controller
#[derive(Debug, thiserror::Error)]
pub enum FlipBookError {
    #[error("Invalid page count: {0} (a book needs at least one page)")]
    InvalidPageCount(usize),

    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Page index {index} is out of range, book has {pages_count} pages")]
    PageOutOfRange { index: usize, pages_count: usize },

    #[error("Couldn't find container with selector: {0}")]
    ContainerNotFound(String),

    #[error("No pages found in flipbook")]
    NoPages,

    #[error("Flipbook is already rendered")]
    AlreadyRendered,

    #[error("Unknown page name: {0}")]
    UnknownPageName(String),

    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlipBookError>;
