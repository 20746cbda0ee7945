//! flipbook engine
//!
//! A headless page-flip book: leaves that turn around a spine, driven by
//! drag gestures and programmatic navigation. The engine keeps all state
//! and math; the host supplies container measurements, pointer events
//! and frame ticks, then applies the page transforms it gets back.
//!
//! # Example
//! ```rust,ignore
//! use flipbook_engine::{Container, FlipBook, FlipBookConfig};
//! use std::collections::HashMap;
//!
//! let mut book = FlipBook::new(FlipBookConfig::new(12).on_page_changed(|page| {
//!     println!("now showing page {page}");
//! }))?;
//! let surface = HashMap::from([("#book".to_string(), Container::new(1200.0, 800.0, 12))]);
//! book.render(&surface, "#book", false)?;
//!
//! book.flip_next();
//! while book.tick() {
//!     // render book.page_transform(i) for each page, wait for next frame
//! }
//! ```

mod clock;
mod config;
mod direction;
mod error;
mod flipbook;
mod gesture;
mod input;
mod layout;
mod leaf;
mod navigation;
mod semantics;
mod spread;
mod toc;

pub use clock::{FrameClock, ManualClock, SystemClock};
pub use config::{
    BookOptions, DEFAULT_COVER_ASPECT_RATIO, DEFAULT_FAST_SWIPE_THRESHOLD,
    DEFAULT_LEAF_ASPECT_RATIO, FlipBookConfig, Landing, PageChangedCallback, PageFlipCallback,
};
pub use direction::{FlipDirection, ReadingDirection};
pub use error::{FlipBookError, Result};
pub use flipbook::{DebugInfo, FlipBook};
pub use gesture::GesturePhase;
pub use input::{PointerEvent, PointerType, TouchPoint, TouchTracker};
pub use layout::{BookLayout, Container, Edge, PageLayout, PageSide, Surface};
pub use leaf::{
    BookProperties, Completion, DEFAULT_FLIP_VELOCITY, DegreesPerSecond, FlipPosition, Leaf,
    PageTransform, TransitionOutcome,
};
pub use semantics::{NoSemantics, PageSemantic, PageSemantics};
pub use spread::{PageFlipParams, VisiblePages};
pub use toc::{DEFAULT_TOC_PAGE_INDEX, TocStore};

pub use flipbook_geometry::{AspectRatio, GeometryError, Size};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
