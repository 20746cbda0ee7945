//! Flipbook configuration

use std::fmt;

use flipbook_geometry::AspectRatio;
use serde::{Deserialize, Serialize};

use crate::clock::{FrameClock, SystemClock};
use crate::direction::ReadingDirection;
use crate::error::{FlipBookError, Result};
use crate::leaf::{DEFAULT_FLIP_VELOCITY, DegreesPerSecond};
use crate::semantics::{NoSemantics, PageSemantics};
use crate::spread::PageFlipParams;
use crate::toc::TocStore;

/// Interior leaf proportion
pub const DEFAULT_LEAF_ASPECT_RATIO: AspectRatio = AspectRatio::new_const(2.0, 3.0);

/// Hard covers overhang the interior leaves slightly
pub const DEFAULT_COVER_ASPECT_RATIO: AspectRatio = AspectRatio::new_const(2.15, 3.15);

/// Release speed (px/s) above which a drag completes regardless of position
pub const DEFAULT_FAST_SWIPE_THRESHOLD: f32 = 500.0;

/// Where the book opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Landing {
    /// Closed on the front cover
    #[default]
    Cover,
    /// Open at the table of contents
    Contents,
    /// Open at a page index
    Page(usize),
}

/// Plain-data book options, loadable from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookOptions {
    pub pages_count: usize,
    pub leaf_aspect_ratio: AspectRatio,
    pub cover_aspect_ratio: AspectRatio,
    pub direction: ReadingDirection,
    /// Inset (px) between the container edges and the book
    pub padding: f32,
    pub fast_swipe_threshold: f32,
    pub toc_page_index: TocStore,
    pub landing: Landing,
    /// Leaves rendered on each side of the current one; all when unset
    pub leaves_buffer: Option<usize>,
    pub flip_velocity: DegreesPerSecond,
}

impl BookOptions {
    pub fn new(pages_count: usize) -> Self {
        Self {
            pages_count,
            ..Self::default()
        }
    }

    /// Parse and validate options from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pages_count == 0 {
            return Err(FlipBookError::InvalidPageCount(self.pages_count));
        }
        let landing_page = self.landing_page();
        if landing_page >= self.pages_count {
            return Err(FlipBookError::PageOutOfRange {
                index: landing_page,
                pages_count: self.pages_count,
            });
        }
        Ok(())
    }

    /// Covers get their own size when their proportion differs
    pub fn distinct_covers(&self) -> bool {
        !self.leaf_aspect_ratio.same_proportion(&self.cover_aspect_ratio)
    }

    /// Page index the book opens at
    pub fn landing_page(&self) -> usize {
        match self.landing {
            Landing::Cover => 0,
            Landing::Contents => self.toc_page_index.get(),
            Landing::Page(index) => index,
        }
    }
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            pages_count: 0,
            leaf_aspect_ratio: DEFAULT_LEAF_ASPECT_RATIO,
            cover_aspect_ratio: DEFAULT_COVER_ASPECT_RATIO,
            direction: ReadingDirection::default(),
            padding: 0.0,
            fast_swipe_threshold: DEFAULT_FAST_SWIPE_THRESHOLD,
            toc_page_index: TocStore::default(),
            landing: Landing::default(),
            leaves_buffer: None,
            flip_velocity: DEFAULT_FLIP_VELOCITY,
        }
    }
}

/// Fired with the first visible page index when the spread changes
pub type PageChangedCallback = Box<dyn FnMut(usize)>;

/// Fired when a leaf starts or finishes turning
pub type PageFlipCallback = Box<dyn FnMut(&PageFlipParams)>;

/// Flipbook construction config: options plus host hooks
pub struct FlipBookConfig {
    pub(crate) options: BookOptions,
    pub(crate) semantics: Box<dyn PageSemantics>,
    pub(crate) clock: Box<dyn FrameClock>,
    pub(crate) on_page_changed: Option<PageChangedCallback>,
    pub(crate) on_page_flipping: Option<PageFlipCallback>,
    pub(crate) on_page_flipped: Option<PageFlipCallback>,
}

impl FlipBookConfig {
    pub fn new(pages_count: usize) -> Self {
        Self::from_options(BookOptions::new(pages_count))
    }

    pub fn from_options(options: BookOptions) -> Self {
        Self {
            options,
            semantics: Box::new(NoSemantics),
            clock: Box::new(SystemClock::new()),
            on_page_changed: None,
            on_page_flipping: None,
            on_page_flipped: None,
        }
    }

    pub fn options(&self) -> &BookOptions {
        &self.options
    }

    pub fn with_direction(mut self, direction: ReadingDirection) -> Self {
        self.options.direction = direction;
        self
    }

    pub fn with_leaf_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.options.leaf_aspect_ratio = ratio;
        self
    }

    pub fn with_cover_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.options.cover_aspect_ratio = ratio;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.options.padding = padding;
        self
    }

    pub fn with_fast_swipe_threshold(mut self, threshold: f32) -> Self {
        self.options.fast_swipe_threshold = threshold;
        self
    }

    pub fn with_toc_page_index(mut self, page_index: usize) -> Self {
        self.options.toc_page_index.set(page_index);
        self
    }

    pub fn with_landing(mut self, landing: Landing) -> Self {
        self.options.landing = landing;
        self
    }

    pub fn with_leaves_buffer(mut self, buffer: usize) -> Self {
        self.options.leaves_buffer = Some(buffer);
        self
    }

    pub fn with_flip_velocity(mut self, velocity: DegreesPerSecond) -> Self {
        self.options.flip_velocity = velocity;
        self
    }

    pub fn with_page_semantics(mut self, semantics: impl PageSemantics + 'static) -> Self {
        self.semantics = Box::new(semantics);
        self
    }

    pub fn with_clock(mut self, clock: impl FrameClock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn on_page_changed(mut self, callback: impl FnMut(usize) + 'static) -> Self {
        self.on_page_changed = Some(Box::new(callback));
        self
    }

    pub fn on_page_flipping(mut self, callback: impl FnMut(&PageFlipParams) + 'static) -> Self {
        self.on_page_flipping = Some(Box::new(callback));
        self
    }

    pub fn on_page_flipped(mut self, callback: impl FnMut(&PageFlipParams) + 'static) -> Self {
        self.on_page_flipped = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for FlipBookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlipBookConfig")
            .field("options", &self.options)
            .field("on_page_changed", &self.on_page_changed.is_some())
            .field("on_page_flipping", &self.on_page_flipping.is_some())
            .field("on_page_flipped", &self.on_page_flipped.is_some())
            .finish_non_exhaustive()
    }
}
