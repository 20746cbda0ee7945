//! Flipbook controller
//!
//! Owns the leaves and tracks the current leaf, i.e. how many leaves are
//! turned. Everything that moves a leaf (drags, programmatic flips,
//! jumps) ends in a turn report from [`Leaf::advance`], which is the one
//! place the current leaf and the visible pages are updated.

use std::fmt;
use std::ops::RangeInclusive;

use crate::clock::FrameClock;
use crate::config::{BookOptions, FlipBookConfig, PageChangedCallback, PageFlipCallback};
use crate::direction::{FlipDirection, ReadingDirection};
use crate::error::{FlipBookError, Result};
use crate::gesture::{Gesture, GesturePhase};
use crate::input::{TouchPoint, TouchTracker};
use crate::layout::{BookLayout, Surface};
use crate::leaf::{BookProperties, FlipPosition, Leaf, PageTransform};
use crate::semantics::{PageSemantic, PageSemantics};
use crate::spread::{self, PageFlipParams, VisiblePages};
use crate::toc::TocStore;

/// Headless page-flip book
pub struct FlipBook {
    pub(crate) options: BookOptions,
    properties: BookProperties,
    toc: TocStore,
    semantics: Box<dyn PageSemantics>,
    pub(crate) clock: Box<dyn FrameClock>,
    on_page_changed: Option<PageChangedCallback>,
    on_page_flipping: Option<PageFlipCallback>,
    on_page_flipped: Option<PageFlipCallback>,
    pub(crate) leaves: Vec<Leaf>,
    pub(crate) current_leaf: usize,
    pub(crate) gesture: Gesture,
    /// Target of a multi-leaf `flip_to_page`
    pub(crate) pending_leaf: Option<usize>,
    prev_visible: VisiblePages,
    pub(crate) layout: Option<BookLayout>,
    debug: bool,
    touch: TouchTracker,
}

impl FlipBook {
    /// Build the book and its leaves, opened at the configured landing page
    pub fn new(config: FlipBookConfig) -> Result<Self> {
        let FlipBookConfig {
            options,
            semantics,
            clock,
            on_page_changed,
            on_page_flipping,
            on_page_flipped,
        } = config;
        options.validate()?;

        let pages_count = options.pages_count;
        let properties =
            BookProperties::new(pages_count, options.direction, options.distinct_covers());
        let current_leaf = spread::leaf_for_page(options.landing_page());
        let leaves = (0..properties.leaves_count)
            .map(|index| Leaf::new(index, index < current_leaf, properties))
            .collect();

        tracing::debug!(
            "Created flipbook: {} pages, {} leaves, {:?}",
            pages_count,
            properties.leaves_count,
            options.direction
        );

        Ok(Self {
            toc: options.toc_page_index,
            options,
            properties,
            semantics,
            clock,
            on_page_changed,
            on_page_flipping,
            on_page_flipped,
            leaves,
            current_leaf,
            gesture: Gesture::Idle,
            pending_leaf: None,
            prev_visible: VisiblePages::at_leaf(current_leaf, pages_count),
            layout: None,
            debug: false,
            touch: TouchTracker::new(),
        })
    }

    /// Measure the container and lay the book out inside it
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        selector: &str,
        debug: bool,
    ) -> Result<&BookLayout> {
        if self.layout.is_some() {
            return Err(FlipBookError::AlreadyRendered);
        }
        let container = surface
            .query(selector)
            .ok_or_else(|| FlipBookError::ContainerNotFound(selector.to_string()))?;
        if container.page_count == 0 {
            return Err(FlipBookError::NoPages);
        }
        if container.page_count != self.total_pages() {
            tracing::warn!(
                "Container {} holds {} pages, book expects {}",
                selector,
                container.page_count,
                self.total_pages()
            );
        }

        let layout = BookLayout::compute(&container, &self.options, self.semantics.as_ref())?;
        tracing::info!(
            "Rendered flipbook into {}: leaf {}, cover {}",
            selector,
            layout.leaf_size,
            layout.cover_size
        );
        self.debug = debug;
        Ok(&*self.layout.insert(layout))
    }

    /// Cancel all motion and unbind from the container.
    ///
    /// Leaves caught mid-turn snap back to the side matching the current
    /// leaf, so a later render starts from a resting book.
    pub fn destroy(&mut self) {
        let current_leaf = self.current_leaf;
        for leaf in &mut self.leaves {
            let resting = if leaf.index() < current_leaf {
                FlipPosition::TURNED
            } else {
                FlipPosition::FLAT
            };
            // Also supersedes any in-flight transition
            leaf.set_flip_position(resting.value());
        }
        self.gesture = Gesture::Idle;
        self.pending_leaf = None;
        self.touch.reset();
        if self.layout.take().is_some() {
            tracing::info!("Flipbook destroyed");
        }
    }

    /// Advance all leaves to the clock's current time.
    ///
    /// Returns whether any leaf is still animating, so the host knows to
    /// schedule another frame.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let reports: Vec<(usize, FlipDirection)> = self
            .leaves
            .iter_mut()
            .filter_map(|leaf| leaf.advance(now).map(|direction| (leaf.index(), direction)))
            .collect();
        for (leaf_index, direction) in reports {
            self.on_turned(leaf_index, direction);
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.leaves.iter().any(|leaf| leaf.target().is_some())
    }

    pub fn is_rendered(&self) -> bool {
        self.layout.is_some()
    }

    pub fn layout(&self) -> Option<&BookLayout> {
        self.layout.as_ref()
    }

    pub fn total_pages(&self) -> usize {
        self.properties.pages_count
    }

    pub fn leaves_count(&self) -> usize {
        self.properties.leaves_count
    }

    pub fn direction(&self) -> ReadingDirection {
        self.properties.reading_direction
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn leaf(&self, index: usize) -> Option<&Leaf> {
        self.leaves.get(index)
    }

    /// Number of turned leaves
    pub fn current_leaf(&self) -> usize {
        self.current_leaf
    }

    pub fn visible_pages(&self) -> VisiblePages {
        VisiblePages::at_leaf(self.current_leaf, self.total_pages())
    }

    pub fn current_page_index(&self) -> usize {
        self.visible_pages().first()
    }

    /// Resting on the front cover
    pub fn is_closed(&self) -> bool {
        self.current_leaf == 0 && !self.any_turning()
    }

    /// Resting on the back cover
    pub fn is_closed_inverted(&self) -> bool {
        self.current_leaf == spread::max_current_leaf(self.total_pages()) && !self.any_turning()
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page_index() == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.visible_pages().contains(self.total_pages() - 1)
    }

    pub fn toc_page_index(&self) -> usize {
        self.toc.get()
    }

    pub fn set_toc_page_index(&mut self, page_index: usize) {
        self.toc.set(page_index);
    }

    pub fn page_semantic(&self, page_index: usize) -> PageSemantic {
        PageSemantic::lookup(self.semantics.as_ref(), page_index)
    }

    pub(crate) fn semantic_name_to_index(&self, semantic_name: &str) -> Option<usize> {
        self.semantics.semantic_name_to_index(semantic_name)
    }

    /// Current transform of a page
    pub fn page_transform(&self, page_index: usize) -> Option<PageTransform> {
        let (front, back) = self.leaves.get(page_index / 2)?.page_transforms();
        if page_index % 2 == 0 { Some(front) } else { back }
    }

    /// Leaves the host should keep rendered around the current one
    pub fn rendered_leaves(&self) -> RangeInclusive<usize> {
        let last = self.leaves_count() - 1;
        match self.options.leaves_buffer {
            None => 0..=last,
            Some(buffer) => {
                let anchor = self.current_leaf.min(last);
                anchor.saturating_sub(buffer)..=(anchor + buffer).min(last)
            }
        }
    }

    pub fn is_leaf_rendered(&self, leaf_index: usize) -> bool {
        self.rendered_leaves().contains(&leaf_index)
    }

    pub fn handle_touch_start(&mut self, touches: &[TouchPoint]) {
        self.touch.touch_start(touches);
    }

    /// Whether a touch move should suppress native scrolling
    pub fn handle_touch_move(&self, touches: &[TouchPoint]) -> bool {
        self.touch.should_prevent_scroll(touches)
    }

    /// Debug overlay data; only available when rendered in debug mode
    pub fn debug_info(&self) -> Option<DebugInfo> {
        if !self.debug || self.layout.is_none() {
            return None;
        }
        let active_leaf = self
            .leaves
            .iter()
            .find(|leaf| leaf.is_turning())
            .map(|leaf| (leaf.index(), leaf.flip_position()));
        Some(DebugInfo {
            direction: self.direction(),
            current_leaf: self.current_leaf,
            gesture: self.gesture.phase(),
            active_leaf,
            flip_direction: self.gesture.direction(),
        })
    }

    fn any_turning(&self) -> bool {
        self.leaves.iter().any(Leaf::is_turning)
    }

    /// Leaf a turn in `direction` would move, if the book allows it
    pub(crate) fn available_leaf(&self, direction: FlipDirection) -> Option<usize> {
        match direction {
            FlipDirection::Forward => (self.current_leaf
                < spread::max_current_leaf(self.total_pages()))
            .then_some(self.current_leaf),
            FlipDirection::Backward => self.current_leaf.checked_sub(1),
            FlipDirection::None => None,
        }
    }

    /// Bookkeeping after a leaf comes to rest
    pub(crate) fn on_turned(&mut self, leaf_index: usize, direction: FlipDirection) {
        let max = spread::max_current_leaf(self.total_pages());
        self.current_leaf = match direction {
            FlipDirection::Forward => leaf_index + 1,
            _ => leaf_index,
        }
        .min(max);

        if matches!(self.gesture, Gesture::Auto(flip) if flip.leaf == leaf_index) {
            self.gesture = Gesture::Idle;
        }

        tracing::trace!("Leaf {} turned {:?}", leaf_index, direction);
        if self.publish_visible_pages() {
            let params = self.flip_params(leaf_index, direction);
            if let Some(callback) = self.on_page_flipped.as_mut() {
                callback(&params);
            }
        }
        self.continue_pending();
    }

    /// Fire `on_page_changed` if the visible pages differ from the last
    /// published ones
    pub(crate) fn publish_visible_pages(&mut self) -> bool {
        let visible = self.visible_pages();
        if visible == self.prev_visible {
            return false;
        }
        self.prev_visible = visible;
        tracing::debug!("Visible pages now {:?}", visible);
        if let Some(callback) = self.on_page_changed.as_mut() {
            callback(visible.first());
        }
        true
    }

    pub(crate) fn notify_flipping(&mut self, leaf_index: usize, direction: FlipDirection) {
        let params = self.flip_params(leaf_index, direction);
        if let Some(callback) = self.on_page_flipping.as_mut() {
            callback(&params);
        }
    }

    fn flip_params(&self, leaf_index: usize, direction: FlipDirection) -> PageFlipParams {
        let landing_leaf = match direction {
            FlipDirection::Forward => leaf_index + 1,
            _ => leaf_index,
        }
        .min(spread::max_current_leaf(self.total_pages()));
        let pages = VisiblePages::at_leaf(landing_leaf, self.total_pages());
        PageFlipParams {
            leaf_index,
            direction,
            pages,
            semantics: pages
                .to_vec()
                .into_iter()
                .map(|page| self.page_semantic(page))
                .collect(),
        }
    }
}

impl Drop for FlipBook {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for FlipBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlipBook")
            .field("options", &self.options)
            .field("current_leaf", &self.current_leaf)
            .field("gesture", &self.gesture)
            .field("rendered", &self.layout.is_some())
            .finish_non_exhaustive()
    }
}

/// Debug overlay data
#[derive(Debug, Clone, PartialEq)]
pub struct DebugInfo {
    pub direction: ReadingDirection,
    pub current_leaf: usize,
    pub gesture: GesturePhase,
    /// Leaf mid-turn and its position
    pub active_leaf: Option<(usize, FlipPosition)>,
    pub flip_direction: FlipDirection,
}

impl fmt::Display for DebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.direction.is_ltr() { "LTR" } else { "RTL" };
        write!(f, "Direction: {direction} | Active flip: ")?;
        match self.active_leaf {
            Some((index, position)) => write!(f, "{}:{:.2}", index, position.value())?,
            None => write!(f, "-")?,
        }
        write!(
            f,
            " | Gesture: {:?} | Flip dir: {:?}",
            self.gesture, self.flip_direction
        )
    }
}
