//! Programmatic navigation

use std::cmp::Ordering;

use crate::direction::FlipDirection;
use crate::error::{FlipBookError, Result};
use crate::flipbook::FlipBook;
use crate::gesture::Gesture;
use crate::leaf::{Completion, FlipPosition, TransitionOutcome};
use crate::spread;

impl FlipBook {
    /// Turn one leaf forward. `None` when already at the end or while the
    /// user is dragging.
    pub fn flip_next(&mut self) -> Option<Completion> {
        self.pending_leaf = None;
        self.flip_step(FlipDirection::Forward)
    }

    /// Turn one leaf backward
    pub fn flip_prev(&mut self) -> Option<Completion> {
        self.pending_leaf = None;
        self.flip_step(FlipDirection::Backward)
    }

    /// Turn leaves one at a time until `page_index` is visible
    pub fn flip_to_page(&mut self, page_index: usize) -> Result<()> {
        self.check_page(page_index)?;
        self.pending_leaf = Some(spread::leaf_for_page(page_index));
        tracing::debug!("Flipping through to page {}", page_index);
        self.continue_pending();
        Ok(())
    }

    /// Show `page_index`, animating only the leaf next to it.
    ///
    /// Every leaf between the current position and the target snaps to
    /// its final side; the leaf bordering the target turns. Cancels any
    /// drag or pending flip.
    pub fn jump_to_page(&mut self, page_index: usize) -> Result<Completion> {
        self.check_page(page_index)?;
        self.pending_leaf = None;
        self.gesture = Gesture::Idle;

        let target = spread::leaf_for_page(page_index);
        let from = self.current_leaf;
        let (boundary, direction) = match target.cmp(&from) {
            Ordering::Greater => (Some(target - 1), FlipDirection::Forward),
            Ordering::Less => (Some(target), FlipDirection::Backward),
            Ordering::Equal => (None, FlipDirection::None),
        };

        for leaf in &mut self.leaves {
            if Some(leaf.index()) == boundary {
                continue;
            }
            let resting = if leaf.index() < target {
                FlipPosition::TURNED
            } else {
                FlipPosition::FLAT
            };
            if leaf.is_turning() || leaf.flip_position() != resting {
                leaf.set_flip_position(resting.value());
            }
        }

        let Some(boundary) = boundary else {
            self.publish_visible_pages();
            return Ok(Completion::resolved(TransitionOutcome::Finished));
        };

        tracing::debug!(
            "Jumping to page {} (leaf {} -> {})",
            page_index,
            from,
            target
        );
        // One short of the target until the boundary leaf lands
        let (resting, current) = match direction {
            FlipDirection::Forward => (FlipPosition::TURNED, target - 1),
            _ => (FlipPosition::FLAT, target + 1),
        };
        self.current_leaf = current;
        self.notify_flipping(boundary, direction);
        let velocity = self.options.flip_velocity;
        Ok(self.start_auto_flip(boundary, direction, resting, velocity))
    }

    /// Jump to the table of contents
    pub fn go_to_toc(&mut self) -> Result<Completion> {
        self.jump_to_page(self.toc_page_index())
    }

    /// Jump to a page by its displayed name
    pub fn jump_to_semantic_page(&mut self, semantic_name: &str) -> Result<Completion> {
        let page_index = self
            .semantic_name_to_index(semantic_name)
            .ok_or_else(|| FlipBookError::UnknownPageName(semantic_name.to_string()))?;
        self.jump_to_page(page_index)
    }

    fn check_page(&self, page_index: usize) -> Result<()> {
        if page_index < self.total_pages() {
            Ok(())
        } else {
            tracing::warn!("Page index {} out of range", page_index);
            Err(FlipBookError::PageOutOfRange {
                index: page_index,
                pages_count: self.total_pages(),
            })
        }
    }

    fn flip_step(&mut self, direction: FlipDirection) -> Option<Completion> {
        if self.is_during_manual_flip() {
            return None;
        }
        self.settle_auto_flip();
        let leaf = self.available_leaf(direction)?;
        let target = match direction {
            FlipDirection::Forward => FlipPosition::TURNED,
            _ => FlipPosition::FLAT,
        };
        self.notify_flipping(leaf, direction);
        let velocity = self.options.flip_velocity;
        Some(self.start_auto_flip(leaf, direction, target, velocity))
    }

    /// Start the next leaf of a `flip_to_page`, once the book is idle
    pub(crate) fn continue_pending(&mut self) {
        let Some(target) = self.pending_leaf else {
            return;
        };
        if self.gesture != Gesture::Idle {
            return;
        }
        let direction = match target.cmp(&self.current_leaf) {
            Ordering::Greater => FlipDirection::Forward,
            Ordering::Less => FlipDirection::Backward,
            Ordering::Equal => {
                self.pending_leaf = None;
                return;
            }
        };
        if self.flip_step(direction).is_none() {
            self.pending_leaf = None;
        }
    }
}
