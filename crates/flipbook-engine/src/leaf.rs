//! Leaf flip-angle state machine
//!
//! A leaf is one physical sheet carrying two pages. Its flip position
//! runs from 0 (flat, not turned) through 1 (upright) to 2 (flat, turned).
//! Transitions are time based and driven by [`Leaf::advance`]; at most one
//! is in flight, and starting another supersedes it.

use std::fmt;
use std::time::Duration;

use smol::channel::{self, Receiver, Sender, TryRecvError};

use crate::direction::{FlipDirection, ReadingDirection};
use crate::layout::Edge;

/// Angular speed of a transition
pub type DegreesPerSecond = u32;

/// Speed of programmatic flips
pub const DEFAULT_FLIP_VELOCITY: DegreesPerSecond = 225;

/// One unit of flip position is a quarter turn
const DEGREES_PER_UNIT: f32 = 90.0;

/// Positions closer than this are the same position
const SAME_POSITION: f32 = 1e-4;

/// Distance below which an efficient flip snaps instead of animating
const NEGLIGIBLE_DISTANCE: f32 = 0.02;

/// Normalized turn progress, always within `[0, 2]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct FlipPosition(f32);

impl FlipPosition {
    pub const FLAT: Self = Self(0.0);
    pub const UPRIGHT: Self = Self(1.0);
    pub const TURNED: Self = Self(2.0);

    /// Clamp a raw value into range; NaN is treated as flat
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::FLAT
        } else {
            Self(value.clamp(0.0, 2.0))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Rotation around the spine, 0 to 180 degrees
    pub fn degrees(self) -> f32 {
        self.0 * DEGREES_PER_UNIT
    }

    pub fn is_resting(self) -> bool {
        self == Self::FLAT || self == Self::TURNED
    }
}

impl From<f32> for FlipPosition {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// How a transition ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Reached its target
    Finished,
    /// Replaced by a newer transition, a direct position change, or teardown
    Superseded,
}

/// Handle to the outcome of one transition.
///
/// Resolves exactly once. Await it with [`Completion::wait`] or check it
/// between frames with [`Completion::poll_outcome`].
#[derive(Debug)]
pub struct Completion {
    outcome: Option<TransitionOutcome>,
    receiver: Receiver<TransitionOutcome>,
}

impl Completion {
    fn pending() -> (Sender<TransitionOutcome>, Self) {
        let (sender, receiver) = channel::bounded(1);
        (
            sender,
            Self {
                outcome: None,
                receiver,
            },
        )
    }

    /// Completion that is already resolved
    pub(crate) fn resolved(outcome: TransitionOutcome) -> Self {
        let (_, mut completion) = Self::pending();
        completion.outcome = Some(outcome);
        completion
    }

    /// Outcome if the transition has ended, without blocking
    pub fn poll_outcome(&mut self) -> Option<TransitionOutcome> {
        if self.outcome.is_none() {
            match self.receiver.try_recv() {
                Ok(outcome) => self.outcome = Some(outcome),
                // Sender dropped with its leaf
                Err(TryRecvError::Closed) => self.outcome = Some(TransitionOutcome::Superseded),
                Err(TryRecvError::Empty) => {}
            }
        }
        self.outcome
    }

    pub fn is_settled(&mut self) -> bool {
        self.poll_outcome().is_some()
    }

    /// Wait until the transition ends
    pub async fn wait(mut self) -> TransitionOutcome {
        if let Some(outcome) = self.poll_outcome() {
            return outcome;
        }
        self.receiver
            .recv()
            .await
            .unwrap_or(TransitionOutcome::Superseded)
    }
}

/// Immutable snapshot of the book a leaf belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookProperties {
    pub reading_direction: ReadingDirection,
    pub pages_count: usize,
    pub leaves_count: usize,
    /// Covers use a different aspect ratio than interior leaves
    pub distinct_covers: bool,
}

impl BookProperties {
    pub fn new(pages_count: usize, reading_direction: ReadingDirection, distinct_covers: bool) -> Self {
        Self {
            reading_direction,
            pages_count,
            leaves_count: pages_count.div_ceil(2),
            distinct_covers,
        }
    }
}

#[derive(Debug)]
struct Transition {
    from: f32,
    to: f32,
    /// Latched on the first frame after the transition starts
    started_at: Option<Duration>,
    duration: Duration,
    done: Sender<TransitionOutcome>,
}

impl Transition {
    fn resolve(self, outcome: TransitionOutcome) {
        // Capacity 1 and a single send per transition; a dropped receiver is fine
        let _ = self.done.try_send(outcome);
    }
}

/// CSS-like transform of one page at the leaf's current position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    pub page_index: usize,
    pub translate_x_percent: f32,
    pub rotate_y_degrees: f32,
    pub scale_x: f32,
    pub origin: Edge,
    pub z_index: i64,
}

impl fmt::Display for PageTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translateX({}%)rotateY({}deg)scaleX({})",
            self.translate_x_percent, self.rotate_y_degrees, self.scale_x
        )
    }
}

/// One double-sided sheet
#[derive(Debug)]
pub struct Leaf {
    index: usize,
    front_page: usize,
    back_page: Option<usize>,
    position: FlipPosition,
    transition: Option<Transition>,
    book: BookProperties,
}

impl Leaf {
    pub fn new(index: usize, turned: bool, book: BookProperties) -> Self {
        let front_page = index * 2;
        let back_page = Some(front_page + 1).filter(|&page| page < book.pages_count);
        Self {
            index,
            front_page,
            back_page,
            position: if turned { FlipPosition::TURNED } else { FlipPosition::FLAT },
            transition: None,
            book,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn front_page(&self) -> usize {
        self.front_page
    }

    /// The last leaf of an odd-paged book has no back page
    pub fn back_page(&self) -> Option<usize> {
        self.back_page
    }

    pub fn flip_position(&self) -> FlipPosition {
        self.position
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.book.leaves_count
    }

    pub fn is_cover(&self) -> bool {
        self.book.distinct_covers && (self.is_first() || self.is_last())
    }

    pub fn is_turned(&self) -> bool {
        self.position == FlipPosition::TURNED
    }

    pub fn is_turning(&self) -> bool {
        self.transition.is_some() || !self.position.is_resting()
    }

    pub fn is_resting(&self) -> bool {
        !self.is_turning()
    }

    /// Target of the in-flight transition
    pub fn target(&self) -> Option<FlipPosition> {
        self.transition.as_ref().map(|t| FlipPosition::new(t.to))
    }

    /// Apply a position immediately, superseding any transition
    pub fn set_flip_position(&mut self, value: f32) {
        self.cancel();
        self.position = FlipPosition::new(value);
    }

    /// Animate to `target` at `velocity` degrees per second
    pub fn flip_to_position(&mut self, target: f32, velocity: DegreesPerSecond) -> Completion {
        self.cancel();
        let to = FlipPosition::new(target).value();
        let from = self.position.value();
        let distance = (to - from).abs();
        if distance < SAME_POSITION {
            self.position = FlipPosition::new(to);
            return Completion::resolved(TransitionOutcome::Finished);
        }

        let seconds = distance * DEGREES_PER_UNIT / velocity.max(1) as f32;
        let duration = Duration::from_secs_f32(seconds);
        tracing::debug!(
            "Leaf {} flipping {:.3} -> {:.3} over {:?}",
            self.index,
            from,
            to,
            duration
        );

        let (done, completion) = Completion::pending();
        self.transition = Some(Transition {
            from,
            to,
            started_at: None,
            duration,
            done,
        });
        completion
    }

    /// Like [`Leaf::flip_to_position`], but snaps when the move is too
    /// small to be seen
    pub fn efficient_flip_to_position(
        &mut self,
        target: f32,
        velocity: DegreesPerSecond,
    ) -> Completion {
        let to = FlipPosition::new(target);
        if (to.value() - self.position.value()).abs() < NEGLIGIBLE_DISTANCE {
            self.set_flip_position(to.value());
            return Completion::resolved(TransitionOutcome::Finished);
        }
        self.flip_to_position(to.value(), velocity)
    }

    /// Supersede the in-flight transition, leaving the leaf where it is
    pub fn cancel(&mut self) {
        if let Some(transition) = self.transition.take() {
            tracing::debug!("Leaf {} transition superseded", self.index);
            transition.resolve(TransitionOutcome::Superseded);
        }
    }

    /// Step the in-flight transition to `now`.
    ///
    /// Returns the turn direction once, when a transition finishes.
    pub fn advance(&mut self, now: Duration) -> Option<FlipDirection> {
        let (value, finished) = {
            let transition = self.transition.as_mut()?;
            let started_at = *transition.started_at.get_or_insert(now);
            let elapsed = now.saturating_sub(started_at);
            let progress = if transition.duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f32() / transition.duration.as_secs_f32()).min(1.0)
            };
            (
                transition.from + (transition.to - transition.from) * progress,
                progress >= 1.0,
            )
        };
        self.position = FlipPosition::new(value);
        if !finished {
            return None;
        }

        let transition = self.transition.take()?;
        self.position = FlipPosition::new(transition.to);
        let direction = if transition.to > transition.from {
            FlipDirection::Forward
        } else {
            FlipDirection::Backward
        };
        transition.resolve(TransitionOutcome::Finished);
        tracing::debug!("Leaf {} turned {:?}", self.index, direction);
        Some(direction)
    }

    /// Transforms for the front page and, when present, the back page
    pub fn page_transforms(&self) -> (PageTransform, Option<PageTransform>) {
        let front = self.front_transform();
        let back = self.back_page.map(|page| self.back_transform(page));
        (front, back)
    }

    fn z_index(&self, page_index: usize) -> i64 {
        if self.position.value() > 1.0 {
            page_index as i64
        } else {
            self.book.pages_count as i64 - page_index as i64
        }
    }

    fn front_transform(&self) -> PageTransform {
        let ltr = self.book.reading_direction.is_ltr();
        let degrees = self.position.degrees();
        let over = self.position.value() > 1.0;
        let rotate = match (ltr, over) {
            (true, true) => 180.0 - degrees,
            (true, false) => -degrees,
            (false, true) => -(180.0 - degrees),
            (false, false) => degrees,
        };
        PageTransform {
            page_index: self.front_page,
            translate_x_percent: if ltr { 100.0 } else { -100.0 },
            rotate_y_degrees: rotate,
            scale_x: if over { -1.0 } else { 1.0 },
            origin: if ltr { Edge::Left } else { Edge::Right },
            z_index: self.z_index(self.front_page),
        }
    }

    fn back_transform(&self, page_index: usize) -> PageTransform {
        let ltr = self.book.reading_direction.is_ltr();
        let degrees = self.position.degrees();
        let before = self.position.value() < 1.0;
        let rotate = match (ltr, before) {
            (true, true) => -degrees,
            (true, false) => 180.0 - degrees,
            (false, true) => degrees,
            (false, false) => -(180.0 - degrees),
        };
        PageTransform {
            page_index,
            translate_x_percent: 0.0,
            rotate_y_degrees: rotate,
            scale_x: if before { -1.0 } else { 1.0 },
            origin: if ltr { Edge::Right } else { Edge::Left },
            z_index: self.z_index(page_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(pages: usize) -> BookProperties {
        BookProperties::new(pages, ReadingDirection::Ltr, true)
    }

    fn run(leaf: &mut Leaf, until: Duration) -> Vec<FlipDirection> {
        let mut reports = Vec::new();
        let mut now = Duration::ZERO;
        while now <= until {
            reports.extend(leaf.advance(now));
            now += Duration::from_millis(16);
        }
        reports
    }

    #[test]
    fn test_new_leaf_state() {
        let leaf = Leaf::new(1, false, book(6));
        assert_eq!(leaf.front_page(), 2);
        assert_eq!(leaf.back_page(), Some(3));
        assert_eq!(leaf.flip_position(), FlipPosition::FLAT);
        assert!(!leaf.is_turned());
        assert!(!leaf.is_turning());

        let turned = Leaf::new(0, true, book(6));
        assert!(turned.is_turned());
        assert!(turned.is_resting());
    }

    #[test]
    fn test_odd_book_last_leaf_has_no_back() {
        let leaf = Leaf::new(2, false, book(5));
        assert_eq!(leaf.front_page(), 4);
        assert_eq!(leaf.back_page(), None);
        assert!(leaf.is_last());
    }

    #[test]
    fn test_cover_flags() {
        let props = book(8);
        assert!(Leaf::new(0, false, props).is_cover());
        assert!(Leaf::new(3, false, props).is_cover());
        assert!(!Leaf::new(1, false, props).is_cover());

        let plain = BookProperties::new(8, ReadingDirection::Ltr, false);
        assert!(!Leaf::new(0, false, plain).is_cover());
        assert!(Leaf::new(0, false, plain).is_first());
    }

    #[test]
    fn test_set_flip_position_clamps() {
        let mut leaf = Leaf::new(0, false, book(4));
        leaf.set_flip_position(7.5);
        assert_eq!(leaf.flip_position(), FlipPosition::TURNED);
        leaf.set_flip_position(-3.0);
        assert_eq!(leaf.flip_position(), FlipPosition::FLAT);
        leaf.set_flip_position(f32::NAN);
        assert_eq!(leaf.flip_position(), FlipPosition::FLAT);
        leaf.set_flip_position(0.4);
        assert!(leaf.is_turning());
    }

    #[test]
    fn test_flip_to_position_animates_forward() {
        let mut leaf = Leaf::new(0, false, book(4));
        let mut completion = leaf.flip_to_position(2.0, DEFAULT_FLIP_VELOCITY);
        assert!(leaf.is_turning());

        // 180 degrees at 225 deg/s takes 800ms
        assert_eq!(leaf.advance(Duration::from_millis(100)), None);
        assert_eq!(leaf.advance(Duration::from_millis(500)), None);
        let mid = leaf.flip_position().value();
        assert!((mid - 1.0).abs() < 0.01, "position at 400ms = {}", mid);
        assert_eq!(completion.poll_outcome(), None);

        assert_eq!(leaf.advance(Duration::from_millis(950)), Some(FlipDirection::Forward));
        assert!(leaf.is_turned());
        assert!(!leaf.is_turning());
        assert_eq!(completion.poll_outcome(), Some(TransitionOutcome::Finished));
        assert_eq!(leaf.advance(Duration::from_millis(1100)), None);
    }

    #[test]
    fn test_flip_back_reports_backward() {
        let mut leaf = Leaf::new(0, true, book(4));
        let completion = leaf.flip_to_position(0.0, 900);
        let reports = run(&mut leaf, Duration::from_millis(400));
        assert_eq!(reports, vec![FlipDirection::Backward]);
        assert_eq!(leaf.flip_position(), FlipPosition::FLAT);
        assert_eq!(smol::block_on(completion.wait()), TransitionOutcome::Finished);
    }

    #[test]
    fn test_superseded_transition_never_reports() {
        let mut leaf = Leaf::new(0, false, book(4));
        leaf.set_flip_position(1.0);
        let mut first = leaf.flip_to_position(0.0, DEFAULT_FLIP_VELOCITY);
        let mut second = leaf.flip_to_position(2.0, DEFAULT_FLIP_VELOCITY);

        assert_eq!(first.poll_outcome(), Some(TransitionOutcome::Superseded));
        let reports = run(&mut leaf, Duration::from_secs(1));
        assert_eq!(reports, vec![FlipDirection::Forward]);
        assert_eq!(second.poll_outcome(), Some(TransitionOutcome::Finished));
        // Still superseded, never flips to finished
        assert_eq!(first.poll_outcome(), Some(TransitionOutcome::Superseded));
    }

    #[test]
    fn test_already_at_target_resolves_immediately() {
        let mut leaf = Leaf::new(0, false, book(4));
        let mut completion = leaf.flip_to_position(0.0, DEFAULT_FLIP_VELOCITY);
        assert_eq!(completion.poll_outcome(), Some(TransitionOutcome::Finished));
        assert!(!leaf.is_turning());
        assert_eq!(leaf.advance(Duration::from_millis(5)), None);
    }

    #[test]
    fn test_out_of_range_target_is_clamped() {
        let mut leaf = Leaf::new(0, false, book(4));
        let _completion = leaf.flip_to_position(40.0, 1800);
        run(&mut leaf, Duration::from_millis(200));
        assert_eq!(leaf.flip_position(), FlipPosition::TURNED);
    }

    #[test]
    fn test_set_position_supersedes_transition() {
        let mut leaf = Leaf::new(0, false, book(4));
        let mut completion = leaf.flip_to_position(2.0, DEFAULT_FLIP_VELOCITY);
        leaf.advance(Duration::ZERO);
        leaf.set_flip_position(0.5);
        assert_eq!(completion.poll_outcome(), Some(TransitionOutcome::Superseded));
        assert_eq!(leaf.advance(Duration::from_secs(5)), None);
        assert_eq!(leaf.flip_position().value(), 0.5);
    }

    #[test]
    fn test_efficient_flip_snaps_small_moves() {
        let mut leaf = Leaf::new(0, false, book(4));
        leaf.set_flip_position(1.99);
        let mut completion = leaf.efficient_flip_to_position(2.0, DEFAULT_FLIP_VELOCITY);
        assert_eq!(completion.poll_outcome(), Some(TransitionOutcome::Finished));
        assert!(leaf.is_turned());
        assert!(!leaf.is_turning());

        let mut animated = leaf.efficient_flip_to_position(1.0, DEFAULT_FLIP_VELOCITY);
        assert_eq!(animated.poll_outcome(), None);
        assert!(leaf.is_turning());
    }

    #[test]
    fn test_late_first_frame_latches_start() {
        let mut leaf = Leaf::new(0, false, book(4));
        let _completion = leaf.flip_to_position(2.0, DEFAULT_FLIP_VELOCITY);
        // First frame arrives long after the call: animation starts there
        assert_eq!(leaf.advance(Duration::from_secs(10)), None);
        assert_eq!(leaf.flip_position(), FlipPosition::FLAT);
        assert_eq!(
            leaf.advance(Duration::from_secs(10) + Duration::from_millis(850)),
            Some(FlipDirection::Forward)
        );
    }

    #[test]
    fn test_transforms_ltr() {
        let mut leaf = Leaf::new(0, false, book(4));
        let (front, back) = leaf.page_transforms();
        assert_eq!(front.rotate_y_degrees, 0.0);
        assert_eq!(front.origin, Edge::Left);
        assert_eq!(front.z_index, 4);
        let back = back.unwrap();
        assert_eq!(back.scale_x, -1.0);
        assert_eq!(back.origin, Edge::Right);

        leaf.set_flip_position(0.5);
        assert_eq!(leaf.page_transforms().0.rotate_y_degrees, -45.0);

        leaf.set_flip_position(1.5);
        let (front, back) = leaf.page_transforms();
        assert_eq!(front.rotate_y_degrees, 45.0);
        assert_eq!(front.scale_x, -1.0);
        assert_eq!(front.z_index, 0);
        assert_eq!(back.unwrap().rotate_y_degrees, 45.0);
        assert_eq!(front.to_string(), "translateX(100%)rotateY(45deg)scaleX(-1)");
    }

    #[test]
    fn test_transforms_rtl_mirror() {
        let props = BookProperties::new(4, ReadingDirection::Rtl, false);
        let mut leaf = Leaf::new(0, false, props);
        leaf.set_flip_position(0.5);
        let (front, back) = leaf.page_transforms();
        assert_eq!(front.rotate_y_degrees, 45.0);
        assert_eq!(front.translate_x_percent, -100.0);
        assert_eq!(front.origin, Edge::Right);
        assert_eq!(back.unwrap().origin, Edge::Left);
    }
}
