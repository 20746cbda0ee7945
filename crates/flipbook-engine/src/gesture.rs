//! Drag gestures
//!
//! A drag locks onto one leaf and one direction on its first movement and
//! maps the pointer's travel across the spread to the leaf's flip
//! position. On release the leaf animates to whichever side it belongs:
//! past the spine, or flung faster than the swipe threshold, completes
//! the turn; anything else falls back.

use std::time::Duration;

use crate::direction::FlipDirection;
use crate::flipbook::FlipBook;
use crate::input::PointerEvent;
use crate::leaf::{Completion, DegreesPerSecond, FlipPosition};

/// Slowest release animation
const MIN_RELEASE_VELOCITY: DegreesPerSecond = 225;

/// Fastest release animation
const MAX_RELEASE_VELOCITY: DegreesPerSecond = 1800;

/// Coarse gesture state, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pointer held and dragging
    Manual,
    /// Leaf animating to rest
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    Manual(ManualFlip),
    Auto(AutoFlip),
}

impl Gesture {
    pub(crate) fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::Manual(_) => GesturePhase::Manual,
            Self::Auto(_) => GesturePhase::Auto,
        }
    }

    pub(crate) fn direction(&self) -> FlipDirection {
        match self {
            Self::Idle => FlipDirection::None,
            Self::Manual(flip) => flip.direction,
            Self::Auto(flip) => flip.direction,
        }
    }
}

/// Pointer-held drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ManualFlip {
    starting_x: f32,
    direction: FlipDirection,
    /// Locked on the first movement that has a leaf to turn
    leaf: Option<usize>,
    last_x: f32,
    last_at: Duration,
    /// Horizontal pointer velocity, px/s
    velocity_x: f32,
}

impl ManualFlip {
    fn new(x: f32, now: Duration) -> Self {
        Self {
            starting_x: x,
            direction: FlipDirection::None,
            leaf: None,
            last_x: x,
            last_at: now,
            velocity_x: 0.0,
        }
    }

    fn track(&mut self, x: f32, now: Duration) {
        let elapsed = now.saturating_sub(self.last_at).as_secs_f32();
        if elapsed > 0.0 {
            self.velocity_x = (x - self.last_x) / elapsed;
            self.last_at = now;
        }
        self.last_x = x;
    }
}

/// Leaf animating to rest after a release or a programmatic flip
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AutoFlip {
    pub(crate) leaf: usize,
    pub(crate) direction: FlipDirection,
    pub(crate) target: FlipPosition,
}

/// Animation speed matching the pointer's release speed
fn release_velocity(velocity_x: f32, spread_width: f32) -> DegreesPerSecond {
    let degrees = velocity_x.abs() / spread_width * 180.0;
    degrees.clamp(MIN_RELEASE_VELOCITY as f32, MAX_RELEASE_VELOCITY as f32) as DegreesPerSecond
}

impl FlipBook {
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn is_during_manual_flip(&self) -> bool {
        matches!(self.gesture, Gesture::Manual(_))
    }

    pub fn is_during_auto_flip(&self) -> bool {
        matches!(self.gesture, Gesture::Auto(_))
    }

    /// Pointer pressed on the book
    pub fn on_drag_start(&mut self, event: &PointerEvent) {
        if !event.is_primary || self.layout.is_none() {
            return;
        }
        if self.is_during_manual_flip() {
            return;
        }
        self.pending_leaf = None;
        self.settle_auto_flip();
        self.gesture = Gesture::Manual(ManualFlip::new(event.x, self.clock.now()));
    }

    pub fn on_drag_update(&mut self, event: &PointerEvent) {
        if !event.is_primary {
            return;
        }
        let Gesture::Manual(mut flip) = self.gesture else {
            return;
        };
        let Some(width) = self.spread_width() else {
            return;
        };
        flip.track(event.x, self.clock.now());

        let delta = self.direction().forward_delta(flip.starting_x, event.x);
        if delta != 0.0 && delta.abs() <= width {
            if flip.leaf.is_none() {
                let direction = FlipDirection::from_delta(delta);
                if let Some(leaf) = self.available_leaf(direction) {
                    tracing::debug!("Drag locked on leaf {} {:?}", leaf, direction);
                    flip.direction = direction;
                    flip.leaf = Some(leaf);
                    self.notify_flipping(leaf, direction);
                }
            }
            if let Some(leaf) = flip.leaf {
                // Moving back past the start pins the leaf to its resting side
                let position = match flip.direction {
                    FlipDirection::Forward => 2.0 * delta.max(0.0) / width,
                    _ => 2.0 + 2.0 * delta.min(0.0) / width,
                };
                self.leaves[leaf].set_flip_position(position);
            }
        }
        self.gesture = Gesture::Manual(flip);
    }

    /// Pointer released: settle the dragged leaf
    pub fn on_drag_end(&mut self, event: &PointerEvent) {
        if !event.is_primary {
            return;
        }
        let Gesture::Manual(mut flip) = self.gesture else {
            return;
        };
        self.gesture = Gesture::Idle;
        let (Some(leaf), Some(width)) = (flip.leaf, self.spread_width()) else {
            return;
        };
        // A release at the last position would zero the fling speed
        if event.x != flip.last_x {
            flip.track(event.x, self.clock.now());
        }

        let position = self.leaves[leaf].flip_position().value();
        let forward_speed = if self.direction().is_ltr() {
            -flip.velocity_x
        } else {
            flip.velocity_x
        };
        let threshold = self.options.fast_swipe_threshold;
        let target = match flip.direction {
            FlipDirection::Forward if forward_speed > threshold || position >= 1.0 => {
                FlipPosition::TURNED
            }
            FlipDirection::Forward => FlipPosition::FLAT,
            FlipDirection::Backward if -forward_speed > threshold || position <= 1.0 => {
                FlipPosition::FLAT
            }
            FlipDirection::Backward => FlipPosition::TURNED,
            FlipDirection::None => return,
        };

        let velocity = release_velocity(flip.velocity_x, width);
        tracing::debug!(
            "Drag released at {:.2}, settling leaf {} to {:?} at {} deg/s",
            position,
            leaf,
            target,
            velocity
        );
        // Observed through turn reports, not the completion
        let _ = self.start_auto_flip(leaf, flip.direction, target, velocity);
    }

    /// Animate a leaf to rest.
    ///
    /// A leaf that snaps to its target produces no turn report, so the
    /// bookkeeping runs here instead.
    pub(crate) fn start_auto_flip(
        &mut self,
        leaf: usize,
        direction: FlipDirection,
        target: FlipPosition,
        velocity: DegreesPerSecond,
    ) -> Completion {
        let completion = self.leaves[leaf].efficient_flip_to_position(target.value(), velocity);
        if self.leaves[leaf].target().is_some() {
            self.gesture = Gesture::Auto(AutoFlip {
                leaf,
                direction,
                target,
            });
        } else {
            self.gesture = Gesture::Idle;
            self.on_turned(leaf, resting_direction(target));
        }
        completion
    }

    /// Finish an in-flight auto flip instantly
    pub(crate) fn settle_auto_flip(&mut self) {
        let Gesture::Auto(flip) = self.gesture else {
            return;
        };
        self.gesture = Gesture::Idle;
        self.leaves[flip.leaf].set_flip_position(flip.target.value());
        self.on_turned(flip.leaf, resting_direction(flip.target));
    }

    pub(crate) fn spread_width(&self) -> Option<f32> {
        self.layout.as_ref().map(|layout| layout.spread_width())
    }
}

/// Turn direction reported by a leaf resting at `position`
fn resting_direction(position: FlipPosition) -> FlipDirection {
    if position == FlipPosition::TURNED {
        FlipDirection::Forward
    } else {
        FlipDirection::Backward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_velocity_clamped() {
        assert_eq!(release_velocity(0.0, 800.0), 225);
        assert_eq!(release_velocity(-2000.0, 800.0), 450);
        assert_eq!(release_velocity(50_000.0, 800.0), 1800);
    }

    #[test]
    fn test_track_velocity() {
        let mut flip = ManualFlip::new(100.0, Duration::ZERO);
        flip.track(80.0, Duration::from_millis(100));
        assert!((flip.velocity_x + 200.0).abs() < 1e-3);

        // Same timestamp keeps the previous estimate
        flip.track(70.0, Duration::from_millis(100));
        assert!((flip.velocity_x + 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_phase_and_direction() {
        let gesture = Gesture::Auto(AutoFlip {
            leaf: 1,
            direction: FlipDirection::Backward,
            target: FlipPosition::FLAT,
        });
        assert_eq!(gesture.phase(), GesturePhase::Auto);
        assert_eq!(gesture.direction(), FlipDirection::Backward);
        assert_eq!(Gesture::Idle.direction(), FlipDirection::None);
    }
}
