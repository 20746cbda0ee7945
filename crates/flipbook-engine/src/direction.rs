//! Flip and reading directions

use serde::{Deserialize, Serialize};

/// Logical page-advance direction of a turn.
///
/// Independent of the physical left/right of the gesture: `Forward`
/// always increases the page index, whatever the reading direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlipDirection {
    Forward,
    Backward,
    /// No active gesture
    #[default]
    None,
}

impl FlipDirection {
    /// Direction implied by the sign of a signed delta
    pub fn from_delta(delta: f32) -> Self {
        if delta > 0.0 {
            Self::Forward
        } else if delta < 0.0 {
            Self::Backward
        } else {
            Self::None
        }
    }
}

/// Reading direction of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingDirection {
    #[default]
    Ltr,
    Rtl,
}

impl ReadingDirection {
    pub fn is_ltr(self) -> bool {
        self == Self::Ltr
    }

    /// Pointer displacement projected on the reading axis. Positive when the
    /// pointer moved against the reading direction, i.e. pulled the next
    /// page over the spine.
    pub fn forward_delta(self, starting_x: f32, current_x: f32) -> f32 {
        match self {
            Self::Ltr => starting_x - current_x,
            Self::Rtl => current_x - starting_x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delta() {
        assert_eq!(FlipDirection::from_delta(3.0), FlipDirection::Forward);
        assert_eq!(FlipDirection::from_delta(-0.5), FlipDirection::Backward);
        assert_eq!(FlipDirection::from_delta(0.0), FlipDirection::None);
    }

    #[test]
    fn test_forward_delta_mirrors_under_rtl() {
        // Pointer moved 100px to the left
        assert_eq!(ReadingDirection::Ltr.forward_delta(500.0, 400.0), 100.0);
        assert_eq!(ReadingDirection::Rtl.forward_delta(500.0, 400.0), -100.0);
    }

    #[test]
    fn test_serde_lowercase() {
        let dir: ReadingDirection = serde_json::from_str("\"rtl\"").unwrap();
        assert_eq!(dir, ReadingDirection::Rtl);
        assert_eq!(serde_json::to_string(&ReadingDirection::Ltr).unwrap(), "\"ltr\"");
    }
}
