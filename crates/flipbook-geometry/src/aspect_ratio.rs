//! Aspect ratio

use serde::{Deserialize, Serialize};

use crate::{GeometryError, check_dimensions};

/// Width-to-height proportion of a page or box.
///
/// Immutable once built; both components are guaranteed positive, so
/// [`AspectRatio::value`] never divides by zero. Equality compares the
/// proportion, so 2:3 equals 4:6.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Dimensions", into = "Dimensions")]
pub struct AspectRatio {
    width: f32,
    height: f32,
}

/// Wire form of an aspect ratio, validated on the way in
#[derive(Serialize, Deserialize)]
struct Dimensions {
    width: f32,
    height: f32,
}

impl AspectRatio {
    /// Create an aspect ratio from raw dimensions
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        check_dimensions(width, height)?;
        Ok(Self { width, height })
    }

    /// Const constructor for built-in ratios; panics on invalid dimensions
    pub const fn new_const(width: f32, height: f32) -> Self {
        assert!(width > 0.0 && height > 0.0, "aspect ratio dimensions must be positive");
        Self { width, height }
    }

    /// Ratio of dimensions already known to be positive
    pub(crate) fn from_dimensions(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// `width / height`
    pub fn value(&self) -> f32 {
        self.width / self.height
    }

    /// Whether two ratios describe the same proportion, whatever their scale
    pub fn same_proportion(&self, other: &AspectRatio) -> bool {
        (self.value() - other.value()).abs() <= f32::EPSILON * self.value().max(1.0)
    }
}

impl PartialEq for AspectRatio {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl TryFrom<Dimensions> for AspectRatio {
    type Error = GeometryError;

    fn try_from(raw: Dimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl From<AspectRatio> for Dimensions {
    fn from(ratio: AspectRatio) -> Self {
        Self {
            width: ratio.width,
            height: ratio.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value() {
        let ratio = AspectRatio::new(2.0, 3.0).unwrap();
        assert!((ratio.value() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(AspectRatio::new(0.0, 3.0).is_err());
        assert!(AspectRatio::new(2.0, -1.0).is_err());
        assert!(AspectRatio::new(f32::NAN, 1.0).is_err());
        assert!(AspectRatio::new(f32::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_same_proportion() {
        let a = AspectRatio::new(2.0, 3.0).unwrap();
        let b = AspectRatio::new(4.0, 6.0).unwrap();
        assert!(a.same_proportion(&b));
        assert!(!a.same_proportion(&AspectRatio::new(2.15, 3.15).unwrap()));
    }

    #[test]
    fn test_equality_by_value() {
        let a = AspectRatio::new(2.0, 3.0).unwrap();
        assert_eq!(a, AspectRatio::new(4.0, 6.0).unwrap());
        assert_eq!(a, AspectRatio::new_const(2.0, 3.0));
        assert_ne!(a, AspectRatio::new(2.15, 3.15).unwrap());
    }
}
