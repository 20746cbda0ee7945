//! Size and aspect-ratio fitting

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AspectRatio, GeometryError, check_dimensions};

/// A width/height pair with its derived aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Extent", into = "Extent")]
pub struct Size {
    width: f32,
    height: f32,
    aspect_ratio: AspectRatio,
}

#[derive(Serialize, Deserialize)]
struct Extent {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            aspect_ratio: AspectRatio::new(width, height)?,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Largest size with the `target` ratio that fits inside this box
    pub fn aspect_ratio_fit(&self, target: &AspectRatio) -> Size {
        let target_value = target.value();
        let (width, height) = if self.aspect_ratio.value() > target_value {
            // Relatively wider than the target: height is the limit
            (self.height * target_value, self.height)
        } else {
            (self.width, self.width / target_value)
        };
        Size {
            width,
            height,
            aspect_ratio: AspectRatio::from_dimensions(width, height),
        }
    }
}

/// Free-function form of [`Size::aspect_ratio_fit`]
pub fn aspect_ratio_fit(bounding: &Size, target: &AspectRatio) -> Size {
    bounding.aspect_ratio_fit(target)
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl TryFrom<Extent> for Size {
    type Error = GeometryError;

    fn try_from(raw: Extent) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl From<Size> for Extent {
    fn from(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Size::new(800.0, 600.0).unwrap().to_string(), "800x600");
    }

    #[test]
    fn test_fit_keeps_target_ratio() {
        let bounding = Size::new(500.0, 500.0).unwrap();
        let target = AspectRatio::new(2.0, 3.0).unwrap();
        let fitted = bounding.aspect_ratio_fit(&target);
        assert!(fitted.aspect_ratio().same_proportion(&target));
        assert!((fitted.height() - 500.0).abs() < 1e-3);
        assert!((fitted.width() - 500.0 * 2.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_fitted_ratio_derived_from_dimensions() {
        let bounding = Size::new(800.0, 400.0).unwrap();
        let fitted = bounding.aspect_ratio_fit(&AspectRatio::new(1.0, 1.0).unwrap());
        assert_eq!(fitted.aspect_ratio().width(), 400.0);
        assert_eq!(fitted.aspect_ratio().height(), 400.0);
    }
}
