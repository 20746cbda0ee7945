//! flipbook geometry
//!
//! Value types for sizing book leaves: an [`AspectRatio`], a bounding
//! [`Size`], and the fit that finds the largest rectangle of a given
//! ratio inside a bounding box.

mod aspect_ratio;
mod size;

pub use aspect_ratio::AspectRatio;
pub use size::{Size, aspect_ratio_fit};

/// Geometry construction error
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Dimensions must be finite and positive, got {width}x{height}")]
    NonPositive { width: f32, height: f32 },
}

/// Both dimensions finite and strictly positive
pub(crate) fn check_dimensions(width: f32, height: f32) -> Result<(), GeometryError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { width, height })
    }
}
