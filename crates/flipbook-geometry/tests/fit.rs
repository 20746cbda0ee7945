//! Aspect-ratio fitting tests
//!
//! Bounding boxes against square, wide and tall targets.

use flipbook_geometry::{AspectRatio, GeometryError, Size, aspect_ratio_fit};

fn size(width: f32, height: f32) -> Size {
    Size::new(width, height).unwrap()
}

fn ratio(width: f32, height: f32) -> AspectRatio {
    AspectRatio::new(width, height).unwrap()
}

fn assert_size(actual: Size, width: f32, height: f32) {
    assert!(
        (actual.width() - width).abs() < 1e-3 && (actual.height() - height).abs() < 1e-3,
        "expected {}x{}, got {}",
        width,
        height,
        actual
    );
}

// ============================================================================
// FIT TESTS
// ============================================================================

#[test]
fn test_square_in_wide_box_is_height_limited() {
    assert_size(aspect_ratio_fit(&size(800.0, 400.0), &ratio(1.0, 1.0)), 400.0, 400.0);
}

#[test]
fn test_square_in_tall_box_is_width_limited() {
    assert_size(aspect_ratio_fit(&size(400.0, 800.0), &ratio(1.0, 1.0)), 400.0, 400.0);
}

#[test]
fn test_matching_ratio_fills_box() {
    assert_size(aspect_ratio_fit(&size(800.0, 400.0), &ratio(2.0, 1.0)), 800.0, 400.0);
}

#[test]
fn test_fit_equals_constructed_size() {
    assert_eq!(aspect_ratio_fit(&size(800.0, 400.0), &ratio(1.0, 1.0)), size(400.0, 400.0));
    assert_eq!(aspect_ratio_fit(&size(400.0, 800.0), &ratio(1.0, 1.0)), size(400.0, 400.0));
    assert_eq!(aspect_ratio_fit(&size(800.0, 400.0), &ratio(2.0, 1.0)), size(800.0, 400.0));
    // Ratios compare by proportion
    assert_eq!(
        aspect_ratio_fit(&size(800.0, 400.0), &ratio(4.0, 4.0)).aspect_ratio(),
        ratio(1.0, 1.0)
    );
}

#[test]
fn test_fit_never_exceeds_bounds() {
    let bounding = size(1024.0, 768.0);
    for (w, h) in [(2.0, 3.0), (2.15, 3.15), (16.0, 9.0), (1.0, 10.0), (10.0, 1.0)] {
        let fitted = bounding.aspect_ratio_fit(&ratio(w, h));
        assert!(fitted.width() <= bounding.width() + 1e-3);
        assert!(fitted.height() <= bounding.height() + 1e-3);
        // One side always touches the bounding box
        let touches = (fitted.width() - bounding.width()).abs() < 1e-3
            || (fitted.height() - bounding.height()).abs() < 1e-3;
        assert!(touches, "{} does not touch {}", fitted, bounding);
    }
}

// ============================================================================
// CONSTRUCTION TESTS
// ============================================================================

#[test]
fn test_zero_size_rejected() {
    assert_eq!(
        Size::new(0.0, 100.0),
        Err(GeometryError::NonPositive { width: 0.0, height: 100.0 })
    );
}

#[test]
fn test_size_carries_aspect_ratio() {
    let s = size(300.0, 150.0);
    assert!((s.aspect_ratio().value() - 2.0).abs() < 1e-6);
}

#[test]
fn test_deserialize_validates() {
    let ok: AspectRatio = serde_json::from_str(r#"{"width": 2, "height": 3}"#).unwrap();
    assert_eq!(ok, ratio(2.0, 3.0));

    let bad = serde_json::from_str::<AspectRatio>(r#"{"width": 0, "height": 3}"#);
    assert!(bad.is_err());

    let s: Size = serde_json::from_str(r#"{"width": 640, "height": 480}"#).unwrap();
    assert_eq!(s.to_string(), "640x480");
}
