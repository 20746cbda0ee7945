//! Pointer and touch input
//!
//! Drag gestures arrive as pointer events from the host. Touch events are
//! only consulted to decide whether a horizontal swipe should suppress
//! native scrolling.

/// Pointer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u64,
    pub pointer_type: PointerType,
    pub x: f32,
    pub y: f32,
    /// Only the primary pointer drives a drag
    pub is_primary: bool,
}

impl PointerEvent {
    /// Primary mouse pointer at a position
    pub fn primary(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_pointer(mut self, pointer_id: u64, pointer_type: PointerType) -> Self {
        self.pointer_id = pointer_id;
        self.pointer_type = pointer_type;
        self
    }

    /// Mark as a secondary pointer, e.g. the second finger of a pinch
    pub fn secondary(mut self) -> Self {
        self.is_primary = false;
        self
    }
}

impl Default for PointerEvent {
    fn default() -> Self {
        Self {
            pointer_id: 0,
            pointer_type: PointerType::Mouse,
            x: 0.0,
            y: 0.0,
            is_primary: true,
        }
    }
}

/// A single touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub identifier: u64,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(identifier: u64, x: f32, y: f32) -> Self {
        Self { identifier, x, y }
    }
}

/// Tracks a single-finger touch to decide scroll suppression
#[derive(Debug, Default)]
pub struct TouchTracker {
    start: Option<(f32, f32)>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a touch; multi-touch is ignored
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        if let [touch] = touches {
            self.start = Some((touch.x, touch.y));
        }
    }

    /// True when the move is mostly horizontal and native scroll should be
    /// prevented
    pub fn should_prevent_scroll(&self, touches: &[TouchPoint]) -> bool {
        let ([touch], Some((start_x, start_y))) = (touches, self.start) else {
            return false;
        };
        (touch.x - start_x).abs() > (touch.y - start_y).abs()
    }

    pub fn reset(&mut self) {
        self.start = None;
    }
}
