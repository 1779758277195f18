//! Drag-resize modeled as an explicit state machine.
//!
//! One machine instance lives for the whole editing surface; gestures move
//! it Idle → Dragging → Idle instead of registering per-gesture pointer
//! handlers. During a drag it only accumulates a live `(width, height)`
//! pair for visual feedback; the text mutator runs once, on release, with
//! the final values. Pointer-move coalescing (e.g. one update per frame)
//! is the caller's event loop concern.

/// Minimum rendered image width in pixels.
pub const MIN_WIDTH: u32 = 80;
/// Maximum rendered image width in pixels.
pub const MAX_WIDTH: u32 = 1000;

/// Corner-handle drag state for one image.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeDrag {
    Idle,
    Dragging {
        /// Width when the drag started.
        start_width: u32,
        /// Aspect ratio (height / width) captured at drag start. Height is
        /// derived from this fixed ratio, not recomputed from intermediate
        /// re-renders, which would feed back into itself.
        aspect: f64,
        /// Latest live dimensions for visual feedback.
        live: (u32, u32),
        /// Whether any pointer movement happened.
        moved: bool,
    },
}

impl ResizeDrag {
    pub fn new() -> Self {
        ResizeDrag::Idle
    }

    /// Enters the Dragging state, capturing the image's current dimensions.
    ///
    /// `width`/`height` are the explicit stored dimensions if present,
    /// otherwise the natural dimensions the renderer measured.
    pub fn begin(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        *self = ResizeDrag::Dragging {
            start_width: width,
            aspect: f64::from(height.max(1)) / f64::from(width),
            live: (width, height.max(1)),
            moved: false,
        };
    }

    /// Applies a horizontal pointer delta, returning the new live pair.
    ///
    /// Width is clamped to `[MIN_WIDTH, MAX_WIDTH]`; height follows the
    /// captured aspect ratio. Returns `None` when not dragging.
    pub fn update(&mut self, delta_x: i32) -> Option<(u32, u32)> {
        let ResizeDrag::Dragging {
            start_width,
            aspect,
            live,
            moved,
        } = self
        else {
            return None;
        };

        let target = i64::from(*start_width) + i64::from(delta_x);
        let width = target.clamp(i64::from(MIN_WIDTH), i64::from(MAX_WIDTH)) as u32;
        let height = ((f64::from(width) * *aspect).round() as u32).max(1);
        *live = (width, height);
        if delta_x != 0 {
            *moved = true;
        }
        Some(*live)
    }

    /// Leaves the Dragging state.
    ///
    /// Returns the final dimensions to persist, or `None` if the drag
    /// never moved (a released-without-moving gesture is a no-op).
    pub fn release(&mut self) -> Option<(u32, u32)> {
        let result = match self {
            ResizeDrag::Dragging { live, moved, .. } if *moved => Some(*live),
            _ => None,
        };
        *self = ResizeDrag::Idle;
        result
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, ResizeDrag::Dragging { .. })
    }
}

impl Default for ResizeDrag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_widens_and_keeps_aspect() {
        let mut drag = ResizeDrag::new();
        drag.begin(400, 200);
        let (w, h) = drag.update(100).unwrap();
        assert_eq!((w, h), (500, 250));
        assert_eq!(drag.release(), Some((500, 250)));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn width_clamped_to_bounds() {
        let mut drag = ResizeDrag::new();
        drag.begin(400, 400);
        assert_eq!(drag.update(-1000).unwrap().0, MIN_WIDTH);
        assert_eq!(drag.update(5000).unwrap().0, MAX_WIDTH);
    }

    #[test]
    fn aspect_fixed_at_drag_start() {
        let mut drag = ResizeDrag::new();
        drag.begin(200, 100);
        // Successive updates derive height from the start ratio, not from
        // the previous live pair.
        assert_eq!(drag.update(200).unwrap(), (400, 200));
        assert_eq!(drag.update(-100).unwrap(), (100, 50));
    }

    #[test]
    fn release_without_movement_is_noop() {
        let mut drag = ResizeDrag::new();
        drag.begin(300, 300);
        assert_eq!(drag.release(), None);

        drag.begin(300, 300);
        drag.update(0);
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn update_outside_drag_returns_none() {
        let mut drag = ResizeDrag::new();
        assert_eq!(drag.update(50), None);
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn zero_dimensions_do_not_panic() {
        let mut drag = ResizeDrag::new();
        drag.begin(0, 0);
        let (w, h) = drag.update(10).unwrap();
        assert!(w >= MIN_WIDTH.min(11));
        assert!(h >= 1);
    }
}
