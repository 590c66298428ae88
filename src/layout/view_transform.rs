//! Zoom/pan state for the canvas + ruler surface.
//!
//! The ruler overlay and the canvas are siblings inside one container, and
//! this transform is applied to that container only: translate(pan) then
//! scale(zoom), origin at the top-left. The canvas keeps an identity
//! transform of its own, so scale is never applied twice and ruler ticks stay
//! aligned with canvas content.
//!
//! Wheel input is coalesced: [`ViewTransform::wheel`] only accumulates, and
//! [`ViewTransform::apply_frame`] folds the accumulated deltas into the state
//! once per animation frame.

use serde::Serialize;

use crate::config::EditorConfig;

/// A point in surface (screen) coordinates, relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Current zoom/pan, as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub zoom: f64,
    pub pan: Point,
}

impl ViewSnapshot {
    /// CSS `transform` value for the shared ruler + canvas container.
    /// Pair it with `transform-origin: 0 0`.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.zoom
        )
    }
}

/// Wheel deltas collected since the last frame.
#[derive(Debug, Clone, Copy, Default)]
struct PendingWheel {
    pan_dx: f64,
    pan_dy: f64,
    zoom_delta: f64,
    pointer: Point,
}

#[derive(Debug, Clone)]
pub struct ViewTransform {
    zoom: f64,
    pan: Point,
    zoom_min: f64,
    zoom_max: f64,
    zoom_base: f64,
    fine_factor: f64,
    pending: PendingWheel,
    frame_pending: bool,
    ruler_drag: Option<Point>,
}

impl ViewTransform {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ORIGIN,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            zoom_base: config.zoom_base,
            fine_factor: config.fine_pan_factor,
            pending: PendingWheel::default(),
            frame_pending: false,
            ruler_drag: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            zoom: self.zoom,
            pan: self.pan,
        }
    }

    /// True while an animation-frame update is scheduled.
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Record a wheel event. Plain wheel pans; with the zoom modifier held the
    /// vertical delta zooms around `pointer`.
    ///
    /// Returns true if the caller must schedule an animation frame; false
    /// when one is already pending.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64, pointer: Point, zoom_modifier: bool) -> bool {
        if zoom_modifier {
            self.pending.zoom_delta += delta_y;
        } else {
            self.pending.pan_dx += delta_x;
            self.pending.pan_dy += delta_y;
        }
        self.pending.pointer = pointer;
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Apply the accumulated wheel deltas. Returns true if zoom or pan changed.
    pub fn apply_frame(&mut self) -> bool {
        self.frame_pending = false;
        let pending = std::mem::take(&mut self.pending);
        let before = self.snapshot();

        if pending.zoom_delta.abs() > f64::EPSILON {
            let new_zoom = self.clamp_zoom(self.zoom * self.zoom_base.powf(pending.zoom_delta));
            self.zoom_about(pending.pointer, new_zoom);
        }
        if pending.pan_dx.abs() > f64::EPSILON || pending.pan_dy.abs() > f64::EPSILON {
            self.pan.x -= pending.pan_dx;
            self.pan.y -= pending.pan_dy;
        }
        self.snapshot() != before
    }

    /// Set the zoom while keeping the content under `pointer` fixed.
    pub fn zoom_about(&mut self, pointer: Point, zoom: f64) {
        let new_zoom = self.clamp_zoom(zoom);
        let ratio = new_zoom / self.zoom;
        self.pan = Point::new(
            pointer.x - (pointer.x - self.pan.x) * ratio,
            pointer.y - (pointer.y - self.pan.y) * ratio,
        );
        self.zoom = new_zoom;
    }

    /// Pointer-down on the ruler.
    pub fn begin_ruler_drag(&mut self, pointer: Point) {
        self.ruler_drag = Some(pointer);
    }

    /// Pointer-move while dragging the ruler: pans 1:1, or by the fine factor
    /// with the fine-adjust modifier held. Returns true if pan changed.
    pub fn drag_ruler(&mut self, pointer: Point, fine: bool) -> bool {
        let Some(last) = self.ruler_drag else {
            return false;
        };
        let factor = if fine { self.fine_factor } else { 1.0 };
        let dx = (pointer.x - last.x) * factor;
        let dy = (pointer.y - last.y) * factor;
        self.ruler_drag = Some(pointer);
        if dx.abs() <= f64::EPSILON && dy.abs() <= f64::EPSILON {
            return false;
        }
        self.pan.x += dx;
        self.pan.y += dy;
        true
    }

    /// Pointer-up. Returns true if a ruler drag was in progress.
    pub fn end_ruler_drag(&mut self) -> bool {
        self.ruler_drag.take().is_some()
    }

    pub fn is_dragging_ruler(&self) -> bool {
        self.ruler_drag.is_some()
    }

    /// Reset to zoom 1.0 and pan at the origin, dropping pending wheel input.
    pub fn fit(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::ORIGIN;
        self.pending = PendingWheel::default();
    }

    /// Surface coordinates to content coordinates
    pub fn to_content(&self, p: Point) -> Point {
        Point::new((p.x - self.pan.x) / self.zoom, (p.y - self.pan.y) / self.zoom)
    }

    /// Content coordinates to surface coordinates
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.pan.x, p.y * self.zoom + self.pan.y)
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            zoom.clamp(self.zoom_min, self.zoom_max)
        } else {
            self.zoom
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_wheel_coalesces_until_frame() {
        let mut view = ViewTransform::default();
        assert!(view.wheel(0.0, 10.0, Point::ORIGIN, false));
        assert!(!view.wheel(5.0, 10.0, Point::ORIGIN, false));
        assert!(view.frame_pending());
        // Nothing applied yet
        assert_eq!(view.pan(), Point::ORIGIN);

        assert!(view.apply_frame());
        assert_eq!(view.pan(), Point::new(-5.0, -20.0));
        assert!(!view.frame_pending());
        // Accumulators were reset
        assert!(!view.apply_frame());
    }

    #[test]
    fn test_zoom_keeps_pointer_fixed() {
        let mut view = ViewTransform::default();
        view.wheel(0.0, 40.0, Point::ORIGIN, false);
        view.apply_frame();

        let pointer = Point::new(300.0, 200.0);
        let under_pointer = view.to_content(pointer);
        view.wheel(0.0, -500.0, pointer, true);
        view.apply_frame();

        assert!(approx(view.zoom(), 0.999_f64.powf(-500.0)));
        let after = view.to_content(pointer);
        assert!(approx(after.x, under_pointer.x));
        assert!(approx(after.y, under_pointer.y));
    }

    #[test]
    fn test_zoom_stays_clamped() {
        let mut view = ViewTransform::default();
        for _ in 0..20 {
            view.wheel(0.0, -5000.0, Point::new(10.0, 10.0), true);
            view.apply_frame();
            assert!(view.zoom() <= 5.0);
        }
        assert_eq!(view.zoom(), 5.0);
        for _ in 0..40 {
            view.wheel(0.0, 5000.0, Point::new(10.0, 10.0), true);
            view.apply_frame();
            assert!(view.zoom() >= 0.1);
        }
        assert_eq!(view.zoom(), 0.1);
    }

    #[test]
    fn test_ruler_drag_and_fine_adjust() {
        let mut view = ViewTransform::default();
        view.begin_ruler_drag(Point::new(100.0, 100.0));
        assert!(view.drag_ruler(Point::new(130.0, 90.0), false));
        assert_eq!(view.pan(), Point::new(30.0, -10.0));
        assert!(view.drag_ruler(Point::new(230.0, 90.0), true));
        assert!(approx(view.pan().x, 40.0));
        assert!(view.end_ruler_drag());
        assert!(!view.drag_ruler(Point::new(0.0, 0.0), false));
    }

    #[test]
    fn test_fit_resets() {
        let mut view = ViewTransform::default();
        view.zoom_about(Point::new(50.0, 50.0), 2.5);
        view.fit();
        assert_eq!(view.zoom(), 1.0);
        assert_eq!(view.pan(), Point::ORIGIN);
    }

    #[test]
    fn test_css_transform_order() {
        let mut view = ViewTransform::default();
        view.begin_ruler_drag(Point::ORIGIN);
        view.drag_ruler(Point::new(12.0, -4.0), false);
        view.zoom_about(Point::new(12.0, -4.0), 2.0);
        assert_eq!(view.snapshot().css_transform(), "translate(12px, -4px) scale(2)");
    }
}
