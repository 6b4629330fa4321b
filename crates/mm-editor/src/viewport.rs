//! Camera: zoom and pan over the layout plane.
//!
//! Layout space has the root at the origin. With zoom `z` and pan `p`, a
//! layout point `l` is drawn at `center + p + z·l`, where `center` is the
//! middle of the viewport.

use kurbo::{Affine, Point, Vec2};
use mm_core::layout::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub pan: Vec2,
    /// Lock toggle: no zoom, pan or drag.
    pub locked: bool,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.4, 2.5)
    }
}

fn center(viewport: Viewport) -> Vec2 {
    Vec2::new(viewport.width / 2.0, viewport.height / 2.0)
}

impl Camera {
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            locked: false,
            min_zoom,
            max_zoom,
        }
    }

    /// Layout → screen transform.
    pub fn transform(&self, viewport: Viewport) -> Affine {
        Affine::translate(center(viewport) + self.pan) * Affine::scale(self.zoom)
    }

    pub fn screen_to_layout(&self, screen: Point, viewport: Viewport) -> Point {
        let v = screen.to_vec2() - center(viewport) - self.pan;
        (v / self.zoom).to_point()
    }

    pub fn layout_to_screen(&self, layout: Point, viewport: Viewport) -> Point {
        (layout.to_vec2() * self.zoom + center(viewport) + self.pan).to_point()
    }

    /// Scale by `factor` keeping the layout point under `anchor` fixed.
    /// Returns `false` when locked or already at the bound.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64, viewport: Viewport) -> bool {
        if self.locked {
            return false;
        }
        let next = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if next == self.zoom {
            return false;
        }
        let fixed = self.screen_to_layout(anchor, viewport);
        self.zoom = next;
        self.pan = anchor.to_vec2() - center(viewport) - fixed.to_vec2() * next;
        true
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if self.locked {
            return false;
        }
        self.pan += delta;
        true
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn origin_maps_to_center() {
        let cam = Camera::default();
        assert!(close(
            cam.layout_to_screen(Point::ORIGIN, VIEWPORT),
            Point::new(400.0, 300.0)
        ));
        assert!(close(
            cam.transform(VIEWPORT) * Point::new(10.0, 0.0),
            Point::new(410.0, 300.0)
        ));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut cam = Camera::default();
        let anchor = Point::new(520.0, 180.0);
        let before = cam.screen_to_layout(anchor, VIEWPORT);
        assert!(cam.zoom_at(anchor, 1.5, VIEWPORT));
        let after = cam.screen_to_layout(anchor, VIEWPORT);
        assert!(close(before, after));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();
        for _ in 0..50 {
            cam.zoom_at(Point::new(400.0, 300.0), 1.1, VIEWPORT);
        }
        assert_eq!(cam.zoom, 2.5);
        assert!(!cam.zoom_at(Point::new(400.0, 300.0), 1.1, VIEWPORT));
        for _ in 0..50 {
            cam.zoom_at(Point::new(400.0, 300.0), 0.5, VIEWPORT);
        }
        assert_eq!(cam.zoom, 0.4);
    }

    #[test]
    fn lock_blocks_zoom_and_pan() {
        let mut cam = Camera::default();
        cam.locked = true;
        assert!(!cam.zoom_at(Point::new(0.0, 0.0), 2.0, VIEWPORT));
        assert!(!cam.pan_by(Vec2::new(5.0, 5.0)));
        assert_eq!(cam.zoom, 1.0);
        assert_eq!(cam.pan, Vec2::ZERO);
    }

    #[test]
    fn roundtrip_through_pan_and_zoom() {
        let mut cam = Camera::default();
        cam.pan_by(Vec2::new(-30.0, 12.0));
        cam.zoom_at(Point::new(100.0, 100.0), 2.0, VIEWPORT);
        let p = Point::new(-42.0, 17.5);
        let back = cam.screen_to_layout(cam.layout_to_screen(p, VIEWPORT), VIEWPORT);
        assert!(close(p, back));
    }
}
