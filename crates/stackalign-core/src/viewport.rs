//! Viewport pan/zoom transform.
//!
//! The viewport is a uniform display transform applied to every layer; it is
//! never part of exported data. Converts between screen coordinates (what
//! the pointer reports) and world coordinates (what layers are stored in).

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in screen pixels.
    pub pan: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-screen affine transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Screen-to-world affine transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.pan)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Map a world-space rectangle to screen space. The transform is a
    /// uniform positive scale plus translation, so the result is exact.
    pub fn world_rect_to_screen(&self, rect: Rect) -> Rect {
        self.transform().transform_rect_bbox(rect)
    }

    /// Pan by a screen-space delta, 1:1 regardless of zoom.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Adjust pan so world_point stays under the cursor.
        let new_screen = self.world_to_screen(world_point);
        self.pan += Vec2::new(
            screen_point.x - new_screen.x,
            screen_point.y - new_screen.y,
        );
    }

    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let viewport = Viewport::new();
        let screen = Point::new(100.0, 200.0);
        assert_eq!(viewport.screen_to_world(screen), screen);
    }

    #[test]
    fn test_round_trip_with_pan_and_zoom() {
        let mut viewport = Viewport::new();
        viewport.pan = Vec2::new(30.0, -20.0);
        viewport.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let world = viewport.screen_to_world(original);
        let back = viewport.world_to_screen(world);
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut viewport = Viewport::new();
        let anchor = Point::new(400.0, 300.0);
        let world_before = viewport.screen_to_world(anchor);

        viewport.zoom_at(anchor, 2.0);
        let world_after = viewport.screen_to_world(anchor);
        assert!((world_before.x - world_after.x).abs() < 1e-9);
        assert!((world_before.y - world_after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new();
        viewport.zoom_at(Point::ZERO, 0.001);
        assert!((viewport.zoom - viewport.min_zoom).abs() < f64::EPSILON);

        viewport.zoom = 1.0;
        viewport.zoom_at(Point::ZERO, 1000.0);
        assert!((viewport.zoom - viewport.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_world_rect_to_screen() {
        let mut viewport = Viewport::new();
        viewport.zoom = 2.0;
        viewport.pan = Vec2::new(10.0, 20.0);

        let screen = viewport.world_rect_to_screen(Rect::new(0.0, 0.0, 50.0, 25.0));
        assert_eq!(screen, Rect::new(10.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn test_pan_is_screen_space() {
        let mut viewport = Viewport::new();
        viewport.zoom = 4.0;
        viewport.pan_by(Vec2::new(10.0, 20.0));
        // The pan delta is not divided by zoom.
        assert_eq!(viewport.pan, Vec2::new(10.0, 20.0));
    }
}
