//! Rotated bounding-box math.
//!
//! These functions reproduce the bounding-box formula of the downstream
//! affine-warp routine, so the positions we export line up with what the
//! warp computes on its side. Pure functions, no state; everything else in
//! the crate goes through here for derived geometry.

use kurbo::{Point, Size};

/// Angles within this many degrees of an orthogonal angle take the exact
/// closed-form branch instead of the trig formula, so a layer rotated to
/// 90 or 180 has drift-free dimensions.
pub const ANGLE_SNAP_EPSILON: f64 = 0.05;

fn sanitize_dimension(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn sanitize_scale(value: f64) -> f64 {
    if value.is_finite() { value } else { 1.0 }
}

/// Compute the axis-aligned bounding box of a `width x height` rectangle
/// scaled uniformly by `scale`, then rotated about its own center by
/// `rotation_degrees`.
///
/// Non-finite inputs are coerced (`scale` to 1, dimensions and rotation to
/// 0) so the result is never NaN.
pub fn bounding_box(width: f64, height: f64, rotation_degrees: f64, scale: f64) -> Size {
    let scale = sanitize_scale(scale);
    let scaled_w = sanitize_dimension(width) * scale;
    let scaled_h = sanitize_dimension(height) * scale;
    let rotation = if rotation_degrees.is_finite() {
        rotation_degrees
    } else {
        0.0
    };

    // The normalized angle only decides which branch we take; the trig
    // below uses the caller's original value so sign behavior is preserved
    // for out-of-range rotations.
    let normalized = rotation.rem_euclid(360.0);
    if normalized < ANGLE_SNAP_EPSILON
        || (normalized - 180.0).abs() < ANGLE_SNAP_EPSILON
        || (normalized - 360.0).abs() < ANGLE_SNAP_EPSILON
    {
        return Size::new(scaled_w, scaled_h);
    }
    if (normalized - 90.0).abs() < ANGLE_SNAP_EPSILON
        || (normalized - 270.0).abs() < ANGLE_SNAP_EPSILON
    {
        return Size::new(scaled_h, scaled_w);
    }

    let theta = rotation.to_radians();
    let sin = theta.sin().abs();
    let cos = theta.cos().abs();
    Size::new(scaled_h * sin + scaled_w * cos, scaled_h * cos + scaled_w * sin)
}

/// Compute the top-left anchor that keeps a layer's bounding-box center
/// fixed while its rotation and/or scale change.
///
/// `position` is the current bounding-box top-left; `width`/`height` are the
/// intrinsic image dimensions. Called on the property-update path only,
/// never while dragging (drags move the anchor directly).
#[allow(clippy::too_many_arguments)]
pub fn recenter_for_transform(
    position: Point,
    width: f64,
    height: f64,
    rotation: f64,
    scale: f64,
    new_rotation: f64,
    new_scale: f64,
) -> Point {
    let old = bounding_box(width, height, rotation, scale);
    let center = Point::new(
        position.x + old.width / 2.0,
        position.y + old.height / 2.0,
    );
    let new = bounding_box(width, height, new_rotation, new_scale);
    Point::new(center.x - new.width / 2.0, center.y - new.height / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthogonal_angles_are_exact() {
        // No trig on these branches, so equality must be exact.
        for &(rotation, swapped) in &[
            (0.0, false),
            (90.0, true),
            (180.0, false),
            (270.0, true),
            (360.0, false),
            (-90.0, true),
            (-180.0, false),
            (720.0, false),
        ] {
            let size = bounding_box(100.0, 50.0, rotation, 1.5);
            if swapped {
                assert_eq!(size, Size::new(75.0, 150.0), "rotation {rotation}");
            } else {
                assert_eq!(size, Size::new(150.0, 75.0), "rotation {rotation}");
            }
        }
    }

    #[test]
    fn test_warp_formula_conformance() {
        let theta = 37.0_f64.to_radians();
        let size = bounding_box(100.0, 50.0, 37.0, 1.0);
        assert!((size.width - (50.0 * theta.sin() + 100.0 * theta.cos())).abs() < 1e-6);
        assert!((size.height - (50.0 * theta.cos() + 100.0 * theta.sin())).abs() < 1e-6);
    }

    #[test]
    fn test_snap_window() {
        // 0.04 degrees off an orthogonal angle snaps, 0.06 does not.
        assert_eq!(bounding_box(100.0, 50.0, 90.04, 1.0), Size::new(50.0, 100.0));
        let loose = bounding_box(100.0, 50.0, 90.06, 1.0);
        assert!(loose.width > 50.0);
        assert!(loose.height < 100.0);
    }

    #[test]
    fn test_out_of_range_rotation_matches_normalized() {
        let a = bounding_box(100.0, 50.0, 37.0, 1.0);
        let b = bounding_box(100.0, 50.0, 397.0, 1.0);
        let c = bounding_box(100.0, 50.0, -37.0, 1.0);
        assert!((a.width - b.width).abs() < 1e-9);
        assert!((a.height - b.height).abs() < 1e-9);
        assert!((a.width - c.width).abs() < 1e-9);
        assert!((a.height - c.height).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_inputs_never_produce_nan() {
        // NaN width becomes 0, infinite scale becomes 1.
        let theta = 37.0_f64.to_radians();
        let size = bounding_box(f64::NAN, 50.0, 37.0, f64::INFINITY);
        assert!((size.width - 50.0 * theta.sin()).abs() < 1e-9);
        assert!((size.height - 50.0 * theta.cos()).abs() < 1e-9);

        let size = bounding_box(100.0, f64::NAN, f64::NAN, f64::NAN);
        assert_eq!(size, Size::new(100.0, 0.0));
    }

    #[test]
    fn test_recenter_preserves_center() {
        // 100x50 at (10, 10) rotated to 90 degrees: the box swaps to 50x100
        // and the anchor moves so the center stays at (60, 35).
        let new_pos =
            recenter_for_transform(Point::new(10.0, 10.0), 100.0, 50.0, 0.0, 1.0, 90.0, 1.0);
        assert_eq!(new_pos, Point::new(35.0, -15.0));

        let new_size = bounding_box(100.0, 50.0, 90.0, 1.0);
        assert_eq!(new_size, Size::new(50.0, 100.0));
        let center = Point::new(
            new_pos.x + new_size.width / 2.0,
            new_pos.y + new_size.height / 2.0,
        );
        assert_eq!(center, Point::new(60.0, 35.0));
    }

    #[test]
    fn test_recenter_under_scale_change() {
        let pos = Point::new(0.0, 0.0);
        let old = bounding_box(80.0, 40.0, 20.0, 1.0);
        let center = Point::new(pos.x + old.width / 2.0, pos.y + old.height / 2.0);

        let new_pos = recenter_for_transform(pos, 80.0, 40.0, 20.0, 1.0, 20.0, 2.0);
        let new = bounding_box(80.0, 40.0, 20.0, 2.0);
        let new_center = Point::new(
            new_pos.x + new.width / 2.0,
            new_pos.y + new.height / 2.0,
        );
        assert!((new_center.x - center.x).abs() < 1e-9);
        assert!((new_center.y - center.y).abs() < 1e-9);
    }
}
