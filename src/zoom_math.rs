//! Pan/zoom transform mathematics.
//!
//! Pure functions over [`Transform`], kept free of DOM access so every
//! invariant can be checked in unit tests.
//!
//! A transform maps a point `p` of the untransformed image to
//! `(tx + p.x * scale, ty + p.y * scale)`, which is what CSS produces for
//! `translate(tx, ty) scale(scale)` with the origin pinned at `0px 0px`.

use serde::{Deserialize, Serialize};

use crate::layout::{Point, Size};

/// Translation and uniform scale applied to the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub scale: f64,
}

impl Transform {
    pub fn new(tx: f64, ty: f64, scale: f64) -> Self {
        Self { tx, ty, scale }
    }

    /// No pan, scale 1.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn translation(&self) -> Point {
        Point::new(self.tx, self.ty)
    }

    /// Same scale, new translation.
    pub fn with_translation(&self, translation: Point) -> Transform {
        Transform::new(translation.x, translation.y, self.scale)
    }

    /// Point of the original image that is displayed at `pos`.
    pub fn to_original(&self, pos: Point) -> Point {
        Point::new((pos.x - self.tx) / self.scale, (pos.y - self.ty) / self.scale)
    }

    /// Where a point of the original image is displayed.
    pub fn to_display(&self, original: Point) -> Point {
        Point::new(self.tx + original.x * self.scale, self.ty + original.y * self.scale)
    }

    /// Rescale while keeping the image point under `cursor` fixed.
    ///
    /// `cursor` is in untransformed image space (see [`crate::layout::position`]).
    pub fn zoom_to_cursor(&self, new_scale: f64, cursor: Point) -> Transform {
        let original = self.to_original(cursor);

        Transform {
            tx: cursor.x - new_scale * original.x,
            ty: cursor.y - new_scale * original.y,
            scale: new_scale,
        }
    }

    /// CSS `transform` value; translation is applied before scaling.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            css_number(self.tx),
            css_number(self.ty),
            self.scale
        )
    }
}

/// Clamping to a zero edge can produce `-0.0`; render it as `0`.
fn css_number(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Multiplicative scale change for one wheel event.
///
/// Negative `delta_y` (wheel up) zooms in.
pub fn wheel_scale_factor(delta_y: f64, step: f64) -> f64 {
    1.0 - delta_y * step
}

/// Scale that shows a CSS-fitted image at its native pixel size.
pub fn one_to_one_scale(container: Size, native: Size) -> f64 {
    1.0 / (container.width / native.width).min(container.height / native.height)
}

/// Clamp a translation into `[min, max]`, leaving it alone when the range is empty.
pub fn clamp_translation(value: f64, min: f64, max: f64) -> f64 {
    if min < max { value.clamp(min, max) } else { value }
}

/// Zoom to native size and center the clicked image point in the viewport.
///
/// `pos` is the clicked point in untransformed image space and
/// `image_offset` the image's offset inside the container. The result never
/// shows blank space past the image edges on an axis where the image is at
/// least as large as the container.
pub fn zoom_at_point(pos: Point, container: Size, native: Size, image_offset: Point) -> Transform {
    let scale = one_to_one_scale(container, native);
    let middle = container.center();

    let tx = -pos.x * scale + middle.x - image_offset.x;
    let ty = -pos.y * scale + middle.y - image_offset.y;

    let tx = clamp_translation(
        tx,
        -image_offset.x - native.width + container.width,
        -image_offset.x,
    );
    let ty = clamp_translation(
        ty,
        -image_offset.y - native.height + container.height,
        -image_offset.y,
    );

    Transform { tx, ty, scale }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_point(a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.translation(), Point::ORIGIN);
        assert_eq!(Transform::default(), t);
    }

    #[test]
    fn test_zoom_at_origin_keeps_translation() {
        let t = Transform::identity().zoom_to_cursor(2.0, Point::ORIGIN);
        assert_eq!(t, Transform::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_zoom_to_cursor_preserves_cursor_point() {
        let cursors = [
            Point::new(150.0, 120.0),
            Point::new(-40.0, 7.5),
            Point::new(1234.5, 987.25),
        ];
        let starts = [
            Transform::identity(),
            Transform::new(50.0, 30.0, 1.0),
            Transform::new(-400.0, -300.0, 2.0),
            Transform::new(12.5, -3.0, 0.35),
        ];

        for start in starts {
            for cursor in cursors {
                let before = start.to_original(cursor);
                let zoomed = start.zoom_to_cursor(start.scale * 1.1, cursor);
                let after = zoomed.to_original(cursor);

                assert!(approx_point(before, after), "{start:?} at {cursor:?}");
                assert!(approx_point(zoomed.to_display(before), cursor));
            }
        }
    }

    #[test]
    fn test_wheel_scale_factor_direction() {
        assert!(approx_eq(wheel_scale_factor(-2.0, 0.05), 1.1));
        assert!(approx_eq(wheel_scale_factor(2.0, 0.05), 0.9));
        assert_eq!(wheel_scale_factor(0.0, 0.05), 1.0);
    }

    #[test]
    fn test_one_to_one_scale_uses_tighter_axis() {
        let container = Size::new(800.0, 600.0);
        assert!(approx_eq(
            one_to_one_scale(container, Size::new(1600.0, 1200.0)),
            2.0
        ));
        // Wide image: width limits the fit.
        assert!(approx_eq(
            one_to_one_scale(container, Size::new(3200.0, 1200.0)),
            4.0
        ));
    }

    #[test]
    fn test_clamp_translation_skips_empty_range() {
        assert_eq!(clamp_translation(5.0, -800.0, 0.0), 0.0);
        assert_eq!(clamp_translation(-900.0, -800.0, 0.0), -800.0);
        assert_eq!(clamp_translation(-400.0, -800.0, 0.0), -400.0);
        assert_eq!(clamp_translation(250.0, 400.0, 0.0), 250.0);
        assert_eq!(clamp_translation(250.0, 0.0, 0.0), 250.0);
    }

    #[test]
    fn test_zoom_at_point_centers_click() {
        let t = zoom_at_point(
            Point::new(400.0, 300.0),
            Size::new(800.0, 600.0),
            Size::new(1600.0, 1200.0),
            Point::ORIGIN,
        );
        assert_eq!(t, Transform::new(-400.0, -300.0, 2.0));
    }

    #[test]
    fn test_zoom_at_point_clamps_to_edges() {
        let container = Size::new(800.0, 600.0);
        let native = Size::new(1600.0, 1200.0);

        let top_left = zoom_at_point(Point::new(10.0, 10.0), container, native, Point::ORIGIN);
        assert_eq!(top_left.translation(), Point::new(0.0, 0.0));

        let bottom_right =
            zoom_at_point(Point::new(790.0, 590.0), container, native, Point::ORIGIN);
        assert_eq!(bottom_right.translation(), Point::new(-800.0, -600.0));
    }

    #[test]
    fn test_zoom_at_point_respects_image_offset() {
        let t = zoom_at_point(
            Point::new(400.0, 300.0),
            Size::new(800.0, 600.0),
            Size::new(1600.0, 1200.0),
            Point::new(5.0, 0.0),
        );
        assert_eq!(t, Transform::new(-405.0, -300.0, 2.0));
        assert!(t.tx <= -5.0 && t.tx >= -5.0 - 1600.0 + 800.0);
    }

    #[test]
    fn test_css_rendering() {
        assert_eq!(
            Transform::new(-400.0, -300.0, 2.0).to_css(),
            "translate(-400px, -300px) scale(2)"
        );
        assert_eq!(
            Transform::new(12.5, -0.0, 0.5).to_css(),
            "translate(12.5px, 0px) scale(0.5)"
        );
    }
}
