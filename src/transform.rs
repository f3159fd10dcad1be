//! Mapping between diagram space and device (pixel) space.
//!
//! Every renderer owns one [`Transform`]; drawing operations always receive
//! diagram-space coordinates and the backend applies the transform before
//! emitting native calls. Interactive backends round to whole pixels, export
//! backends keep real-valued device coordinates.

use crate::error::{RenderError, Result};
use crate::geometry::{Point, Rectangle};

/// Zoom factor (device pixels per diagram unit) plus the diagram-space point
/// mapped to device pixel (0, 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    zoom_factor: f64,
    origo: Point,
}

impl Transform {
    /// Fails on a non-positive or non-finite zoom; the owning viewport is
    /// expected to keep zoom within sane bounds, this only rejects nonsense.
    pub fn new(zoom_factor: f64, origo: Point) -> Result<Self> {
        if !zoom_factor.is_finite() || zoom_factor <= 0.0 {
            return Err(RenderError::InvalidParam(format!(
                "zoom factor must be positive and finite, got {zoom_factor}"
            )));
        }
        Ok(Self { zoom_factor, origo })
    }

    /// Derives the transform that maps `visible` onto a `width_pixels` wide
    /// output, the way displays and the banded exporter set up rendering.
    /// The vertical zoom follows the horizontal one; `visible` must not be
    /// degenerate.
    pub fn from_visible_rect(visible: &Rectangle, width_pixels: u32) -> Result<Self> {
        if visible.width() <= 0.0 {
            return Err(RenderError::InvalidParam(
                "visible rectangle has no width".into(),
            ));
        }
        Transform::new(
            width_pixels as f64 / visible.width(),
            Point::new(visible.left, visible.top),
        )
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn origo(&self) -> Point {
        self.origo
    }

    /// Scrolling and zooming mutate the transform in place.
    pub fn set_origo(&mut self, origo: Point) {
        self.origo = origo;
    }

    /// Diagram point to real-valued device coordinates.
    pub fn to_device(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.origo.x) * self.zoom_factor,
            (p.y - self.origo.y) * self.zoom_factor,
        )
    }

    /// Diagram point to whole pixels, rounded to nearest.
    pub fn to_device_pixels(&self, p: Point) -> (i32, i32) {
        let (x, y) = self.to_device(p);
        (x.round() as i32, y.round() as i32)
    }

    pub fn length_to_device(&self, len: f64) -> f64 {
        len * self.zoom_factor
    }

    /// Device coordinates back to diagram space, used when translating
    /// pointer events.
    pub fn to_diagram(&self, x: f64, y: f64) -> Point {
        Point::new(
            x / self.zoom_factor + self.origo.x,
            y / self.zoom_factor + self.origo.y,
        )
    }

    pub fn length_to_diagram(&self, len: f64) -> f64 {
        len / self.zoom_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_zoom() {
        assert!(Transform::new(0.0, Point::default()).is_err());
        assert!(Transform::new(-2.0, Point::default()).is_err());
        assert!(Transform::new(f64::NAN, Point::default()).is_err());
    }

    #[test]
    fn point_round_trips() {
        let t = Transform::new(3.5, Point::new(-2.0, 7.25)).unwrap();
        for p in [
            Point::new(0.0, 0.0),
            Point::new(12.5, -3.75),
            Point::new(-100.0, 42.0),
        ] {
            let (x, y) = t.to_device(p);
            let back = t.to_diagram(x, y);
            assert!((back.x - p.x).abs() < 1e-9);
            assert!((back.y - p.y).abs() < 1e-9);
        }
    }

    #[test]
    fn length_round_trips() {
        let t = Transform::new(0.4, Point::default()).unwrap();
        let len = 13.7;
        assert!((t.length_to_diagram(t.length_to_device(len)) - len).abs() < 1e-12);
    }

    #[test]
    fn pixel_mapping_rounds_to_nearest() {
        let t = Transform::new(10.0, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(t.to_device_pixels(Point::new(0.26, 0.24)), (3, 2));
    }

    #[test]
    fn visible_rect_maps_left_edge_to_zero() {
        let visible = Rectangle::new(4.0, 2.0, 14.0, 7.0);
        let t = Transform::from_visible_rect(&visible, 200).unwrap();
        assert_eq!(t.to_device(Point::new(4.0, 2.0)), (0.0, 0.0));
        assert_eq!(t.to_device(Point::new(14.0, 2.0)).0, 200.0);
        assert_eq!(t.zoom_factor(), 20.0);
    }
}
