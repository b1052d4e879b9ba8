//! Geometric primitives carried by diagram-interchange (DI) data.
//!
//! This module provides the two geometric types a BPMN diagram needs to be
//! handed to a rendering engine: waypoints of edges and bounds of shapes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space (an edge waypoint)
//! - [`Bounds`] - A rectangle given by its top-left corner and its size
//!
//! # Coordinate System
//!
//! BPMN DI uses the same coordinate system as SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Coordinates are `f64` because DI declares them as `xsd:double`.

use serde::Serialize;

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use bpmnviz_core::geometry::Point;
/// let waypoint = Point::new(10.0, 20.0);
///
/// assert_eq!(waypoint.x(), 10.0);
/// assert_eq!(waypoint.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate
    pub fn y(self) -> f64 {
        self.y
    }
}

/// A rectangular area given by its top-left corner, width and height.
///
/// This is the layout of `dc:Bounds` in BPMN DI.
///
/// # Examples
///
/// ```
/// # use bpmnviz_core::geometry::Bounds;
/// let bounds = Bounds::new(100.0, 50.0, 80.0, 40.0);
///
/// assert_eq!(bounds.max_x(), 180.0);
/// assert_eq!(bounds.max_y(), 90.0);
/// assert_eq!(bounds.center().x(), 140.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates new bounds from a top-left corner and a size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the x-coordinate of the top-left corner
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the top-left corner
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.x + self.width
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.y + self.height
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.25);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.25);
    }

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert_eq!(point.x(), 0.0);
        assert_eq!(point.y(), 0.0);
    }

    #[test]
    fn test_bounds_accessors() {
        let bounds = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bounds.x(), 10.0);
        assert_eq!(bounds.y(), 20.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
    }

    #[test]
    fn test_bounds_center() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(bounds.center(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_bounds_serialize() {
        let json = serde_json::to_value(Bounds::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0 })
        );
    }
}
