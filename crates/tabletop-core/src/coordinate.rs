//! Point and rectangle value types with rotation support.
//!
//! Angles are always given in degrees. Rotation math is delegated to
//! [`kurbo::Affine`], which works in radians.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a [`CoordinatePlain`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Top left x ({top_left}) must be smaller or equal to bottom right x ({bottom_right})")]
    InvertedX { top_left: f64, bottom_right: f64 },
    #[error("Top left y ({top_left}) must be smaller or equal to bottom right y ({bottom_right})")]
    InvertedY { top_left: f64, bottom_right: f64 },
}

/// Normalize a rotation in degrees into `[0, 360)`.
pub fn normalize_rotation(value: f64) -> f64 {
    let normalized = value - (value / 360.0).floor() * 360.0;
    // -1e-17 floors to -1 and lands exactly on 360.0
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// An immutable 2D point in virtual (scene) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    x: f64,
    y: f64,
}

impl Coordinate {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Rotate around the origin by `angle` degrees.
    pub fn rotated(self, angle: f64) -> Self {
        self.rotated_about(angle, Self::ORIGIN)
    }

    /// Rotate around `pivot` by `angle` degrees (clockwise in screen space, y pointing down).
    pub fn rotated_about(self, angle: f64, pivot: Coordinate) -> Self {
        if angle % 360.0 == 0.0 {
            return self;
        }
        let affine = Affine::rotate_about(angle.to_radians(), pivot.to_point());
        (affine * self.to_point()).into()
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: Coordinate, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Vec2> for Coordinate {
    fn from(vec: Vec2) -> Self {
        Self::new(vec.x, vec.y)
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Coordinate {
    type Output = Coordinate;

    fn mul(self, factor: f64) -> Coordinate {
        Coordinate::new(self.x * factor, self.y * factor)
    }
}

impl Div<f64> for Coordinate {
    type Output = Coordinate;

    fn div(self, denominator: f64) -> Coordinate {
        Coordinate::new(self.x / denominator, self.y / denominator)
    }
}

impl Neg for Coordinate {
    type Output = Coordinate;

    fn neg(self) -> Coordinate {
        Coordinate::new(-self.x, -self.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X = {}, Y = {}", self.x, self.y)
    }
}

/// An axis-aligned rectangle described by its four corners.
///
/// Built from a top-left and a bottom-right corner. Rotating a plain yields the
/// axis-aligned bounds of the rotated corners, so width and height grow with
/// any rotation that is not a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePlain {
    top_left: Coordinate,
    top_right: Coordinate,
    bottom_left: Coordinate,
    bottom_right: Coordinate,
    width: f64,
    height: f64,
}

impl CoordinatePlain {
    /// Create a plain from its top-left and bottom-right coordinates.
    ///
    /// Fails if the top-left corner lies right of or below the bottom-right corner.
    pub fn new(
        top_left_x: f64,
        top_left_y: f64,
        bottom_right_x: f64,
        bottom_right_y: f64,
    ) -> Result<Self, CoordinateError> {
        if top_left_x > bottom_right_x {
            return Err(CoordinateError::InvertedX {
                top_left: top_left_x,
                bottom_right: bottom_right_x,
            });
        }
        if top_left_y > bottom_right_y {
            return Err(CoordinateError::InvertedY {
                top_left: top_left_y,
                bottom_right: bottom_right_y,
            });
        }

        Ok(Self::bounding([
            Coordinate::new(top_left_x, top_left_y),
            Coordinate::new(bottom_right_x, top_left_y),
            Coordinate::new(top_left_x, bottom_right_y),
            Coordinate::new(bottom_right_x, bottom_right_y),
        ]))
    }

    pub fn from_corners(top_left: Coordinate, bottom_right: Coordinate) -> Result<Self, CoordinateError> {
        Self::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    /// Axis-aligned bounds of an arbitrary set of four corners.
    fn bounding(corners: [Coordinate; 4]) -> Self {
        let min_x = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|c| c.y).fold(f64::NEG_INFINITY, f64::max);

        Self {
            top_left: Coordinate::new(min_x, min_y),
            top_right: Coordinate::new(max_x, min_y),
            bottom_left: Coordinate::new(min_x, max_y),
            bottom_right: Coordinate::new(max_x, max_y),
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn top_left(&self) -> Coordinate {
        self.top_left
    }

    pub fn top_right(&self) -> Coordinate {
        self.top_right
    }

    pub fn bottom_left(&self) -> Coordinate {
        self.bottom_left
    }

    pub fn bottom_right(&self) -> Coordinate {
        self.bottom_right
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            self.top_left.x + self.width / 2.0,
            self.top_left.y + self.height / 2.0,
        )
    }

    /// Rotate all corners about `center` and return their axis-aligned bounds.
    pub fn rotated(&self, angle: f64, center: Coordinate) -> Self {
        Self::bounding([
            self.top_left.rotated_about(angle, center),
            self.top_right.rotated_about(angle, center),
            self.bottom_left.rotated_about(angle, center),
            self.bottom_right.rotated_about(angle, center),
        ])
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Coordinate) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.top_left.to_point(), self.bottom_right.to_point())
    }
}

impl fmt::Display for CoordinatePlain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CoordinatePlain(topLeft={}, bottomRight={}, width={}, height={})",
            self.top_left, self.bottom_right, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_add_subtract() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(3.0, -4.0);
        assert_eq!(a + b, Coordinate::new(4.0, -2.0));
        assert_eq!(a - b, Coordinate::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Coordinate::new(2.0, 4.0));
        assert_eq!(b / 2.0, Coordinate::new(1.5, -2.0));
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let c = Coordinate::new(0.1, 0.7);
        let pivot = Coordinate::new(13.3, -2.9);
        assert_eq!(c.rotated_about(0.0, pivot), c);
        assert_eq!(c.rotated_about(360.0, pivot), c);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let c = Coordinate::new(1.0, 0.0).rotated(90.0);
        assert!(c.approx_eq(Coordinate::new(0.0, 1.0), EPS));
    }

    #[test]
    fn test_rotate_about_pivot() {
        let pivot = Coordinate::new(10.0, 10.0);
        let c = Coordinate::new(20.0, 10.0).rotated_about(180.0, pivot);
        assert!(c.approx_eq(Coordinate::new(0.0, 10.0), EPS));
    }

    #[test]
    fn test_rotate_roundtrip() {
        let pivot = Coordinate::new(-3.0, 7.5);
        let original = Coordinate::new(42.0, -17.25);
        for angle in [12.5, 45.0, 90.0, 133.0, 270.0, -60.0] {
            let back = original.rotated_about(angle, pivot).rotated_about(-angle, pivot);
            assert!(back.approx_eq(original, 1e-9), "angle {angle}");
        }
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(0.0), 0.0);
        assert_eq!(normalize_rotation(360.0), 0.0);
        assert_eq!(normalize_rotation(370.0), 10.0);
        assert_eq!(normalize_rotation(-90.0), 270.0);
        assert_eq!(normalize_rotation(-720.0), 0.0);
        assert!(normalize_rotation(-1e-17) < 360.0);
    }

    #[test]
    fn test_plain_corners_and_size() {
        let plain = CoordinatePlain::new(1.0, 2.0, 11.0, 7.0).unwrap();
        assert_eq!(plain.top_left(), Coordinate::new(1.0, 2.0));
        assert_eq!(plain.top_right(), Coordinate::new(11.0, 2.0));
        assert_eq!(plain.bottom_left(), Coordinate::new(1.0, 7.0));
        assert_eq!(plain.bottom_right(), Coordinate::new(11.0, 7.0));
        assert_eq!(plain.width(), 10.0);
        assert_eq!(plain.height(), 5.0);
    }

    #[test]
    fn test_plain_rejects_inverted_corners() {
        assert!(matches!(
            CoordinatePlain::new(5.0, 0.0, 1.0, 1.0),
            Err(CoordinateError::InvertedX { .. })
        ));
        assert!(matches!(
            CoordinatePlain::new(0.0, 5.0, 1.0, 1.0),
            Err(CoordinateError::InvertedY { .. })
        ));
        assert!(CoordinatePlain::new(1.0, 1.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_plain_rotated_bounds() {
        let plain = CoordinatePlain::new(0.0, 0.0, 40.0, 20.0).unwrap();
        let rotated = plain.rotated(90.0, plain.center());
        assert!((rotated.width() - 20.0).abs() < EPS);
        assert!((rotated.height() - 40.0).abs() < EPS);
        assert!(rotated.center().approx_eq(plain.center(), EPS));

        let diagonal = plain.rotated(45.0, plain.center());
        let expected = 60.0 / 2f64.sqrt();
        assert!((diagonal.width() - expected).abs() < 1e-9);
        assert!((diagonal.height() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_plain_contains() {
        let plain = CoordinatePlain::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(plain.contains(Coordinate::new(0.0, 10.0)));
        assert!(plain.contains(Coordinate::new(5.0, 5.0)));
        assert!(!plain.contains(Coordinate::new(10.5, 5.0)));
    }
}
