//! Core geometric types

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point in the coordinate system (SVG convention, y pointing down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Manhattan distance, the metric used by anchor matching
    pub fn manhattan(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Rotate around the origin by `degrees` (clockwise positive in SVG's y-down space)
    pub fn rotate(self, degrees: f64) -> Point {
        if degrees == 0.0 {
            return self;
        }
        let (sin_a, cos_a) = degrees.to_radians().sin_cos();
        Point::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    /// Round both coordinates to two decimal places
    pub fn rounded(self) -> Point {
        Point::new(round2(self.x), round2(self.y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// A cubic Bezier segment with control points `p0..p3`
///
/// Straight segments are encoded with `p0 == p1` and `p2 == p3`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Bezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Degenerate cubic representing a straight segment
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(from, from, to, to)
    }

    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }
}
