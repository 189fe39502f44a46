use crate::Vector;
use crate::geom::EPS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.z - other.z).abs() < EPS
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Self) -> f64 {
        (*other - *self).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Creates a new point along the edge pt1->pt2 with some relative distance from pt1.
    ///
    /// `rel_d = 0` gives `pt1`, `rel_d = 1` gives `pt2`.
    pub fn new_between_2_points(pt1: Self, pt2: Self, rel_d: f64) -> Self {
        Self {
            x: pt1.x * (1. - rel_d) + pt2.x * rel_d,
            y: pt1.y * (1. - rel_d) + pt2.y * rel_d,
            z: pt1.z * (1. - rel_d) + pt2.z * rel_d,
        }
    }

    /// Arithmetic mean of the points. Returns the origin for an empty slice.
    pub fn centroid(pts: &[Point]) -> Self {
        if pts.is_empty() {
            return Self::default();
        }
        let n = pts.len() as f64;
        let (sx, sy, sz) = pts
            .iter()
            .fold((0., 0., 0.), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
        Self::new(sx / n, sy / n, sz / n)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Point({:.prec$}, {:.prec$}, {:.prec$})",
            self.x,
            self.y,
            self.z,
            prec = prec
        )
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
            z: self.z + other.dz,
        }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, other: Vector) -> Self {
        Self {
            x: self.x - other.dx,
            y: self.y - other.dy,
            z: self.z - other.dz,
        }
    }
}

/// Point - Point gives the vector pointing from `other` to `self`.
impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Self) -> Vector {
        Vector::from_points(other, self)
    }
}

impl From<[f64; 3]> for Point {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}
