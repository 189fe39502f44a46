use crate::geom::EPS;
use crate::geom::point::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest box holding all points `pts`. Returns `None` for an empty slice.
    pub fn from_points(pts: &[Point]) -> Option<Self> {
        let first = pts.first()?;
        let (min, max) = pts.iter().skip(1).fold((*first, *first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        });
        Some(Self { min, max })
    }

    /// Returns a copy grown by `fraction` of its extent on every side, per axis.
    ///
    /// An axis with zero extent stays flat.
    pub fn inflated(&self, fraction: f64) -> Self {
        let ex = (self.max.x - self.min.x) * fraction;
        let ey = (self.max.y - self.min.y) * fraction;
        let ez = (self.max.z - self.min.z) * fraction;
        Self {
            min: Point::new(self.min.x - ex, self.min.y - ey, self.min.z - ez),
            max: Point::new(self.max.x + ex, self.max.y + ey, self.max.z + ez),
        }
    }

    /// Checks whether a point is inside the box, boundary included.
    pub fn contains(&self, ptest: Point, tol: f64) -> bool {
        ptest.x >= self.min.x - tol
            && ptest.x <= self.max.x + tol
            && ptest.y >= self.min.y - tol
            && ptest.y <= self.max.y + tol
            && ptest.z >= self.min.z - tol
            && ptest.z <= self.max.z + tol
    }

    /// Checks whether two bounding boxes overlap (touching counts).
    pub fn overlaps(&self, other: &Self) -> bool {
        are_bboxes_overlapping(self.min, self.max, other.min, other.max)
    }
}

/// Checks whether two bounding boxes overlap.
///
/// Takes min and max corners of each bbox.
/// Returns true if boxes overlap (including touching).
pub fn are_bboxes_overlapping(min1: Point, max1: Point, min2: Point, max2: Point) -> bool {
    // Boxes don't overlap if separated along any axis
    if max1.x < min2.x - EPS || min1.x > max2.x + EPS {
        return false;
    }
    if max1.y < min2.y - EPS || min1.y > max2.y + EPS {
        return false;
    }
    if max1.z < min2.z - EPS || min1.z > max2.z + EPS {
        return false;
    }
    true
}
