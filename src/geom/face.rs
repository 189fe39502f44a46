//! Planar faces bounding a hexahedral cell.
//!
//! A face is a quadrilateral approximated by a plane through the centroid of
//! its corners. The normal points out of the owning cell, so a point lies on
//! the interior side of the face when its signed distance is not positive.

use crate::{Point, Vector};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub corners: [Point; 4],
    pub centroid: Point,
    /// Outward unit normal.
    pub normal_vector: Vector,
}

impl Face {
    /// Creates a face from its corners (given in cyclic order) and a point
    /// inside the owning cell, used to orient the normal outward.
    ///
    /// Returns `None` if the corners are degenerate (no normal exists).
    pub fn new(corners: [Point; 4], interior: Point) -> Option<Self> {
        let centroid = Point::centroid(&corners);
        // Diagonals give a stable normal for warped quadrilaterals too
        let d0 = corners[2] - corners[0];
        let d1 = corners[3] - corners[1];
        let mut normal_vector = d0.cross(&d1).normalize()?;
        if normal_vector.dot(&(centroid - interior)) < 0. {
            normal_vector = -normal_vector;
        }
        Some(Self {
            corners,
            centroid,
            normal_vector,
        })
    }

    /// Signed distance of `ptest` from the face plane, positive outside the cell.
    pub fn signed_distance(&self, ptest: Point) -> f64 {
        self.normal_vector.dot(&(ptest - self.centroid))
    }

    /// Checks whether `ptest` lies on the interior side of this face, or
    /// within `tol` of the plane.
    pub fn point_on_same_side(&self, ptest: Point, tol: f64) -> bool {
        self.signed_distance(ptest) <= tol
    }

    /// Intersection of the infinite line through `a` and `b` with the face plane.
    ///
    /// Returns `None` when the line is parallel to the plane.
    pub fn intersection_with_line(&self, a: Point, b: Point) -> Option<Point> {
        let line = b - a;
        let denom = self.normal_vector.dot(&line);
        if denom == 0. {
            return None;
        }
        // Plane: n . (p - c) = 0, line: p = a + t * (b - a)
        let t = self.normal_vector.dot(&(self.centroid - a)) / denom;
        Some(a + line * t)
    }
}
