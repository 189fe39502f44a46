use crate::{Point, Vector};
use serde::{Deserialize, Serialize};

/// Part of the well path lying inside one cell.
///
/// `entry` is the end closer to the heel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub entry: Point,
    pub exit: Point,
    pub radius: f64,
}

impl Segment {
    pub fn new(entry: Point, exit: Point, radius: f64) -> Self {
        Self {
            entry,
            exit,
            radius,
        }
    }

    pub fn vector(&self) -> Vector {
        self.exit - self.entry
    }

    pub fn length(&self) -> f64 {
        self.vector().length()
    }
}

/// Intermediate well index values of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentData {
    /// Components of the segment vector (exit - entry).
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Segment length projected on the cell axes.
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
    /// Directional well index contributions.
    pub wx: f64,
    pub wy: f64,
    pub wz: f64,
}
