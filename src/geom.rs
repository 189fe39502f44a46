pub mod bboxes;
pub mod face;
pub mod point;
pub mod vector;

/// Geometric precision
pub const EPS: f64 = 1e-13;
