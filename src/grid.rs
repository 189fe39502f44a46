//! Structured grid of hexahedral cells and the point location queries used
//! by the well path traversal.

pub mod cell;
pub mod corner_point;
pub mod voxel_index;

pub use cell::{Cell, Permeability};
pub use corner_point::CornerPointGrid;

use crate::Point;
use crate::geom::bboxes::BoundingBox;

/// Point location queries over a grid.
///
/// The traversal only reads from the grid, so one grid can serve many well
/// paths.
pub trait Grid {
    fn cell_count(&self) -> usize;

    fn cell(&self, global_index: usize) -> Option<&Cell>;

    /// Returns the cell enclosing `point`.
    ///
    /// If `candidates` is given, only those global indices are searched.
    /// Returns `None` when no (candidate) cell contains the point.
    fn cell_enclosing_point(&self, point: Point, candidates: Option<&[usize]>) -> Option<&Cell>;

    /// Global indices of the cells whose bounding boxes overlap `bbox`, sorted.
    fn bounding_box_cell_indices(&self, bbox: &BoundingBox) -> Vec<usize>;
}
