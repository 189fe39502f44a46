//! Well path / grid intersection and well index calculation.
//!
//! Computing the well blocks of a path happens in two phases. The traversal
//! walks the straight heel-toe line through the grid and produces one
//! [`TraversedCell`] per visited cell. Each record is then consumed by the
//! well index evaluator, which returns the final [`IntersectedCell`] with the
//! per-segment diagnostics and the cell's well index.

pub mod calculator;
pub mod exit_point;
pub mod intersected_cell;
pub mod segment;
pub mod traversal;
pub mod well_index;

pub use calculator::WellIndexCalculator;
pub use exit_point::find_exit_point;
pub use intersected_cell::{
    HasSegments, IntersectedCell, TraversedCell, is_contiguous, total_length, total_well_index,
};
pub use segment::{Segment, SegmentData};
pub use traversal::collect_intersected_cells;
pub use well_index::{Peaceman, compute_well_index, dir_well_index, dir_wellblock_radius};
