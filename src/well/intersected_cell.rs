use crate::Point;
use crate::grid::Cell;
use crate::well::segment::{Segment, SegmentData};

/// Anything holding the ordered segments of a cell visit.
pub trait HasSegments {
    fn cell(&self) -> &Cell;
    fn segments(&self) -> &[Segment];

    fn global_index(&self) -> usize {
        self.cell().global_index
    }

    fn num_segments(&self) -> usize {
        self.segments().len()
    }

    fn entry_point(&self) -> Option<Point> {
        self.segments().first().map(|s| s.entry)
    }

    fn exit_point(&self) -> Option<Point> {
        self.segments().last().map(|s| s.exit)
    }
}

/// A cell visited by the traversal, with the segments found inside it.
///
/// Re-entering a cell produces a new record, records are never merged.
#[derive(Debug, Clone)]
pub struct TraversedCell<'g> {
    cell: &'g Cell,
    segments: Vec<Segment>,
}

impl<'g> TraversedCell<'g> {
    pub fn new(cell: &'g Cell) -> Self {
        Self {
            cell,
            segments: Vec::new(),
        }
    }

    pub(crate) fn with_segment(cell: &'g Cell, segment: Segment) -> Self {
        let mut traversed = Self::new(cell);
        traversed.add_new_segment(segment);
        traversed
    }

    pub(crate) fn add_new_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub(crate) fn into_parts(self) -> (&'g Cell, Vec<Segment>) {
        (self.cell, self.segments)
    }
}

impl HasSegments for TraversedCell<'_> {
    fn cell(&self) -> &Cell {
        self.cell
    }

    fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// A cell intersected by the well path with its computed well index.
#[derive(Debug, Clone)]
pub struct IntersectedCell<'g> {
    pub(crate) cell: &'g Cell,
    pub(crate) segments: Vec<Segment>,
    pub(crate) data: Vec<SegmentData>,
    pub(crate) well_index_x: f64,
    pub(crate) well_index_y: f64,
    pub(crate) well_index_z: f64,
    pub(crate) well_index: f64,
}

impl<'g> IntersectedCell<'g> {
    /// Grid cell this record refers to (borrowed from the grid).
    pub fn grid_cell(&self) -> &'g Cell {
        self.cell
    }

    /// Diagnostics, one entry per segment in the same order.
    pub fn segment_data(&self) -> &[SegmentData] {
        &self.data
    }

    /// Summed directional well indices `(x, y, z)`.
    pub fn directional_well_index(&self) -> (f64, f64, f64) {
        (self.well_index_x, self.well_index_y, self.well_index_z)
    }

    pub fn well_index(&self) -> f64 {
        self.well_index
    }
}

impl HasSegments for IntersectedCell<'_> {
    fn cell(&self) -> &Cell {
        self.cell
    }

    fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Sum of all segment lengths.
pub fn total_length<C: HasSegments>(cells: &[C]) -> f64 {
    cells
        .iter()
        .flat_map(|c| c.segments().iter())
        .map(|s| s.length())
        .sum()
}

pub fn total_well_index(cells: &[IntersectedCell<'_>]) -> f64 {
    cells.iter().map(|c| c.well_index).sum()
}

/// Checks that the segments chain from `heel` to `toe` without gaps larger
/// than `tol`.
pub fn is_contiguous<C: HasSegments>(cells: &[C], heel: Point, toe: Point, tol: f64) -> bool {
    let mut segments = cells.iter().flat_map(|c| c.segments().iter());
    let Some(first) = segments.next() else {
        return false;
    };
    if first.entry.distance(&heel) > tol {
        return false;
    }
    let mut last_exit = first.exit;
    for s in segments {
        if s.entry.distance(&last_exit) > tol {
            return false;
        }
        last_exit = s.exit;
    }
    last_exit.distance(&toe) <= tol
}
