use log::debug;

use crate::Point;
use crate::config::WellIndexConfig;
use crate::error::{Result, WellIndexError};
use crate::geom::EPS;
use crate::geom::bboxes::BoundingBox;
use crate::grid::{Cell, Grid};
use crate::well::exit_point::find_exit_point;
use crate::well::intersected_cell::{HasSegments, TraversedCell};
use crate::well::segment::Segment;

/// Walks the straight path `heel -> toe` through the grid.
///
/// Returns one record per visited cell, in travel order. The first segment
/// starts at `heel`, the last one ends at `toe`, and each segment starts
/// where the previous one ended.
///
/// Boundary points belong to the lowest global index, so a heel (or toe)
/// lying on a face shared with a lower-index cell the path never enters
/// produces a leading (or trailing) zero-length record in that cell.
///
/// The next cell is found by probing `probe_nudge` past each exit point. A
/// cell thinner than that along the path is stepped over and its length is
/// credited to the cell the probe lands in.
pub fn collect_intersected_cells<'g, G: Grid + ?Sized>(
    grid: &'g G,
    heel: Point,
    toe: Point,
    wellbore_radius: f64,
    config: &WellIndexConfig,
) -> Result<Vec<TraversedCell<'g>>> {
    check_well_path(heel, toe, wellbore_radius)?;

    // Search box around the path, only used to speed up cell lookups
    let candidates: Option<Vec<usize>> = if config.use_bounding_box_filter {
        BoundingBox::from_points(&[heel, toe])
            .map(|bbox| grid.bounding_box_cell_indices(&bbox.inflated(config.bounding_box_margin)))
    } else {
        None
    };
    let locate = |p: Point| locate_cell(grid, p, candidates.as_deref());

    let first_cell = locate(heel)?;
    let last_cell = locate(toe)?;
    debug!(
        "Well path {heel:.3} -> {toe:.3}: first cell {}, last cell {}",
        first_cell.global_index, last_cell.global_index
    );

    let mut cells: Vec<TraversedCell<'g>> = Vec::new();

    if first_cell.global_index == last_cell.global_index {
        cells.push(TraversedCell::with_segment(
            first_cell,
            Segment::new(heel, toe, wellbore_radius),
        ));
        return Ok(cells);
    }

    // The first candidate may lie behind the heel, skip it if so
    let mut exit_point = find_exit_point(first_cell, heel, toe, heel, config);
    if (toe - heel).dot(&(exit_point - heel)) <= 0. {
        exit_point = find_exit_point(first_cell, heel, toe, exit_point, config);
    }
    cells.push(TraversedCell::with_segment(
        first_cell,
        Segment::new(heel, exit_point, wellbore_radius),
    ));

    loop {
        // Probe slightly past the exit point so the lookup does not return
        // the cell just left
        let probe = probe_point(exit_point, toe, config.probe_nudge);
        let cell = locate(probe)?;
        if !cell.contains(exit_point, config.feasibility_tolerance) {
            debug!(
                "Probe {probe:.6} landed in cell {}, which does not touch {exit_point:.6}; \
                 a cell thinner than {} was stepped over",
                cell.global_index, config.probe_nudge
            );
        }

        if cells.len() >= config.max_intersected_cells {
            return Err(WellIndexError::TraversalOverflow {
                limit: config.max_intersected_cells,
            });
        }

        if cell.global_index == last_cell.global_index {
            cells.push(TraversedCell::with_segment(
                cell,
                Segment::new(exit_point, toe, wellbore_radius),
            ));
            break;
        }

        let entry_point = exit_point;
        exit_point = find_exit_point(cell, entry_point, toe, entry_point, config);
        debug!(
            "Cell {} {:?}: {entry_point:.3} -> {exit_point:.3}",
            cell.global_index, cell.ijk
        );
        cells.push(TraversedCell::with_segment(
            cell,
            Segment::new(entry_point, exit_point, wellbore_radius),
        ));
    }

    let found = cells
        .last()
        .map(|c| c.global_index())
        .unwrap_or(first_cell.global_index);
    if found != last_cell.global_index {
        return Err(WellIndexError::GeometricConsistency {
            expected: last_cell.global_index,
            found,
        });
    }

    debug!("Well path crosses {} cells", cells.len());
    Ok(cells)
}

/// Rejects zero-length paths, non-positive radii and non-finite input.
pub(crate) fn check_well_path(heel: Point, toe: Point, wellbore_radius: f64) -> Result<()> {
    if !heel.is_finite() || !toe.is_finite() {
        return Err(WellIndexError::DegenerateInput {
            reason: format!("non-finite coordinates in {heel} -> {toe}"),
        });
    }
    if heel.distance(&toe) < EPS {
        return Err(WellIndexError::DegenerateInput {
            reason: format!("heel and toe coincide at {heel}"),
        });
    }
    if !(wellbore_radius.is_finite() && wellbore_radius > 0.) {
        return Err(WellIndexError::DegenerateInput {
            reason: format!("wellbore radius must be positive, got {wellbore_radius}"),
        });
    }
    Ok(())
}

/// Point `nudge` past `exit_point` toward `toe`, never beyond `toe`.
fn probe_point(exit_point: Point, toe: Point, nudge: f64) -> Point {
    let remaining = exit_point.distance(&toe);
    if remaining < EPS {
        return toe;
    }
    let epsilon = (nudge / remaining).min(1.);
    Point::new_between_2_points(exit_point, toe, epsilon)
}

/// Looks the point up among the candidates first, then in the whole grid.
fn locate_cell<'g, G: Grid + ?Sized>(
    grid: &'g G,
    point: Point,
    candidates: Option<&[usize]>,
) -> Result<&'g Cell> {
    if let Some(candidates) = candidates {
        if let Some(cell) = grid.cell_enclosing_point(point, Some(candidates)) {
            return Ok(cell);
        }
        debug!("{point:.6} not found among {} candidate cells", candidates.len());
    }
    grid.cell_enclosing_point(point, None)
        .ok_or(WellIndexError::PointOutsideGrid { point })
}
