use log::{trace, warn};

use crate::Point;
use crate::config::WellIndexConfig;
use crate::grid::Cell;

/// Finds the point where the line `entry_point -> end_point` leaves `cell`.
///
/// Every face not parallel to the line is intersected with it. A candidate
/// is accepted if it lies inside the cell (within the feasibility
/// tolerance), is not `exclusion_point`, and does not lie beyond `end_point`.
/// The first accepted candidate is returned.
///
/// If no face qualifies, the line only touches the cell at a corner or an
/// edge and `entry_point` is returned unchanged. Callers see this as a step
/// without progress.
pub fn find_exit_point(
    cell: &Cell,
    entry_point: Point,
    end_point: Point,
    exclusion_point: Point,
    config: &WellIndexConfig,
) -> Point {
    let line = end_point - entry_point;

    for (n, face) in cell.faces.iter().enumerate() {
        if face.normal_vector.dot(&line) == 0. {
            continue;
        }
        let Some(candidate) = face.intersection_with_line(entry_point, end_point) else {
            continue;
        };

        let feasible = cell.contains(candidate, config.feasibility_tolerance);
        let excluded = candidate.distance(&exclusion_point) <= config.exclusion_distance;
        let past_end = line.dot(&(end_point - candidate)) < 0.;

        if feasible && !excluded && !past_end {
            return candidate;
        }
        trace!(
            "Cell {} face {n}: rejected {candidate:.6} (feasible={feasible}, excluded={excluded}, past_end={past_end})",
            cell.global_index
        );
    }

    warn!(
        "No exit point found in cell {} from {entry_point:.6}, the line only touches the cell",
        cell.global_index
    );
    entry_point
}
