use crate::error::{Result, WellIndexError};
use serde::{Deserialize, Serialize};

/// Tolerances and constants used by the traversal and the well index formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellIndexConfig {
    // Exit point search
    /// A candidate exit point may lie at most this far outside any cell face.
    pub feasibility_tolerance: f64,
    /// Candidates closer than this to the excluded point are rejected.
    pub exclusion_distance: f64,

    // Traversal
    /// Maximum number of cell records produced for one path.
    pub max_intersected_cells: usize,
    /// Distance the cell lookup probe is moved past each exit point.
    pub probe_nudge: f64,
    /// Fraction of the path extent added on every side of the search box.
    pub bounding_box_margin: f64,
    pub use_bounding_box_filter: bool,

    // Well index formula
    /// Unit conversion factor (metric, cP/mD to m3/day/bar).
    pub unit_conversion: f64,
    /// Peaceman equivalent radius factor.
    pub wellblock_radius_factor: f64,

    /// Allowed gap between consecutive segment end points.
    pub contiguity_tolerance: f64,
}

impl WellIndexConfig {
    pub fn new() -> Self {
        Self {
            feasibility_tolerance: 1e-6,
            exclusion_distance: 1e-10,
            max_intersected_cells: 500,
            probe_nudge: 0.01,
            bounding_box_margin: 0.1,
            use_bounding_box_filter: true,
            unit_conversion: 0.008527,
            wellblock_radius_factor: 0.28,
            contiguity_tolerance: 1e-6,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("feasibility_tolerance", self.feasibility_tolerance),
            ("exclusion_distance", self.exclusion_distance),
            ("probe_nudge", self.probe_nudge),
            ("unit_conversion", self.unit_conversion),
            ("wellblock_radius_factor", self.wellblock_radius_factor),
            ("contiguity_tolerance", self.contiguity_tolerance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.) {
                return Err(WellIndexError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.bounding_box_margin.is_finite() && self.bounding_box_margin >= 0.) {
            return Err(WellIndexError::InvalidConfig(format!(
                "bounding_box_margin must be non-negative, got {}",
                self.bounding_box_margin
            )));
        }
        if self.max_intersected_cells == 0 {
            return Err(WellIndexError::InvalidConfig(
                "max_intersected_cells must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WellIndexConfig {
    fn default() -> Self {
        Self::new()
    }
}
