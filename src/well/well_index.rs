//! Peaceman-type directional well index.
//!
//! Each segment is projected on the three cell axes. The projected length
//! along one axis is combined with the cell size and permeability in the two
//! other directions, and the three directional indices are summed over the
//! segments of a cell before taking their Euclidean norm.

use std::f64::consts::PI;

use log::{debug, warn};

use crate::Vector;
use crate::config::WellIndexConfig;
use crate::error::{Result, WellIndexError};
use crate::well::intersected_cell::{IntersectedCell, TraversedCell};
use crate::well::segment::SegmentData;

/// Well index formula constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peaceman {
    pub unit_conversion: f64,
    pub wellblock_radius_factor: f64,
}

impl Peaceman {
    pub fn new(unit_conversion: f64, wellblock_radius_factor: f64) -> Self {
        Self {
            unit_conversion,
            wellblock_radius_factor,
        }
    }

    /// Equivalent (pressure) radius of the wellblock for flow normal to the
    /// plane spanned by the two directions with sizes `d1`, `d2`.
    pub fn wellblock_radius(&self, d1: f64, d2: f64, k1: f64, k2: f64) -> f64 {
        self.wellblock_radius_factor
            * ((d1 * d1) * (k2 / k1).sqrt() + (d2 * d2) * (k1 / k2).sqrt()).sqrt()
            / ((k1 / k2).powf(0.25) + (k2 / k1).powf(0.25))
    }

    /// Well index of a well of length `l` aligned with one cell axis.
    pub fn well_index(&self, l: f64, d1: f64, d2: f64, k1: f64, k2: f64, radius: f64) -> f64 {
        self.unit_conversion * (2. * PI * (k1 * k2).sqrt() * l)
            / (self.wellblock_radius(d1, d2, k1, k2) / radius).ln()
    }
}

impl Default for Peaceman {
    fn default() -> Self {
        Self::from(&WellIndexConfig::default())
    }
}

impl From<&WellIndexConfig> for Peaceman {
    fn from(config: &WellIndexConfig) -> Self {
        Self::new(config.unit_conversion, config.wellblock_radius_factor)
    }
}

/// Directional well index with the default constants.
pub fn dir_well_index(l: f64, d1: f64, d2: f64, k1: f64, k2: f64, radius: f64) -> f64 {
    Peaceman::default().well_index(l, d1, d2, k1, k2, radius)
}

/// Directional wellblock radius with the default constants.
pub fn dir_wellblock_radius(d1: f64, d2: f64, k1: f64, k2: f64) -> f64 {
    Peaceman::default().wellblock_radius(d1, d2, k1, k2)
}

/// Evaluates the well index of a traversed cell.
///
/// Consumes the traversal record and returns the final record, holding the
/// per-segment diagnostics and the combined well index.
pub fn compute_well_index<'g>(
    traversed: TraversedCell<'g>,
    config: &WellIndexConfig,
) -> Result<IntersectedCell<'g>> {
    let (cell, segments) = traversed.into_parts();
    let formula = Peaceman::from(config);
    let domain_error = |reason: String| WellIndexError::NumericDomain {
        cell: cell.global_index,
        reason,
    };

    for (name, value) in [
        ("dx", cell.dx),
        ("dy", cell.dy),
        ("dz", cell.dz),
        ("permx", cell.permx),
        ("permy", cell.permy),
        ("permz", cell.permz),
    ] {
        if !(value.is_finite() && value > 0.) {
            return Err(domain_error(format!("{name} must be positive, got {value}")));
        }
    }

    let mut well_index_x = 0.;
    let mut well_index_y = 0.;
    let mut well_index_z = 0.;
    let mut data = Vec::with_capacity(segments.len());

    for segment in &segments {
        let radius = segment.radius;
        if !(radius.is_finite() && radius > 0.) {
            return Err(domain_error(format!(
                "wellbore radius must be positive, got {radius}"
            )));
        }

        let v = segment.vector();
        let project = |axis: &Vector, name: &str| {
            v.projected_length(axis)
                .ok_or_else(|| domain_error(format!("degenerate {name} axis")))
        };
        let lx = project(&cell.xvec, "x")?;
        let ly = project(&cell.yvec, "y")?;
        let lz = project(&cell.zvec, "z")?;

        // An axis without projected length contributes nothing, whatever its
        // wellblock radius
        let directional = |l: f64, axis: &str, d1: f64, d2: f64, k1: f64, k2: f64| -> Result<f64> {
            if l == 0. {
                return Ok(0.);
            }
            let r_eq = formula.wellblock_radius(d1, d2, k1, k2);
            if r_eq == radius {
                return Err(domain_error(format!(
                    "wellbore radius {radius} equals the {axis} wellblock radius"
                )));
            }
            if r_eq < radius {
                warn!(
                    "Cell {}: wellbore radius {radius} exceeds the {axis} wellblock radius {r_eq:.4}, \
                     negative well index",
                    cell.global_index
                );
            }
            Ok(formula.well_index(l, d1, d2, k1, k2, radius))
        };

        // Summing per segment reduces to the closed form when all radii are equal
        let wx = directional(lx, "x", cell.dy, cell.dz, cell.permy, cell.permz)?;
        let wy = directional(ly, "y", cell.dx, cell.dz, cell.permx, cell.permz)?;
        let wz = directional(lz, "z", cell.dx, cell.dy, cell.permx, cell.permy)?;

        well_index_x += wx;
        well_index_y += wy;
        well_index_z += wz;

        data.push(SegmentData {
            x: v.dx,
            y: v.dy,
            z: v.dz,
            lx,
            ly,
            lz,
            wx,
            wy,
            wz,
        });
    }

    let well_index =
        (well_index_x * well_index_x + well_index_y * well_index_y + well_index_z * well_index_z)
            .sqrt();
    debug!(
        "Cell {} {:?}: well index {well_index:.6} (x={well_index_x:.6}, y={well_index_y:.6}, z={well_index_z:.6})",
        cell.global_index, cell.ijk
    );

    Ok(IntersectedCell {
        cell,
        segments,
        data,
        well_index_x,
        well_index_y,
        well_index_z,
        well_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use crate::grid::{Cell, Permeability};
    use crate::well::intersected_cell::HasSegments;
    use crate::well::segment::Segment;
    use approx::assert_relative_eq;

    fn cube(d: f64, perm: Permeability) -> Cell {
        Cell::from_box(0, (0, 0, 0), Point::new(0., 0., 0.), (d, d, d), perm).unwrap()
    }

    #[test]
    fn test_wellblock_radius_isotropic() {
        // 0.28 * sqrt(2 d^2) / 2
        let r = dir_wellblock_radius(10., 10., 100., 100.);
        assert_relative_eq!(r, 0.28 * 200f64.sqrt() / 2., max_relative = 1e-12);
    }

    #[test]
    fn test_wellblock_radius_anisotropic_is_symmetric() {
        let a = dir_wellblock_radius(10., 4., 100., 25.);
        let b = dir_wellblock_radius(4., 10., 25., 100.);
        assert_relative_eq!(a, b, max_relative = 1e-12);
    }

    #[test]
    fn test_dir_well_index() {
        let r_eq = 0.28 * 200f64.sqrt() / 2.;
        let expected = 0.008527 * 2. * PI * 100. * 10. / (r_eq / 0.1).ln();
        assert_relative_eq!(
            dir_well_index(10., 10., 10., 100., 100., 0.1),
            expected,
            max_relative = 1e-12
        );
        assert_eq!(dir_well_index(0., 10., 10., 100., 100., 0.1), 0.);
    }

    #[test]
    fn test_x_aligned_segment() {
        let cell = cube(10., Permeability::isotropic(100.));
        let segment = Segment::new(Point::new(0., 5., 5.), Point::new(10., 5., 5.), 0.1);
        let tc = TraversedCell::with_segment(&cell, segment);
        let ic = compute_well_index(tc, &WellIndexConfig::default()).unwrap();

        let data = ic.segment_data()[0];
        assert_relative_eq!(data.lx, 10., epsilon = 1e-12);
        assert_eq!(data.ly, 0.);
        assert_eq!(data.lz, 0.);
        assert_eq!(data.x, 10.);
        assert_eq!(data.wy, 0.);
        assert_eq!(data.wz, 0.);
        let expected = dir_well_index(10., 10., 10., 100., 100., 0.1);
        assert_relative_eq!(data.wx, expected, max_relative = 1e-12);
        assert_relative_eq!(ic.well_index(), expected, max_relative = 1e-12);
        assert_eq!(ic.num_segments(), 1);
    }

    #[test]
    fn test_isotropic_cube_contributions_are_equal() {
        let cell = cube(10., Permeability::isotropic(50.));
        let segment = Segment::new(Point::new(1., 1., 1.), Point::new(7., 7., 7.), 0.1);
        let tc = TraversedCell::with_segment(&cell, segment);
        let ic = compute_well_index(tc, &WellIndexConfig::default()).unwrap();
        let data = ic.segment_data()[0];
        assert_relative_eq!(data.lx, data.ly, max_relative = 1e-12);
        assert_relative_eq!(data.wx, data.wy, max_relative = 1e-12);
        assert_relative_eq!(data.wy, data.wz, max_relative = 1e-12);
        assert_relative_eq!(ic.well_index(), 3f64.sqrt() * data.wx, max_relative = 1e-12);
    }

    #[test]
    fn test_segments_accumulate_per_direction() {
        let cell = cube(10., Permeability::new(100., 50., 10.));
        let a = Segment::new(Point::new(0., 5., 5.), Point::new(4., 5., 5.), 0.1);
        let b = Segment::new(Point::new(4., 5., 5.), Point::new(4., 5., 10.), 0.2);
        let mut tc = TraversedCell::new(&cell);
        tc.add_new_segment(a);
        tc.add_new_segment(b);
        let ic = compute_well_index(tc, &WellIndexConfig::default()).unwrap();

        let wx = dir_well_index(4., 10., 10., 50., 10., 0.1);
        let wz = dir_well_index(5., 10., 10., 100., 50., 0.2);
        let (sx, sy, sz) = ic.directional_well_index();
        assert_relative_eq!(sx, wx, max_relative = 1e-12);
        assert_eq!(sy, 0.);
        assert_relative_eq!(sz, wz, max_relative = 1e-12);
        assert_relative_eq!(ic.well_index(), (wx * wx + wz * wz).sqrt(), max_relative = 1e-12);
        assert_eq!(ic.segment_data().len(), 2);
    }

    #[test]
    fn test_zero_permeability_is_rejected() {
        let cell = cube(10., Permeability::new(100., 0., 100.));
        let segment = Segment::new(Point::new(0., 5., 5.), Point::new(10., 5., 5.), 0.1);
        let tc = TraversedCell::with_segment(&cell, segment);
        let result = compute_well_index(tc, &WellIndexConfig::default());
        assert!(matches!(result, Err(WellIndexError::NumericDomain { cell: 0, .. })));
    }

    #[test]
    fn test_radius_equal_to_wellblock_radius_is_rejected() {
        let cell = cube(1., Permeability::isotropic(100.));
        let radius = dir_wellblock_radius(1., 1., 100., 100.);
        let segment = Segment::new(Point::new(0., 0.5, 0.5), Point::new(1., 0.5, 0.5), radius);
        let tc = TraversedCell::with_segment(&cell, segment);
        let result = compute_well_index(tc, &WellIndexConfig::default());
        assert!(matches!(result, Err(WellIndexError::NumericDomain { cell: 0, .. })));
    }

    #[test]
    fn test_thin_column_along_x() {
        // The z wellblock radius (0.099) is below the wellbore radius, but the
        // segment has no length along z
        let cell = Cell::from_box(
            0,
            (0, 0, 0),
            Point::new(0., 0., 0.),
            (0.5, 0.5, 10.),
            Permeability::isotropic(100.),
        )
        .unwrap();
        let segment = Segment::new(Point::new(0.05, 0.25, 5.), Point::new(0.45, 0.25, 5.), 0.1);
        let tc = TraversedCell::with_segment(&cell, segment);
        let ic = compute_well_index(tc, &WellIndexConfig::default()).unwrap();

        let expected = dir_well_index(0.4, 0.5, 10., 100., 100., 0.1);
        let (wx, wy, wz) = ic.directional_well_index();
        assert_relative_eq!(wx, expected, max_relative = 1e-9);
        assert_relative_eq!(wx, 0.8117, epsilon = 1e-4);
        assert_eq!(wy, 0.);
        assert_eq!(wz, 0.);
        assert_relative_eq!(ic.well_index(), expected, max_relative = 1e-9);
    }

    #[test]
    fn test_radius_larger_than_wellblock_gives_negative_index() {
        let cell = cube(1., Permeability::isotropic(100.));
        let segment = Segment::new(Point::new(0., 0.5, 0.5), Point::new(1., 0.5, 0.5), 0.5);
        let tc = TraversedCell::with_segment(&cell, segment);
        let ic = compute_well_index(tc, &WellIndexConfig::default()).unwrap();
        let (wx, _, _) = ic.directional_well_index();
        assert!(wx < 0.);
        assert_relative_eq!(wx, dir_well_index(1., 1., 1., 100., 100., 0.5), max_relative = 1e-12);
    }
}
