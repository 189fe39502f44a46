use crate::Point;
use crate::config::WellIndexConfig;
use crate::error::{Result, WellIndexError};
use crate::grid::Grid;
use crate::well::intersected_cell::IntersectedCell;
use crate::well::traversal::collect_intersected_cells;
use crate::well::well_index::compute_well_index;

/// Computes the cells intersected by a well path and their well indices.
///
/// The grid is only borrowed for reading. Each call handles one path
/// independently.
pub struct WellIndexCalculator<'g, G: Grid + ?Sized> {
    grid: &'g G,
    config: WellIndexConfig,
}

impl<'g, G: Grid + ?Sized> WellIndexCalculator<'g, G> {
    pub fn new(grid: &'g G) -> Self {
        Self {
            grid,
            config: WellIndexConfig::default(),
        }
    }

    pub fn with_config(grid: &'g G, config: WellIndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { grid, config })
    }

    pub fn config(&self) -> &WellIndexConfig {
        &self.config
    }

    pub fn grid(&self) -> &'g G {
        self.grid
    }

    /// Returns the cells crossed by the straight path `heel -> toe`, in
    /// travel order, each with its well index.
    pub fn compute_well_blocks(
        &self,
        heel: Point,
        toe: Point,
        wellbore_radius: f64,
    ) -> Result<Vec<IntersectedCell<'g>>> {
        let traversed =
            collect_intersected_cells(self.grid, heel, toe, wellbore_radius, &self.config)?;
        traversed
            .into_iter()
            .map(|c| compute_well_index(c, &self.config))
            .collect()
    }

    /// Same as [`Self::compute_well_blocks`] for a piecewise linear
    /// trajectory. Legs are processed in order and their records concatenated.
    pub fn compute_well_blocks_along(
        &self,
        points: &[Point],
        wellbore_radius: f64,
    ) -> Result<Vec<IntersectedCell<'g>>> {
        if points.len() < 2 {
            return Err(WellIndexError::DegenerateInput {
                reason: format!("a trajectory needs at least 2 points, got {}", points.len()),
            });
        }
        let mut blocks = Vec::new();
        for leg in points.windows(2) {
            blocks.extend(self.compute_well_blocks(leg[0], leg[1], wellbore_radius)?);
        }
        Ok(blocks)
    }
}
