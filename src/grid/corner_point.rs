use std::collections::HashSet;

use log::debug;

use crate::Point;
use crate::error::{Result, WellIndexError};
use crate::geom::bboxes::BoundingBox;
use crate::grid::Grid;
use crate::grid::cell::{Cell, Permeability};
use crate::grid::voxel_index::VoxelIndex;

/// Tolerance of the point-in-cell test used for cell lookup.
const LOOKUP_TOLERANCE: f64 = 1e-6;

/// Grid of `nx * ny * nz` hexahedral cells.
///
/// Global indices run i-fastest: `i + nx * (j + ny * k)`.
#[derive(Debug, Clone)]
pub struct CornerPointGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    cells: Vec<Cell>,
    index: VoxelIndex,
}

impl CornerPointGrid {
    /// Builds a grid from the corners of every cell, in global index order.
    pub fn from_cells(
        dims: (usize, usize, usize),
        corners: Vec<[Point; 8]>,
        perms: Vec<Permeability>,
    ) -> Result<Self> {
        let (nx, ny, nz) = dims;
        let num_cells = nx * ny * nz;
        if num_cells == 0 {
            return Err(WellIndexError::InvalidGrid(format!(
                "grid dimensions must be positive, got {nx}x{ny}x{nz}"
            )));
        }
        if corners.len() != num_cells || perms.len() != num_cells {
            return Err(WellIndexError::InvalidGrid(format!(
                "expected {num_cells} cells, got {} corner sets and {} permeabilities",
                corners.len(),
                perms.len()
            )));
        }

        let mut cells = Vec::with_capacity(num_cells);
        for (global_index, (c, perm)) in corners.into_iter().zip(perms).enumerate() {
            let ijk = (
                global_index % nx,
                (global_index / nx) % ny,
                global_index / (nx * ny),
            );
            cells.push(Cell::new(global_index, ijk, c, perm)?);
        }

        let bboxes: Vec<BoundingBox> = cells.iter().map(|c| c.bounding_box()).collect();
        let index = VoxelIndex::new(&bboxes, VoxelIndex::suggested_step(&bboxes));
        debug!("Built {nx}x{ny}x{nz} grid with {num_cells} cells");

        Ok(Self {
            nx,
            ny,
            nz,
            cells,
            index,
        })
    }

    /// Rectilinear grid with node coordinates `xs`, `ys`, `zs` (strictly increasing).
    pub fn from_coordinates(xs: &[f64], ys: &[f64], zs: &[f64], perm: Permeability) -> Result<Self> {
        for (name, coords) in [("x", xs), ("y", ys), ("z", zs)] {
            if coords.len() < 2 {
                return Err(WellIndexError::InvalidGrid(format!(
                    "at least 2 {name} coordinates are required"
                )));
            }
            if coords.windows(2).any(|w| !(w[1] > w[0])) {
                return Err(WellIndexError::InvalidGrid(format!(
                    "{name} coordinates must be strictly increasing"
                )));
            }
        }
        let (nx, ny, nz) = (xs.len() - 1, ys.len() - 1, zs.len() - 1);

        let mut corners = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let mut c = [Point::default(); 8];
                    for (n, p) in c.iter_mut().enumerate() {
                        let (di, dj, dk) = (n & 1, (n >> 1) & 1, (n >> 2) & 1);
                        *p = Point::new(xs[i + di], ys[j + dj], zs[k + dk]);
                    }
                    corners.push(c);
                }
            }
        }
        let perms = vec![perm; nx * ny * nz];
        Self::from_cells((nx, ny, nz), corners, perms)
    }

    /// Uniform Cartesian grid with the minimum corner at `origin`.
    pub fn uniform(
        dims: (usize, usize, usize),
        cell_size: (f64, f64, f64),
        origin: Point,
        perm: Permeability,
    ) -> Result<Self> {
        let axis = |n: usize, d: f64, o: f64| -> Vec<f64> {
            (0..=n).map(|i| o + i as f64 * d).collect()
        };
        let xs = axis(dims.0, cell_size.0, origin.x);
        let ys = axis(dims.1, cell_size.1, origin.y);
        let zs = axis(dims.2, cell_size.2, origin.z);
        Self::from_coordinates(&xs, &ys, &zs, perm)
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn global_index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        if i < self.nx && j < self.ny && k < self.nz {
            Some(i + self.nx * (j + self.ny * k))
        } else {
            None
        }
    }

    pub fn set_permeability(&mut self, global_index: usize, perm: Permeability) -> Result<()> {
        let num_cells = self.cells.len();
        let cell = self.cells.get_mut(global_index).ok_or_else(|| {
            WellIndexError::InvalidGrid(format!(
                "cell {global_index} out of range (grid has {num_cells} cells)"
            ))
        })?;
        cell.set_permeability(perm);
        Ok(())
    }
}

impl Grid for CornerPointGrid {
    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell(&self, global_index: usize) -> Option<&Cell> {
        self.cells.get(global_index)
    }

    fn cell_enclosing_point(&self, point: Point, candidates: Option<&[usize]>) -> Option<&Cell> {
        let mut nearby: Vec<usize> = self.index.find_nearby(point).into_iter().collect();
        if let Some(candidates) = candidates {
            let allowed: HashSet<usize> = candidates.iter().copied().collect();
            nearby.retain(|i| allowed.contains(i));
        }
        // Boundary points belong to the lowest index
        nearby.sort_unstable();
        nearby
            .into_iter()
            .filter_map(|i| self.cells.get(i))
            .find(|c| c.contains(point, LOOKUP_TOLERANCE))
    }

    fn bounding_box_cell_indices(&self, bbox: &BoundingBox) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .index
            .find_in_box(bbox)
            .into_iter()
            .filter(|&i| self.cells[i].bounding_box().overlaps(bbox))
            .collect();
        found.sort_unstable();
        found
    }
}
