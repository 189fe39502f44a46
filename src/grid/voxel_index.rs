use std::collections::{HashMap, HashSet};

use crate::Point;
use crate::geom::bboxes::BoundingBox;

/// Upper bound on the voxels a single cell covers along one axis.
const MAX_VOXELS_PER_AXIS: f64 = 8.;

/// Uniform voxel hash mapping each voxel to the cells whose bounding boxes
/// overlap it.
#[derive(Debug, Clone)]
pub struct VoxelIndex {
    grid: HashMap<(i64, i64, i64), Vec<usize>>,
    step: f64,
}

impl VoxelIndex {
    /// Builds the index over cell bounding boxes (the slice position is the
    /// cell's global index).
    pub fn new(bboxes: &[BoundingBox], step: f64) -> Self {
        let mut grid: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();

        for (idx, bbox) in bboxes.iter().enumerate() {
            let (imin, jmin, kmin) = Self::voxel_of(bbox.min, step);
            let (imax, jmax, kmax) = Self::voxel_of(bbox.max, step);
            for i in imin..=imax {
                for j in jmin..=jmax {
                    for k in kmin..=kmax {
                        grid.entry((i, j, k)).or_default().push(idx);
                    }
                }
            }
        }

        Self { grid, step }
    }

    /// Picks a voxel size from the average cell extent.
    ///
    /// The step never drops below the largest extent divided by
    /// `MAX_VOXELS_PER_AXIS`, so a single oversized cell among fine ones is
    /// registered in at most `MAX_VOXELS_PER_AXIS + 1` voxels per axis.
    pub fn suggested_step(bboxes: &[BoundingBox]) -> f64 {
        if bboxes.is_empty() {
            return 1.0;
        }
        let extents: Vec<f64> = bboxes
            .iter()
            .map(|b| (b.max.x - b.min.x).max(b.max.y - b.min.y).max(b.max.z - b.min.z))
            .collect();
        let mean = extents.iter().sum::<f64>() / extents.len() as f64;
        let largest = extents.iter().copied().fold(0., f64::max);
        let step = mean.max(largest / MAX_VOXELS_PER_AXIS);
        if step.is_finite() && step > 0. { step } else { 1.0 }
    }

    fn voxel_of(pos: Point, step: f64) -> (i64, i64, i64) {
        (
            (pos.x / step).floor() as i64,
            (pos.y / step).floor() as i64,
            (pos.z / step).floor() as i64,
        )
    }

    /// Returns cell indices from the voxel containing `pos` plus 26 neighbors.
    pub fn find_nearby(&self, pos: Point) -> HashSet<usize> {
        let (ci, cj, ck) = Self::voxel_of(pos, self.step);

        let mut result = HashSet::new();

        for di in -1..=1 {
            for dj in -1..=1 {
                for dk in -1..=1 {
                    if let Some(indices) = self.grid.get(&(ci + di, cj + dj, ck + dk)) {
                        result.extend(indices);
                    }
                }
            }
        }

        result
    }

    /// Returns indices of all cells whose bounding boxes overlap `bbox`.
    pub fn find_in_box(&self, bbox: &BoundingBox) -> HashSet<usize> {
        let (imin, jmin, kmin) = Self::voxel_of(bbox.min, self.step);
        let (imax, jmax, kmax) = Self::voxel_of(bbox.max, self.step);

        let mut result = HashSet::new();
        for i in imin..=imax {
            for j in jmin..=jmax {
                for k in kmin..=kmax {
                    if let Some(indices) = self.grid.get(&(i, j, k)) {
                        result.extend(indices);
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(x: f64) -> BoundingBox {
        BoundingBox::new(Point::new(x, 0., 0.), Point::new(x + 1., 1., 1.))
    }

    #[test]
    fn test_voxel_index_basic() {
        let bboxes = vec![unit_box(0.), unit_box(1.), unit_box(5.)];
        let index = VoxelIndex::new(&bboxes, 0.5);

        let nearby = index.find_nearby(Point::new(0.5, 0.5, 0.5));
        assert!(nearby.contains(&0));
        assert!(!nearby.contains(&2));
    }

    #[test]
    fn test_voxel_index_far_point() {
        let bboxes = vec![unit_box(0.)];
        let index = VoxelIndex::new(&bboxes, 0.5);
        let nearby = index.find_nearby(Point::new(100.0, 100.0, 100.0));
        assert!(nearby.is_empty());
    }

    #[test]
    fn test_find_in_box() {
        let bboxes = vec![unit_box(0.), unit_box(1.), unit_box(5.)];
        let index = VoxelIndex::new(&bboxes, VoxelIndex::suggested_step(&bboxes));
        let found = index.find_in_box(&BoundingBox::new(
            Point::new(0.2, 0.2, 0.2),
            Point::new(1.5, 0.5, 0.5),
        ));
        assert!(found.contains(&0));
        assert!(found.contains(&1));
        assert!(!found.contains(&2));
    }

    #[test]
    fn test_step_bounded_by_largest_cell() {
        let mut bboxes: Vec<BoundingBox> = (0..1000).map(|i| unit_box(i as f64)).collect();
        bboxes.push(BoundingBox::new(
            Point::new(0., 10., 0.),
            Point::new(8000., 8010., 8000.),
        ));
        let step = VoxelIndex::suggested_step(&bboxes);
        assert!((step - 1000.).abs() < 1e-9);

        let index = VoxelIndex::new(&bboxes, step);
        let covering = index.grid.values().filter(|v| v.contains(&1000)).count();
        assert!(covering <= 9 * 9 * 9);
        assert!(index.find_nearby(Point::new(7000., 7000., 7000.)).contains(&1000));
    }

    #[test]
    fn test_step_from_mean_extent() {
        let bboxes = vec![unit_box(0.), unit_box(1.), unit_box(5.)];
        assert!((VoxelIndex::suggested_step(&bboxes) - 1.).abs() < 1e-12);
    }
}
