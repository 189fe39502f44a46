use anyhow::Result;
use approx::assert_relative_eq;
use rstest::rstest;
use wellindex::geom::bboxes::BoundingBox;
use wellindex::well::{HasSegments, dir_well_index, is_contiguous, total_length};
use wellindex::{
    Cell, CornerPointGrid, Grid, Permeability, Point, WellIndexCalculator, WellIndexConfig,
    WellIndexError,
};

fn row_of_three() -> Result<CornerPointGrid> {
    Ok(CornerPointGrid::uniform(
        (3, 1, 1),
        (10., 10., 10.),
        Point::new(0., -5., -5.),
        Permeability::isotropic(100.),
    )?)
}

fn cube_grid() -> Result<CornerPointGrid> {
    Ok(CornerPointGrid::uniform(
        (3, 3, 3),
        (10., 10., 10.),
        Point::new(0., 0., 0.),
        Permeability::new(200., 150., 20.),
    )?)
}

#[test]
fn test_three_cell_row() -> Result<()> {
    let grid = row_of_three()?;
    let calc = WellIndexCalculator::new(&grid);
    let heel = Point::new(0., 0., 0.);
    let toe = Point::new(30., 0., 0.);
    let blocks = calc.compute_well_blocks(heel, toe, 0.1)?;

    assert_eq!(blocks.len(), 3);
    let expected = dir_well_index(10., 10., 10., 100., 100., 0.1);
    for (n, block) in blocks.iter().enumerate() {
        assert_eq!(block.global_index(), n);
        assert_eq!(block.num_segments(), 1);
        let data = block.segment_data()[0];
        assert_relative_eq!(data.lx, 10., epsilon = 1e-9);
        assert_relative_eq!(data.ly, 0., epsilon = 1e-12);
        assert_relative_eq!(data.lz, 0., epsilon = 1e-12);
        assert_relative_eq!(block.well_index(), expected, max_relative = 1e-9);
    }
    Ok(())
}

#[test]
fn test_path_inside_one_cell() -> Result<()> {
    let grid = cube_grid()?;
    let calc = WellIndexCalculator::new(&grid);
    let heel = Point::new(11., 12., 13.);
    let toe = Point::new(18., 14., 19.);
    let blocks = calc.compute_well_blocks(heel, toe, 0.1)?;

    assert_eq!(blocks.len(), 1);
    let segment = blocks[0].segments()[0];
    assert_eq!(blocks[0].num_segments(), 1);
    assert_eq!(segment.entry, heel);
    assert_eq!(segment.exit, toe);
    assert_eq!(segment.radius, 0.1);
    assert_eq!(blocks[0].global_index(), 13);
    Ok(())
}

#[rstest]
#[case(Point::new(10., 0., 0.), Point::new(25., 0., 0.), vec![(0, 0.), (1, 10.), (2, 5.)])]
#[case(Point::new(25., 0., 0.), Point::new(10., 0., 0.), vec![(2, 5.), (1, 10.), (0, 0.)])]
fn test_heel_and_toe_on_shared_faces(
    #[case] heel: Point,
    #[case] toe: Point,
    #[case] expected: Vec<(usize, f64)>,
) -> Result<()> {
    // Points on a shared face resolve to the lower index, which adds an
    // empty record for cell 0
    let grid = row_of_three()?;
    let calc = WellIndexCalculator::new(&grid);
    let blocks = calc.compute_well_blocks(heel, toe, 0.1)?;

    assert_eq!(blocks.len(), expected.len());
    for (block, (index, length)) in blocks.iter().zip(&expected) {
        assert_eq!(block.global_index(), *index);
        assert_eq!(block.num_segments(), 1);
        assert_relative_eq!(block.segments()[0].length(), *length, epsilon = 1e-9);
        if *length == 0. {
            assert_eq!(block.well_index(), 0.);
        } else {
            assert!(block.well_index() > 0.);
        }
    }
    assert!(is_contiguous(&blocks, heel, toe, 1e-6));
    assert_relative_eq!(total_length(&blocks), 15., epsilon = 1e-9);
    Ok(())
}

#[rstest]
#[case(Point::new(1., 2., 3.), Point::new(28., 17., 26.))]
#[case(Point::new(25., 3., 14.), Point::new(4., 27., 8.))]
#[case(Point::new(15., 1., 5.), Point::new(15.5, 29., 25.))]
#[case(Point::new(0.5, 12., 29.), Point::new(29., 13., 0.5))]
#[case(Point::new(2., 2., 2.), Point::new(3., 2., 28.))]
fn test_traversal_properties(#[case] heel: Point, #[case] toe: Point) -> Result<()> {
    let grid = cube_grid()?;
    let calc = WellIndexCalculator::new(&grid);
    let blocks = calc.compute_well_blocks(heel, toe, 0.1)?;

    // Segments chain from heel to toe
    assert!(is_contiguous(&blocks, heel, toe, 1e-6));
    assert_relative_eq!(total_length(&blocks), heel.distance(&toe), max_relative = 1e-9);

    // Ends in the toe cell
    let toe_cell = grid.cell_enclosing_point(toe, None).map(|c| c.global_index);
    assert_eq!(blocks.last().map(|b| b.global_index()), toe_cell);

    // Consecutive records are different cells
    for pair in blocks.windows(2) {
        assert_ne!(pair[0].global_index(), pair[1].global_index());
    }

    for block in &blocks {
        assert!(block.well_index() >= 0.);
        let (wx, wy, wz) = block.directional_well_index();
        assert_relative_eq!(
            block.well_index(),
            (wx * wx + wy * wy + wz * wz).sqrt(),
            max_relative = 1e-12
        );
    }
    Ok(())
}

#[test]
fn test_isotropic_equal_contributions() -> Result<()> {
    let grid = CornerPointGrid::uniform(
        (2, 2, 2),
        (10., 10., 10.),
        Point::new(0., 0., 0.),
        Permeability::isotropic(80.),
    )?;
    let calc = WellIndexCalculator::new(&grid);
    let blocks = calc.compute_well_blocks(Point::new(1., 2., 3.), Point::new(7., 8., 9.), 0.1)?;
    assert_eq!(blocks.len(), 1);
    let data = blocks[0].segment_data()[0];
    assert_relative_eq!(data.wx, data.wy, max_relative = 1e-12);
    assert_relative_eq!(data.wy, data.wz, max_relative = 1e-12);
    Ok(())
}

#[test]
fn test_tilted_cells() -> Result<()> {
    // Interfaces between the three cells lean with depth
    let bottom = [0., 10., 20., 30.];
    let top = [0., 12., 18., 30.];
    let mut corners = Vec::new();
    for i in 0..3 {
        let mut c = [Point::default(); 8];
        for (n, p) in c.iter_mut().enumerate() {
            let (di, dj, dk) = (n & 1, (n >> 1) & 1, (n >> 2) & 1);
            let x = if dk == 0 { bottom[i + di] } else { top[i + di] };
            *p = Point::new(x, 10. * dj as f64, 10. * dk as f64);
        }
        corners.push(c);
    }
    let grid = CornerPointGrid::from_cells((3, 1, 1), corners, vec![Permeability::isotropic(50.); 3])?;
    let calc = WellIndexCalculator::new(&grid);

    let heel = Point::new(1., 1., 1.);
    let toe = Point::new(29., 9., 9.);
    let blocks = calc.compute_well_blocks(heel, toe, 0.1)?;
    let indices: Vec<usize> = blocks.iter().map(|b| b.global_index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(is_contiguous(&blocks, heel, toe, 1e-6));
    assert_relative_eq!(total_length(&blocks), heel.distance(&toe), max_relative = 1e-9);

    // First exit lies on the leaning interface x = 10 + 0.2 z
    let exit = blocks[0].segments()[0].exit;
    assert_relative_eq!(exit.x, 10. + 0.2 * exit.z, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_heterogeneous_permeability() -> Result<()> {
    let mut grid = row_of_three()?;
    grid.set_permeability(1, Permeability::new(100., 400., 25.))?;
    let calc = WellIndexCalculator::new(&grid);
    let blocks = calc.compute_well_blocks(Point::new(0., 0., 0.), Point::new(30., 0., 0.), 0.1)?;

    let expected = dir_well_index(10., 10., 10., 400., 25., 0.1);
    assert_relative_eq!(blocks[1].well_index(), expected, max_relative = 1e-9);
    // sqrt(400 * 25) = 100, only the equivalent radius changes
    assert!(blocks[1].well_index() != blocks[0].well_index());
    Ok(())
}

#[test]
fn test_zero_permeability_fails() -> Result<()> {
    let mut grid = row_of_three()?;
    grid.set_permeability(2, Permeability::new(100., 0., 100.))?;
    let calc = WellIndexCalculator::new(&grid);
    let result = calc.compute_well_blocks(Point::new(0., 0., 0.), Point::new(30., 0., 0.), 0.1);
    assert!(matches!(
        result,
        Err(WellIndexError::NumericDomain { cell: 2, .. })
    ));
    Ok(())
}

#[test]
fn test_cap_exceeded() -> Result<()> {
    let grid = CornerPointGrid::uniform(
        (10, 1, 1),
        (1., 1., 1.),
        Point::new(0., 0., 0.),
        Permeability::isotropic(10.),
    )?;
    let mut config = WellIndexConfig::default();
    config.max_intersected_cells = 5;
    let calc = WellIndexCalculator::with_config(&grid, config)?;
    let result = calc.compute_well_blocks(Point::new(0.5, 0.5, 0.5), Point::new(9.5, 0.5, 0.5), 0.05);
    assert!(matches!(
        result,
        Err(WellIndexError::TraversalOverflow { limit: 5 })
    ));
    Ok(())
}

/// Grid whose cells all cover the same box. Every point except the toe
/// resolves to a cell that is never the toe cell.
struct CyclicGrid {
    cells: Vec<Cell>,
    heel: Point,
    toe: Point,
}

impl CyclicGrid {
    fn new(heel: Point, toe: Point) -> Result<Self> {
        let cells = (0..3)
            .map(|i| {
                Cell::from_box(
                    i,
                    (i, 0, 0),
                    Point::new(0., 0., 0.),
                    (10., 10., 10.),
                    Permeability::isotropic(1.),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { cells, heel, toe })
    }
}

impl Grid for CyclicGrid {
    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell(&self, global_index: usize) -> Option<&Cell> {
        self.cells.get(global_index)
    }

    fn cell_enclosing_point(&self, point: Point, _candidates: Option<&[usize]>) -> Option<&Cell> {
        if point.is_close(&self.heel) {
            self.cells.first()
        } else if point.is_close(&self.toe) {
            self.cells.last()
        } else {
            self.cells.get(1)
        }
    }

    fn bounding_box_cell_indices(&self, _bbox: &BoundingBox) -> Vec<usize> {
        (0..self.cells.len()).collect()
    }
}

#[test]
fn test_cyclic_grid_overflows_instead_of_hanging() -> Result<()> {
    let heel = Point::new(1., 5., 5.);
    let toe = Point::new(9., 5., 5.);
    let grid = CyclicGrid::new(heel, toe)?;
    let calc = WellIndexCalculator::new(&grid);
    let result = calc.compute_well_blocks(heel, toe, 0.1);
    assert!(matches!(
        result,
        Err(WellIndexError::TraversalOverflow { limit: 500 })
    ));
    Ok(())
}

#[test]
fn test_degenerate_paths() -> Result<()> {
    let grid = row_of_three()?;
    let calc = WellIndexCalculator::new(&grid);
    let p = Point::new(5., 0., 0.);
    assert!(matches!(
        calc.compute_well_blocks(p, p, 0.1),
        Err(WellIndexError::DegenerateInput { .. })
    ));
    assert!(matches!(
        calc.compute_well_blocks(p, Point::new(25., 0., 0.), -0.1),
        Err(WellIndexError::DegenerateInput { .. })
    ));
    assert!(matches!(
        calc.compute_well_blocks(p, Point::new(25., 50., 0.), 0.1),
        Err(WellIndexError::PointOutsideGrid { .. })
    ));
    Ok(())
}
