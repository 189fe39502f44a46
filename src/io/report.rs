//! Per-well reports of intersected cells and well indices.

use crate::grid::Grid;
use crate::io::case::WellCase;
use crate::well::{
    HasSegments, IntersectedCell, Segment, SegmentData, WellIndexCalculator, total_length,
    total_well_index,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    #[serde(flatten)]
    pub segment: Segment,
    #[serde(flatten)]
    pub data: SegmentData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellReport {
    pub global_index: usize,
    pub ijk: [usize; 3],
    pub well_index: f64,
    pub well_index_xyz: [f64; 3],
    pub segments: Vec<SegmentReport>,
}

impl CellReport {
    pub fn new(cell: &IntersectedCell<'_>) -> Self {
        let (i, j, k) = cell.grid_cell().ijk;
        let (wx, wy, wz) = cell.directional_well_index();
        let segments = cell
            .segments()
            .iter()
            .zip(cell.segment_data())
            .map(|(segment, data)| SegmentReport {
                segment: *segment,
                data: *data,
            })
            .collect();
        Self {
            global_index: cell.global_index(),
            ijk: [i, j, k],
            well_index: cell.well_index(),
            well_index_xyz: [wx, wy, wz],
            segments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellReport {
    pub name: String,
    pub radius: f64,
    pub length: f64,
    pub total_well_index: f64,
    pub cells: Vec<CellReport>,
}

impl WellReport {
    pub fn new(name: &str, radius: f64, cells: &[IntersectedCell<'_>]) -> Self {
        Self {
            name: name.to_string(),
            radius,
            length: total_length(cells),
            total_well_index: total_well_index(cells),
            cells: cells.iter().map(CellReport::new).collect(),
        }
    }
}

/// Computes the reports of all wells in a case.
pub fn run_case(case: &WellCase) -> Result<Vec<WellReport>> {
    let grid = case.grid.build().context("Failed to build grid")?;
    run_wells(&grid, case)
}

fn run_wells<G: Grid + ?Sized>(grid: &G, case: &WellCase) -> Result<Vec<WellReport>> {
    let calculator = WellIndexCalculator::with_config(grid, case.config.clone())?;
    case.wells
        .iter()
        .map(|well| {
            let cells = calculator
                .compute_well_blocks_along(&well.points, well.radius)
                .with_context(|| format!("Failed to compute well blocks of {}", well.name))?;
            Ok(WellReport::new(&well.name, well.radius, &cells))
        })
        .collect()
}

/// Writes reports to a JSON file.
pub fn write_report(path: &Path, reports: &[WellReport]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, reports)
        .with_context(|| format!("Failed to serialize report to: {}", path.display()))?;

    Ok(())
}

pub fn report_to_string(reports: &[WellReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("Failed to serialize report to string")
}
