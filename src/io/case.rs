//! JSON case files describing a grid, the well paths to intersect with it and
//! optional calculation settings.

use crate::Point;
use crate::config::WellIndexConfig;
use crate::grid::{CornerPointGrid, Permeability};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Grid description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridSpec {
    /// `dims` cells of equal size, minimum corner at `origin`
    Uniform {
        dims: [usize; 3],
        cell_size: [f64; 3],
        #[serde(default)]
        origin: Point,
        permeability: Permeability,
    },
    /// Node coordinates along each axis
    Rectilinear {
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        permeability: Permeability,
    },
}

impl GridSpec {
    pub fn build(&self) -> crate::error::Result<CornerPointGrid> {
        match self {
            GridSpec::Uniform {
                dims,
                cell_size,
                origin,
                permeability,
            } => CornerPointGrid::uniform(
                (dims[0], dims[1], dims[2]),
                (cell_size[0], cell_size[1], cell_size[2]),
                *origin,
                *permeability,
            ),
            GridSpec::Rectilinear {
                x,
                y,
                z,
                permeability,
            } => CornerPointGrid::from_coordinates(x, y, z, *permeability),
        }
    }
}

/// Well trajectory: straight legs between consecutive points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellSpec {
    pub name: String,
    pub points: Vec<Point>,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellCase {
    pub grid: GridSpec,
    pub wells: Vec<WellSpec>,
    #[serde(default)]
    pub config: WellIndexConfig,
}

/// Reads a case from a JSON file.
pub fn read_case(path: &Path) -> Result<WellCase> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let case: WellCase = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize case from: {}", path.display()))?;

    Ok(case)
}

/// Deserializes a case from a JSON string.
pub fn case_from_str(json: &str) -> Result<WellCase> {
    serde_json::from_str(json).context("Failed to deserialize case from string")
}
