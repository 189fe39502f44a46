use anyhow::{Result, bail};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use wellindex::io::{GridSpec, WellCase, WellReport, WellSpec, read_case, run_case, write_report};
use wellindex::{Permeability, Point, WellIndexConfig};

/// Computes the grid cells crossed by well paths and their well indices.
///
/// Either pass a JSON case file, or describe a uniform grid and a single
/// straight well on the command line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON case file
    case: Option<PathBuf>,

    /// Write the report as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of cells nx,ny,nz
    #[arg(long, value_delimiter = ',', default_values_t = [10usize, 10, 1])]
    dims: Vec<usize>,

    /// Cell size dx,dy,dz
    #[arg(long, value_delimiter = ',', default_values_t = [10.0, 10.0, 10.0])]
    cell_size: Vec<f64>,

    /// Grid origin x,y,z
    #[arg(long, value_delimiter = ',', default_values_t = [0.0, 0.0, 0.0])]
    origin: Vec<f64>,

    /// Permeability kx,ky,kz (mD)
    #[arg(long, value_delimiter = ',', default_values_t = [100.0, 100.0, 100.0])]
    perm: Vec<f64>,

    /// Heel x,y,z
    #[arg(long, value_delimiter = ',')]
    heel: Option<Vec<f64>>,

    /// Toe x,y,z
    #[arg(long, value_delimiter = ',')]
    toe: Option<Vec<f64>>,

    /// Wellbore radius
    #[arg(long, default_value_t = 0.1)]
    radius: f64,
}

fn triple<T: Copy>(name: &str, v: &[T]) -> Result<[T; 3]> {
    match v {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => bail!("--{name} takes exactly 3 comma-separated values, got {}", v.len()),
    }
}

fn point(name: &str, v: &[f64]) -> Result<Point> {
    Ok(Point::from(triple(name, v)?))
}

fn case_from_args(args: &Args) -> Result<WellCase> {
    let (Some(heel), Some(toe)) = (&args.heel, &args.toe) else {
        bail!("Either a case file or both --heel and --toe are required");
    };
    let [kx, ky, kz] = triple("perm", &args.perm)?;
    Ok(WellCase {
        grid: GridSpec::Uniform {
            dims: triple("dims", &args.dims)?,
            cell_size: triple("cell-size", &args.cell_size)?,
            origin: point("origin", &args.origin)?,
            permeability: Permeability::new(kx, ky, kz),
        },
        wells: vec![WellSpec {
            name: "well".to_string(),
            points: vec![point("heel", heel)?, point("toe", toe)?],
            radius: args.radius,
        }],
        config: WellIndexConfig::default(),
    })
}

fn print_report(report: &WellReport) {
    println!(
        "{}: {} cells, length {:.3}, total well index {:.6}",
        report.name,
        report.cells.len(),
        report.length,
        report.total_well_index
    );
    println!(
        "{:>8} {:>5} {:>5} {:>5} {:>10} {:>10} {:>10} {:>14}",
        "cell", "i", "j", "k", "Lx", "Ly", "Lz", "well index"
    );
    for cell in &report.cells {
        let (lx, ly, lz) = cell.segments.iter().fold((0., 0., 0.), |(x, y, z), s| {
            (x + s.data.lx, y + s.data.ly, z + s.data.lz)
        });
        println!(
            "{:>8} {:>5} {:>5} {:>5} {:>10.3} {:>10.3} {:>10.3} {:>14.6}",
            cell.global_index, cell.ijk[0], cell.ijk[1], cell.ijk[2], lx, ly, lz, cell.well_index
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let case = match &args.case {
        Some(path) => read_case(path)?,
        None => case_from_args(&args)?,
    };
    info!("Processing {} well(s)", case.wells.len());

    let reports = run_case(&case)?;
    for report in &reports {
        print_report(report);
    }

    if let Some(path) = &args.output {
        write_report(path, &reports)?;
        info!("Report written to {}", path.display());
    }
    Ok(())
}
