pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod io;
pub mod well;

// Prelude
pub use config::WellIndexConfig;
pub use error::WellIndexError;
pub use geom::bboxes::BoundingBox;
pub use geom::face::Face;
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use grid::{Cell, CornerPointGrid, Grid, Permeability};
pub use well::{IntersectedCell, Segment, SegmentData, TraversedCell, WellIndexCalculator};
