//! JSON input cases and output reports.

pub mod case;
pub mod report;

pub use case::{GridSpec, WellCase, WellSpec, case_from_str, read_case};
pub use report::{CellReport, WellReport, report_to_string, run_case, write_report};
