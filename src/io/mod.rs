//! Input/Output operations for MP2 calculations
//!
//! This module handles logging setup, HF snapshot loading and the final
//! energy report.

mod output;
mod snapshot_loader;

pub use output::{print_energy_report, setup_output};
pub use snapshot_loader::load_snapshot;
