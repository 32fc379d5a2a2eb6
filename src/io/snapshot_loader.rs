//! HF snapshot loading utilities

use crate::provider::HfSnapshot;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;

/// Load a frozen HF snapshot from a YAML file and validate it
pub fn load_snapshot(path: &str) -> Result<HfSnapshot> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read HF snapshot file: {}", path))?;
    let snapshot: HfSnapshot = serde_yml::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse HF snapshot file: {}", path))?;
    snapshot.validate()?;
    Ok(snapshot)
}
