//! Command-line argument parsing for MP2 calculations

use clap::Parser;

/// Canonical MP2 calculation with YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override the integral transformation strategy (naive, factored or vectorized)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Override the number of occupied orbitals
    #[arg(long)]
    pub nocc: Option<usize>,

    /// Override the degenerate-denominator threshold
    #[arg(long)]
    pub degeneracy_threshold: Option<f64>,

    /// Override output file (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}
