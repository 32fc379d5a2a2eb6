//! Configuration management for MP2 calculations
//!
//! This module handles the YAML run configuration, defaults and
//! command-line overrides.

mod args;

pub use args::Args;

use serde::{Deserialize, Serialize};

/// Main configuration structure for an MP2 run
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Path to the frozen HF snapshot supplying integrals and MO data
    pub snapshot: String,
    pub mp2: Option<Mp2Params>,
}

/// MP2-specific parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Mp2Params {
    pub strategy: Option<String>, // "naive", "factored" or "vectorized"
    pub nocc: Option<usize>,
    pub degeneracy_threshold: Option<f64>,
}

impl Default for Mp2Params {
    fn default() -> Self {
        Mp2Params {
            strategy: Some("vectorized".to_string()),
            nocc: None,
            degeneracy_threshold: Some(1e-8),
        }
    }
}

impl Mp2Params {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.strategy.is_none() {
            self.strategy = defaults.strategy;
        }
        if self.degeneracy_threshold.is_none() {
            self.degeneracy_threshold = defaults.degeneracy_threshold;
        }
        // nocc stays unset unless given; it falls back to the occupation
        // numbers of the HF solution at run time
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.mp2 = Some(self.mp2.take().unwrap_or_default().with_defaults());
        self
    }

    /// Get the integral transformation strategy name
    pub fn strategy(&self) -> String {
        self.mp2
            .as_ref()
            .and_then(|m| m.strategy.clone())
            .unwrap_or_else(|| "vectorized".to_string())
    }

    /// Get the configured occupied orbital count, if any
    pub fn nocc(&self) -> Option<usize> {
        self.mp2.as_ref().and_then(|m| m.nocc)
    }

    /// Get the degenerate-denominator threshold
    pub fn degeneracy_threshold(&self) -> f64 {
        self.mp2
            .as_ref()
            .and_then(|m| m.degeneracy_threshold)
            .unwrap_or(1e-8)
    }
}
