//! Core MP2 energy evaluator

use crate::error::Mp2Error;
use crate::provider::HfSolution;
use nalgebra::DVector;
use ndarray::Array4;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Default tolerance below which an orbital-energy denominator is treated as
/// degenerate
pub const DEFAULT_DEGENERACY_THRESHOLD: f64 = 1e-8;

/// MP2 energy evaluator
///
/// Holds the MO-basis integrals and orbital data from a converged HF
/// calculation and computes the second-order correlation energy.
#[derive(Debug)]
pub struct Mp2 {
    /// Number of basis functions N
    pub num_basis: usize,

    /// Number of occupied orbitals; indices < nocc are occupied
    pub nocc: usize,

    /// Number of virtual orbitals
    pub num_virt: usize,

    /// Two-electron integrals in the MO basis
    pub g2e_mo: Array4<f64>,

    /// Orbital energies (from HF)
    pub orbital_energies: DVector<f64>,

    /// HF total energy in au
    pub hf_energy: f64,

    /// Denominators smaller than this in absolute value are degenerate
    pub degeneracy_threshold: f64,

    /// MP2 correlation energy (calculated)
    pub correlation_energy: Option<f64>,
}

impl Mp2 {
    /// Create a new MP2 evaluator from MO-basis data
    ///
    /// Fails when the tensor shape disagrees with the orbital-energy count or
    /// when `nocc` exceeds the basis size.
    pub fn new(
        g2e_mo: Array4<f64>,
        orbital_energies: DVector<f64>,
        nocc: usize,
        hf_energy: f64,
    ) -> Result<Self, Mp2Error> {
        let num_basis = orbital_energies.len();
        if g2e_mo.shape() != [num_basis; 4] {
            return Err(Mp2Error::ShapeMismatch {
                rows: num_basis,
                cols: num_basis,
                tensor_shape: g2e_mo.shape().to_vec(),
            });
        }
        if nocc > num_basis {
            return Err(Mp2Error::OccupationOutOfRange { nocc, num_basis });
        }

        info!("MP2 initialization:");
        info!("  Number of basis functions: {}", num_basis);
        info!("  Number of occupied orbitals: {}", nocc);
        info!("  Number of virtual orbitals: {}", num_basis - nocc);

        Ok(Mp2 {
            num_basis,
            nocc,
            num_virt: num_basis - nocc,
            g2e_mo,
            orbital_energies,
            hf_energy,
            degeneracy_threshold: DEFAULT_DEGENERACY_THRESHOLD,
            correlation_energy: None,
        })
    }

    /// Build an evaluator from a converged HF solution and the transformed
    /// integrals. `nocc` falls back to the solution's occupation numbers when
    /// not given.
    pub fn from_solution(
        solution: &HfSolution,
        g2e_mo: Array4<f64>,
        nocc: Option<usize>,
    ) -> Result<Self, Mp2Error> {
        solution.ensure_converged()?;
        let nocc = nocc.unwrap_or_else(|| solution.num_occupied());
        Self::new(
            g2e_mo,
            solution.orbital_energies.clone(),
            nocc,
            solution.energy,
        )
    }

    /// Compute the MP2 correlation energy.
    ///
    /// Sums every (i, j, a, b) term exactly once. Occupied indices are spread
    /// over a rayon worker pool; each term is accumulated by exactly one
    /// summation, so no output cell is raced. `nocc = 0` or `nocc = N` is an
    /// empty sum, not an error.
    pub fn calculate_energy(&mut self) -> Result<f64, Mp2Error> {
        if self.nocc == 0 || self.num_virt == 0 {
            info!("Empty occupied or virtual block - MP2 correlation energy is zero.");
            self.correlation_energy = Some(0.0);
            return Ok(0.0);
        }

        let start = Instant::now();
        let n = self.num_basis;
        let nocc = self.nocc;
        let g = &self.g2e_mo;
        let eps = &self.orbital_energies;
        let threshold = self.degeneracy_threshold;

        let energy = (0..nocc)
            .into_par_iter()
            .map(|i| {
                let mut partial = 0.0;
                for j in 0..nocc {
                    for a in nocc..n {
                        for b in nocc..n {
                            let denominator = eps[i] + eps[j] - eps[a] - eps[b];
                            if denominator.abs() < threshold {
                                return Err(Mp2Error::DegenerateOrbitals {
                                    i,
                                    j,
                                    a,
                                    b,
                                    denominator,
                                });
                            }
                            let ia_jb = g[[i, a, j, b]];
                            let ib_ja = g[[i, b, j, a]];
                            partial += ia_jb * (2.0 * ia_jb - ib_ja) / denominator;
                        }
                    }
                }
                Ok(partial)
            })
            .try_reduce(|| 0.0, |x, y| Ok(x + y))?;

        debug!(
            terms = nocc * nocc * self.num_virt * self.num_virt,
            elapsed = ?start.elapsed(),
            "MP2 summation finished"
        );
        info!("MP2 correlation energy: {:.12} au", energy);
        self.correlation_energy = Some(energy);
        Ok(energy)
    }

    /// Total MP2 energy, available once the correlation energy is calculated
    pub fn total_energy(&self) -> Option<f64> {
        self.correlation_energy.map(|corr| corr + self.hf_energy)
    }

    /// Print a summary of the MP2 calculation
    pub fn print_summary(&self) {
        info!("===========================================");
        info!("        MP2 Calculation Summary");
        info!("===========================================");
        info!("Hartree-Fock energy:    {:20.15} au", self.hf_energy);
        if let Some(corr) = self.correlation_energy {
            info!("MP2 correlation energy: {:20.15} au", corr);
            info!("Total MP2 energy:       {:20.15} au", corr + self.hf_energy);
        } else {
            info!("MP2 correlation energy not yet calculated.");
        }
        info!("===========================================");
    }
}
