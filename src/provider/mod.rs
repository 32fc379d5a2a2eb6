//! Integral Provider interface
//!
//! The MP2 core treats everything upstream of the integral transformation --
//! geometry, basis set, one- and two-electron integrals and the HF SCF
//! solution -- as an opaque collaborator behind this interface. The shipped
//! implementation reads a frozen snapshot of that data from disk.

mod snapshot;

pub use snapshot::{HfSnapshot, SnapshotAtom, SnapshotProvider, SnapshotSystem};

use crate::error::Mp2Error;
use nalgebra::{DMatrix, DVector, Vector3};
use ndarray::Array4;
use periodic_table_on_an_enum::Element;

/// Molecular system specification: atoms, positions and basis-set name
#[derive(Debug, Clone)]
pub struct MolecularSystem {
    pub elements: Vec<Element>,
    pub coords: Vec<Vector3<f64>>,
    pub basis_name: String,
}

impl MolecularSystem {
    /// Total electron count of the neutral system
    pub fn num_electrons(&self) -> usize {
        self.elements
            .iter()
            .map(|e| e.get_atomic_number() as usize)
            .sum()
    }
}

/// Converged Hartree-Fock result consumed by the MP2 pipeline
#[derive(Debug, Clone)]
pub struct HfSolution {
    /// SCF convergence flag
    pub converged: bool,

    /// HF total energy in au
    pub energy: f64,

    /// Orbital energies, ascending in the canonical HF ordering
    pub orbital_energies: DVector<f64>,

    /// MO coefficients; column p expands MO p in the AO basis
    pub coefficients: DMatrix<f64>,

    /// Orbital occupation numbers
    pub occupations: DVector<f64>,
}

impl HfSolution {
    /// Fail fast when the upstream SCF did not converge; MO data from an
    /// unconverged SCF is not meaningful MP2 input.
    pub fn ensure_converged(&self) -> Result<(), Mp2Error> {
        if self.converged {
            Ok(())
        } else {
            Err(Mp2Error::Convergence {
                energy: self.energy,
            })
        }
    }

    /// Number of occupied orbitals implied by the occupation numbers
    pub fn num_occupied(&self) -> usize {
        self.occupations.iter().filter(|&&occ| occ > 0.5).count()
    }
}

/// Source of AO integrals and the converged HF reference for one system.
///
/// All data is treated as immutable input; the pipeline never writes back.
pub trait IntegralProvider {
    /// The molecular system this provider describes
    fn system(&self) -> &MolecularSystem;

    /// Number of AO basis functions N
    fn num_basis(&self) -> usize;

    /// AO overlap matrix (N x N)
    fn overlap(&self) -> DMatrix<f64>;

    /// AO kinetic-energy matrix (N x N)
    fn kinetic(&self) -> DMatrix<f64>;

    /// AO nuclear-attraction matrix (N x N)
    fn nuclear_attraction(&self) -> DMatrix<f64>;

    /// AO electron-repulsion tensor (N x N x N x N)
    fn electron_repulsion(&self) -> Array4<f64>;

    /// The converged HF solution
    fn hf_solution(&self) -> HfSolution;
}
