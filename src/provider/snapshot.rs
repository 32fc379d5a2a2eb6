//! Frozen HF snapshot: the file-backed Integral Provider
//!
//! A snapshot freezes everything an external quantum-chemistry code produced
//! for one system: geometry, one-electron matrices, the electron-repulsion
//! tensor and the converged SCF result. Snapshots are reference data read
//! from disk; the pipeline never recomputes any of it.

use super::{HfSolution, IntegralProvider, MolecularSystem};
use crate::error::Mp2Error;
use nalgebra::{DMatrix, DVector, Vector3};
use ndarray::Array4;
use periodic_table_on_an_enum::Element;
use serde::{Deserialize, Serialize};

/// Serialized form of a frozen HF calculation
#[derive(Debug, Deserialize, Serialize)]
pub struct HfSnapshot {
    pub system: SnapshotSystem,

    /// Number of AO basis functions N
    pub num_basis: usize,

    /// SCF convergence flag
    pub converged: bool,

    /// HF total energy in au
    pub hf_energy: f64,

    /// Orbital energies in the canonical HF ordering
    pub orbital_energies: Vec<f64>,

    /// MO coefficients; row mu holds C[mu, p] for every MO p
    pub mo_coefficients: Vec<Vec<f64>>,

    /// Orbital occupation numbers
    pub mo_occupations: Vec<f64>,

    pub overlap: Vec<Vec<f64>>,
    pub kinetic: Vec<Vec<f64>>,
    pub nuclear_attraction: Vec<Vec<f64>>,

    /// Electron-repulsion tensor flattened row-major over (mu, nu, rho, sigma)
    pub eri: Vec<f64>,
}

/// Geometry block of a snapshot
#[derive(Debug, Deserialize, Serialize)]
pub struct SnapshotSystem {
    pub atoms: Vec<SnapshotAtom>,
    pub basis: String,
}

/// Atomic position entry of a snapshot
#[derive(Debug, Deserialize, Serialize)]
pub struct SnapshotAtom {
    pub element: String,
    pub coords: [f64; 3],
}

impl HfSnapshot {
    /// Check the internal consistency of a freshly deserialized snapshot
    pub fn validate(&self) -> Result<(), Mp2Error> {
        let n = self.num_basis;
        if self.orbital_energies.len() != n {
            return Err(Mp2Error::MalformedSnapshot(format!(
                "expected {} orbital energies, found {}",
                n,
                self.orbital_energies.len()
            )));
        }
        if self.mo_occupations.len() != n {
            return Err(Mp2Error::MalformedSnapshot(format!(
                "expected {} occupation numbers, found {}",
                n,
                self.mo_occupations.len()
            )));
        }
        check_square(&self.mo_coefficients, n, "mo_coefficients")?;
        check_square(&self.overlap, n, "overlap")?;
        check_square(&self.kinetic, n, "kinetic")?;
        check_square(&self.nuclear_attraction, n, "nuclear_attraction")?;
        if self.eri.len() != n * n * n * n {
            return Err(Mp2Error::MalformedSnapshot(format!(
                "ERI tensor has {} entries, expected {}^4 = {}",
                self.eri.len(),
                n,
                n * n * n * n
            )));
        }
        for atom in &self.system.atoms {
            if Element::from_symbol(&atom.element).is_none() {
                return Err(Mp2Error::MalformedSnapshot(format!(
                    "unknown element symbol: {}",
                    atom.element
                )));
            }
        }
        Ok(())
    }
}

fn check_square(rows: &[Vec<f64>], n: usize, name: &str) -> Result<(), Mp2Error> {
    if rows.len() != n || rows.iter().any(|row| row.len() != n) {
        return Err(Mp2Error::MalformedSnapshot(format!(
            "{} is not a {}x{} matrix",
            name, n, n
        )));
    }
    Ok(())
}

/// Integral provider backed by a validated [`HfSnapshot`]
#[derive(Debug)]
pub struct SnapshotProvider {
    snapshot: HfSnapshot,
    system: MolecularSystem,
}

impl SnapshotProvider {
    /// Build a provider from a snapshot, validating it first
    pub fn new(snapshot: HfSnapshot) -> Result<Self, Mp2Error> {
        snapshot.validate()?;

        let mut elements = Vec::new();
        let mut coords = Vec::new();
        for atom in &snapshot.system.atoms {
            let element = Element::from_symbol(&atom.element).ok_or_else(|| {
                Mp2Error::MalformedSnapshot(format!("unknown element symbol: {}", atom.element))
            })?;
            elements.push(element);
            coords.push(Vector3::new(atom.coords[0], atom.coords[1], atom.coords[2]));
        }
        let system = MolecularSystem {
            elements,
            coords,
            basis_name: snapshot.system.basis.clone(),
        };

        Ok(SnapshotProvider { snapshot, system })
    }

    fn matrix_from(rows: &[Vec<f64>]) -> DMatrix<f64> {
        let n = rows.len();
        DMatrix::from_fn(n, n, |i, j| rows[i][j])
    }
}

impl IntegralProvider for SnapshotProvider {
    fn system(&self) -> &MolecularSystem {
        &self.system
    }

    fn num_basis(&self) -> usize {
        self.snapshot.num_basis
    }

    fn overlap(&self) -> DMatrix<f64> {
        Self::matrix_from(&self.snapshot.overlap)
    }

    fn kinetic(&self) -> DMatrix<f64> {
        Self::matrix_from(&self.snapshot.kinetic)
    }

    fn nuclear_attraction(&self) -> DMatrix<f64> {
        Self::matrix_from(&self.snapshot.nuclear_attraction)
    }

    fn electron_repulsion(&self) -> Array4<f64> {
        let n = self.snapshot.num_basis;
        Array4::from_shape_vec((n, n, n, n), self.snapshot.eri.clone())
            .expect("ERI length was validated against num_basis^4")
    }

    fn hf_solution(&self) -> HfSolution {
        HfSolution {
            converged: self.snapshot.converged,
            energy: self.snapshot.hf_energy,
            orbital_energies: DVector::from_vec(self.snapshot.orbital_energies.clone()),
            coefficients: Self::matrix_from(&self.snapshot.mo_coefficients),
            occupations: DVector::from_vec(self.snapshot.mo_occupations.clone()),
        }
    }
}
