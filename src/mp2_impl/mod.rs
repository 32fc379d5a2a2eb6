//! MP2 (Moller-Plesset perturbation theory, second order) energy evaluation
//!
//! Consumes MO-basis two-electron integrals, orbital energies and the HF
//! reference energy, and produces the second-order correlation energy:
//!
//! E_MP2 = sum_{i,j in occ} sum_{a,b in virt}
//!         (ia|jb) * (2*(ia|jb) - (ib|ja)) / (e_i + e_j - e_a - e_b)
//!
//! where occupied orbitals are those with index < nocc and the rest are
//! virtual. The denominator is strictly negative for a correctly ordered,
//! non-degenerate reference; denominators within tolerance of zero are
//! surfaced as [`crate::error::Mp2Error::DegenerateOrbitals`] instead of
//! silently producing near-infinite terms.

mod mp2;
#[cfg(test)]
mod tests;

pub use mp2::{Mp2, DEFAULT_DEGENERACY_THRESHOLD};
