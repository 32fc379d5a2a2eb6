//! Error types for the MP2 pipeline

use thiserror::Error;

/// The error type for all fallible operations in the `rust_mp2` library.
///
/// The computation is deterministic, so nothing is retried and no partial
/// results are returned; every failure propagates to the caller.
#[derive(Error, Debug)]
pub enum Mp2Error {
    /// The coefficient matrix dimension disagrees with the shape of the
    /// rank-4 tensor. Raised before any computation starts.
    #[error("coefficient matrix is {rows}x{cols} but the tensor has shape {tensor_shape:?}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        tensor_shape: Vec<usize>,
    },

    /// The upstream Hartree-Fock calculation did not converge. MP2 on
    /// non-stationary orbitals is meaningless, so this is fatal.
    #[error("Hartree-Fock reference did not converge (last energy {energy:.10} au)")]
    Convergence { energy: f64 },

    /// An occupied/virtual orbital-energy denominator is within numerical
    /// tolerance of zero; the perturbative correction diverges there.
    #[error(
        "near-degenerate denominator {denominator:.3e} au for orbitals (i={i}, j={j}, a={a}, b={b})"
    )]
    DegenerateOrbitals {
        i: usize,
        j: usize,
        a: usize,
        b: usize,
        denominator: f64,
    },

    /// The requested occupied orbital count violates 0 <= nocc <= N.
    #[error("occupied orbital count {nocc} exceeds the basis size {num_basis}")]
    OccupationOutOfRange { nocc: usize, num_basis: usize },

    /// The HF snapshot file is structurally inconsistent.
    #[error("malformed HF snapshot: {0}")]
    MalformedSnapshot(String),
}
