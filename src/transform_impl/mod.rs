//! AO to MO two-electron integral transformation
//!
//! Converts the rank-4 electron-repulsion tensor from the atom-centered (AO)
//! basis into the molecular-orbital (MO) basis via the HF coefficient matrix:
//!
//! g2e_mo[p,q,r,s] = sum_{mu,nu,rho,sigma}
//!     C[mu,p] C[nu,q] C[rho,r] C[sigma,s] g2e_ao[mu,nu,rho,sigma]
//!
//! Three interchangeable strategies produce identical output up to
//! floating-point rounding:
//!
//! - [`NaiveTransform`]: the defining 8-index contraction evaluated directly,
//!   O(N^8). Correct by definition; serves as the reference oracle in tests
//!   and is intractable beyond trivial basis sizes.
//! - [`FactoredTransform`]: four sequential single-index contractions,
//!   O(N^5). Each quarter transform consumes the previous step's output;
//!   fusing steps or re-deriving a step from the raw AO tensor would
//!   reintroduce the O(N^8) cost.
//! - [`VectorizedTransform`]: the same factorization expressed as
//!   whole-tensor matrix products, one axis at a time. Fastest in practice,
//!   same asymptotic cost.

mod transform;

pub use transform::{
    strategy_by_name, FactoredTransform, IntegralTransform, NaiveTransform, VectorizedTransform,
};
