//! Core integral transformation implementation

use crate::error::Mp2Error;
use nalgebra::DMatrix;
use ndarray::{Array2, Array4};
use std::time::Instant;
use tracing::debug;

/// A strategy for transforming the rank-4 ERI tensor into the MO basis.
///
/// Every implementation is a pure function of `(g2e_ao, coeffs)`; the only
/// side effects are timing and operation-count diagnostics emitted through
/// `tracing`.
pub trait IntegralTransform {
    /// Strategy name used for selection and logging
    fn name(&self) -> &'static str;

    /// Transform `g2e_ao` into the MO basis defined by `coeffs`.
    ///
    /// Column p of `coeffs` expands MO p in the AO basis. Fails with
    /// [`Mp2Error::ShapeMismatch`] before any computation when the matrix
    /// dimension disagrees with any axis of the tensor.
    fn transform(
        &self,
        g2e_ao: &Array4<f64>,
        coeffs: &DMatrix<f64>,
    ) -> Result<Array4<f64>, Mp2Error>;

    /// Multiply-accumulate operations this strategy performs for a basis of
    /// size n. Used by the complexity regression tests.
    fn operation_count(&self, n: usize) -> u64;
}

/// Check that `coeffs` is square and matches every axis of `g2e_ao`
fn check_shapes(g2e_ao: &Array4<f64>, coeffs: &DMatrix<f64>) -> Result<usize, Mp2Error> {
    let n = coeffs.nrows();
    if coeffs.ncols() != n || g2e_ao.shape() != [n, n, n, n] {
        return Err(Mp2Error::ShapeMismatch {
            rows: coeffs.nrows(),
            cols: coeffs.ncols(),
            tensor_shape: g2e_ao.shape().to_vec(),
        });
    }
    Ok(n)
}

/// Reference O(N^8) transformation: the defining contraction, accumulated in
/// full for every output index tuple.
pub struct NaiveTransform;

impl IntegralTransform for NaiveTransform {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn transform(
        &self,
        g2e_ao: &Array4<f64>,
        coeffs: &DMatrix<f64>,
    ) -> Result<Array4<f64>, Mp2Error> {
        let n = check_shapes(g2e_ao, coeffs)?;
        let start = Instant::now();
        let mut g2e_mo = Array4::<f64>::zeros((n, n, n, n));
        let mut ops: u64 = 0;

        for p in 0..n {
            for q in 0..n {
                for r in 0..n {
                    for s in 0..n {
                        let mut sum = 0.0;
                        for mu in 0..n {
                            for nu in 0..n {
                                for rho in 0..n {
                                    for sigma in 0..n {
                                        sum += coeffs[(mu, p)]
                                            * coeffs[(nu, q)]
                                            * coeffs[(rho, r)]
                                            * coeffs[(sigma, s)]
                                            * g2e_ao[[mu, nu, rho, sigma]];
                                        ops += 1;
                                    }
                                }
                            }
                        }
                        g2e_mo[[p, q, r, s]] = sum;
                    }
                }
            }
        }

        debug_assert_eq!(ops, self.operation_count(n));
        debug!(
            strategy = self.name(),
            n,
            ops,
            elapsed = ?start.elapsed(),
            "AO to MO transformation finished"
        );
        Ok(g2e_mo)
    }

    fn operation_count(&self, n: usize) -> u64 {
        (n as u64).pow(8)
    }
}

/// Factored O(N^5) transformation: four chained quarter transforms, each
/// contracting exactly one AO index.
///
/// Intermediates are dropped as soon as the next quarter is complete, so the
/// working set never exceeds two N^4 tensors plus the input.
pub struct FactoredTransform;

impl IntegralTransform for FactoredTransform {
    fn name(&self) -> &'static str {
        "factored"
    }

    fn transform(
        &self,
        g2e_ao: &Array4<f64>,
        coeffs: &DMatrix<f64>,
    ) -> Result<Array4<f64>, Mp2Error> {
        let n = check_shapes(g2e_ao, coeffs)?;
        let start = Instant::now();
        let mut ops: u64 = 0;

        // Quarter 1: g1[mu,nu,rho,s] = sum_sigma g2e_ao[mu,nu,rho,sigma] C[sigma,s]
        let mut g1 = Array4::<f64>::zeros((n, n, n, n));
        for mu in 0..n {
            for nu in 0..n {
                for rho in 0..n {
                    for sigma in 0..n {
                        let ao = g2e_ao[[mu, nu, rho, sigma]];
                        for s in 0..n {
                            g1[[mu, nu, rho, s]] += ao * coeffs[(sigma, s)];
                            ops += 1;
                        }
                    }
                }
            }
        }

        // Quarter 2: g2[mu,nu,r,s] = sum_rho g1[mu,nu,rho,s] C[rho,r]
        let mut g2 = Array4::<f64>::zeros((n, n, n, n));
        for mu in 0..n {
            for nu in 0..n {
                for rho in 0..n {
                    for s in 0..n {
                        let quarter = g1[[mu, nu, rho, s]];
                        for r in 0..n {
                            g2[[mu, nu, r, s]] += quarter * coeffs[(rho, r)];
                            ops += 1;
                        }
                    }
                }
            }
        }
        drop(g1);

        // Quarter 3: g3[mu,q,r,s] = sum_nu g2[mu,nu,r,s] C[nu,q]
        let mut g3 = Array4::<f64>::zeros((n, n, n, n));
        for mu in 0..n {
            for nu in 0..n {
                for r in 0..n {
                    for s in 0..n {
                        let half = g2[[mu, nu, r, s]];
                        for q in 0..n {
                            g3[[mu, q, r, s]] += half * coeffs[(nu, q)];
                            ops += 1;
                        }
                    }
                }
            }
        }
        drop(g2);

        // Quarter 4: g2e_mo[p,q,r,s] = sum_mu g3[mu,q,r,s] C[mu,p]
        let mut g2e_mo = Array4::<f64>::zeros((n, n, n, n));
        for mu in 0..n {
            for q in 0..n {
                for r in 0..n {
                    for s in 0..n {
                        let three_quarter = g3[[mu, q, r, s]];
                        for p in 0..n {
                            g2e_mo[[p, q, r, s]] += three_quarter * coeffs[(mu, p)];
                            ops += 1;
                        }
                    }
                }
            }
        }

        debug_assert_eq!(ops, self.operation_count(n));
        debug!(
            strategy = self.name(),
            n,
            ops,
            elapsed = ?start.elapsed(),
            "AO to MO transformation finished"
        );
        Ok(g2e_mo)
    }

    fn operation_count(&self, n: usize) -> u64 {
        4 * (n as u64).pow(5)
    }
}

/// Whole-tensor O(N^5) transformation: four matrix products against the
/// coefficient matrix, one tensor axis at a time.
pub struct VectorizedTransform;

impl IntegralTransform for VectorizedTransform {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn transform(
        &self,
        g2e_ao: &Array4<f64>,
        coeffs: &DMatrix<f64>,
    ) -> Result<Array4<f64>, Mp2Error> {
        let n = check_shapes(g2e_ao, coeffs)?;
        let start = Instant::now();
        let c = Array2::from_shape_fn((n, n), |(mu, p)| coeffs[(mu, p)]);

        // Each pass contracts the trailing axis with C and rotates the fresh
        // MO axis to the front, so four passes transform every axis and end
        // with the tensor back in (p, q, r, s) order.
        let mut g = g2e_ao.to_owned();
        for _ in 0..4 {
            let flat = g
                .into_shape((n * n * n, n))
                .expect("owned tensor is contiguous with n^4 elements");
            let mixed = flat.dot(&c);
            g = mixed
                .into_shape((n, n, n, n))
                .expect("matrix product has n^4 elements")
                .permuted_axes([3, 0, 1, 2])
                .as_standard_layout()
                .to_owned();
        }

        debug!(
            strategy = self.name(),
            n,
            ops = self.operation_count(n),
            elapsed = ?start.elapsed(),
            "AO to MO transformation finished"
        );
        Ok(g)
    }

    fn operation_count(&self, n: usize) -> u64 {
        4 * (n as u64).pow(5)
    }
}

/// Look up a transformation strategy by its configuration name
pub fn strategy_by_name(name: &str) -> Option<Box<dyn IntegralTransform>> {
    match name.to_lowercase().as_str() {
        "naive" => Some(Box::new(NaiveTransform)),
        "factored" => Some(Box::new(FactoredTransform)),
        "vectorized" => Some(Box::new(VectorizedTransform)),
        _ => None,
    }
}
