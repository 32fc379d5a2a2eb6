//! Tests for the MP2 energy evaluator

use super::Mp2;
use crate::error::Mp2Error;
use crate::provider::HfSolution;
use nalgebra::{DMatrix, DVector};
use ndarray::Array4;

fn two_level_solution(converged: bool) -> HfSolution {
    HfSolution {
        converged,
        energy: -1.25,
        orbital_energies: DVector::from_vec(vec![-0.5, 0.5]),
        coefficients: DMatrix::identity(2, 2),
        occupations: DVector::from_vec(vec![2.0, 0.0]),
    }
}

#[test]
fn nocc_zero_gives_zero_energy() {
    let n = 3;
    let g2e_mo = Array4::from_elem((n, n, n, n), 0.3);
    let eps = DVector::from_vec(vec![0.1, 0.2, 0.4]);
    let mut mp2 = Mp2::new(g2e_mo, eps, 0, -1.0).unwrap();
    assert_eq!(mp2.calculate_energy().unwrap(), 0.0);
    assert_eq!(mp2.total_energy(), Some(-1.0));
}

#[test]
fn nocc_equal_to_basis_size_gives_zero_energy() {
    let n = 3;
    let g2e_mo = Array4::from_elem((n, n, n, n), 0.3);
    let eps = DVector::from_vec(vec![-0.9, -0.6, -0.2]);
    let mut mp2 = Mp2::new(g2e_mo, eps, n, -1.0).unwrap();
    assert_eq!(mp2.calculate_energy().unwrap(), 0.0);
}

#[test]
fn two_level_system_has_the_closed_form_energy() {
    // One occupied, one virtual orbital: only the (i=0, a=1, j=0, b=1) term
    // enters, E = g[0,1,0,1]^2 / (2 e_0 - 2 e_1)
    let mut g2e_mo = Array4::zeros((2, 2, 2, 2));
    g2e_mo[[0, 1, 0, 1]] = 0.2;
    let eps = DVector::from_vec(vec![-0.5, 0.5]);

    let mut mp2 = Mp2::new(g2e_mo, eps, 1, -1.25).unwrap();
    let energy = mp2.calculate_energy().unwrap();
    let expected = 0.2 * 0.2 / -2.0;
    assert!((energy - expected).abs() < 1e-14);
    assert!((mp2.total_energy().unwrap() - (-1.25 + expected)).abs() < 1e-14);
}

#[test]
fn every_term_is_summed_exactly_once() {
    // Constant integrals and constant denominators make the sum countable:
    // nocc^2 * nvirt^2 terms of g^2 / d each
    let n = 4;
    let nocc = 2;
    let g = 0.1;
    let g2e_mo = Array4::from_elem((n, n, n, n), g);
    let eps = DVector::from_vec(vec![-1.0, -1.0, 1.0, 1.0]);

    let mut mp2 = Mp2::new(g2e_mo, eps, nocc, 0.0).unwrap();
    let energy = mp2.calculate_energy().unwrap();
    let expected = 16.0 * g * (2.0 * g - g) / -4.0;
    assert!((energy - expected).abs() < 1e-14);
}

#[test]
fn degenerate_denominator_is_surfaced() {
    // Occupied and virtual orbital at the same energy
    let g2e_mo = Array4::from_elem((2, 2, 2, 2), 0.1);
    let eps = DVector::from_vec(vec![0.3, 0.3]);

    let mut mp2 = Mp2::new(g2e_mo, eps, 1, -1.0).unwrap();
    let err = mp2.calculate_energy().unwrap_err();
    assert!(matches!(err, Mp2Error::DegenerateOrbitals { .. }));
    assert!(mp2.correlation_energy.is_none());
}

#[test]
fn occupation_out_of_range_is_rejected() {
    let g2e_mo = Array4::zeros((2, 2, 2, 2));
    let eps = DVector::from_vec(vec![-0.5, 0.5]);
    let err = Mp2::new(g2e_mo, eps, 3, -1.0).unwrap_err();
    assert!(matches!(
        err,
        Mp2Error::OccupationOutOfRange {
            nocc: 3,
            num_basis: 2
        }
    ));
}

#[test]
fn tensor_and_energy_dimensions_must_agree() {
    let g2e_mo = Array4::zeros((2, 2, 2, 2));
    let eps = DVector::from_vec(vec![-0.5, 0.1, 0.5]);
    let err = Mp2::new(g2e_mo, eps, 1, -1.0).unwrap_err();
    assert!(matches!(err, Mp2Error::ShapeMismatch { .. }));
}

#[test]
fn unconverged_reference_is_rejected() {
    let solution = two_level_solution(false);
    let g2e_mo = Array4::zeros((2, 2, 2, 2));
    let err = Mp2::from_solution(&solution, g2e_mo, Some(1)).unwrap_err();
    assert!(matches!(err, Mp2Error::Convergence { .. }));
}

#[test]
fn nocc_defaults_to_the_occupation_numbers() {
    let solution = two_level_solution(true);
    let g2e_mo = Array4::zeros((2, 2, 2, 2));
    let mp2 = Mp2::from_solution(&solution, g2e_mo, None).unwrap();
    assert_eq!(mp2.nocc, 1);
    assert_eq!(mp2.num_virt, 1);
}
