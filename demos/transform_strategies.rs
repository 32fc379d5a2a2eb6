//! Compare the three AO to MO transformation strategies on a small synthetic
//! tensor and report their timings and operation counts.

use color_eyre::eyre::Result;
use nalgebra::DMatrix;
use ndarray::Array4;
use rust_mp2::transform_impl::{
    FactoredTransform, IntegralTransform, NaiveTransform, VectorizedTransform,
};
use std::time::Instant;

fn main() -> Result<()> {
    color_eyre::install()?;

    let n = 6;
    let g2e_ao = Array4::from_shape_fn((n, n, n, n), |(mu, nu, rho, sigma)| {
        1.0 / ((1 + mu + nu + rho + sigma) as f64)
    });
    let coeffs = DMatrix::from_fn(n, n, |i, j| {
        let diagonal = if i == j { 0.9 } else { 0.0 };
        diagonal + 0.05 / ((1 + i + j) as f64)
    });

    let strategies: Vec<Box<dyn IntegralTransform>> = vec![
        Box::new(NaiveTransform),
        Box::new(FactoredTransform),
        Box::new(VectorizedTransform),
    ];

    println!("AO to MO transformation, N = {}", n);
    for strategy in &strategies {
        let start = Instant::now();
        let g2e_mo = strategy.transform(&g2e_ao, &coeffs)?;
        println!(
            "{:>10}: {:>12?} for {:>8} multiply-adds, g2e_mo[0,0,0,0] = {:.12}",
            strategy.name(),
            start.elapsed(),
            strategy.operation_count(n),
            g2e_mo[[0, 0, 0, 0]]
        );
    }

    Ok(())
}
