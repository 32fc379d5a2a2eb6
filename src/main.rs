//! MP2 Calculation Command-Line Interface
//!
//! This is the main entry point for running the AO to MO integral
//! transformation and MP2 correlation energy evaluation over a frozen HF
//! snapshot, driven by a YAML configuration.

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use std::fs;
use tracing::info;

use rust_mp2::config::{Args, Config};
use rust_mp2::io::{load_snapshot, print_energy_report, setup_output};
use rust_mp2::mp2_impl::Mp2;
use rust_mp2::provider::{IntegralProvider, SnapshotProvider};
use rust_mp2::transform_impl::strategy_by_name;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_output(args.output.as_ref());

    // Load and parse configuration
    info!("Reading configuration from: {}", args.config_file);
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;
    let config: Config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();
    info!("Configuration loaded:\n{:?}", config);

    // The integral provider is an opaque collaborator; everything below only
    // consumes its frozen output.
    info!("Loading HF snapshot from: {}", config.snapshot);
    let snapshot = load_snapshot(&config.snapshot)?;
    let provider = SnapshotProvider::new(snapshot)?;

    let system = provider.system();
    info!(
        "System: {} atoms, basis set {}",
        system.elements.len(),
        system.basis_name
    );
    for (i, (elem, coord)) in system
        .elements
        .iter()
        .zip(system.coords.iter())
        .enumerate()
    {
        info!(
            "  Atom {}: {} at [{:.6}, {:.6}, {:.6}]",
            i + 1,
            elem.get_symbol(),
            coord.x,
            coord.y,
            coord.z
        );
    }
    info!("Total electrons: {}", system.num_electrons());

    let n = provider.num_basis();
    info!("Number of basis functions: {}", n);

    // One-electron part of the Hamiltonian is the sum of the kinetic and
    // nuclear-attraction integrals; MP2 itself only consumes the ERI tensor.
    let core_hamiltonian = provider.kinetic() + provider.nuclear_attraction();
    info!(
        "One-electron matrices: overlap {}x{}, core Hamiltonian {}x{}",
        provider.overlap().nrows(),
        provider.overlap().ncols(),
        core_hamiltonian.nrows(),
        core_hamiltonian.ncols()
    );

    let solution = provider.hf_solution();
    solution.ensure_converged()?;
    info!("HF reference energy: {:20.15} au", solution.energy);
    for (i, energy) in solution.orbital_energies.iter().enumerate() {
        info!("  Orbital {}: {:.8} au", i + 1, energy);
    }

    // Transform the two-electron integrals to the MO basis
    let strategy_name = args.strategy.unwrap_or_else(|| config.strategy());
    let strategy = strategy_by_name(&strategy_name)
        .ok_or_else(|| eyre!("Unknown transformation strategy: {}", strategy_name))?;
    info!(
        "Transforming integrals to the MO basis ({} strategy)...",
        strategy.name()
    );
    let g2e_ao = provider.electron_repulsion();
    let g2e_mo = strategy.transform(&g2e_ao, &solution.coefficients)?;

    // Compute the MP2 correlation energy
    let nocc = args.nocc.or(config.nocc());
    let mut mp2 = Mp2::from_solution(&solution, g2e_mo, nocc)?;
    mp2.degeneracy_threshold = args
        .degeneracy_threshold
        .unwrap_or_else(|| config.degeneracy_threshold());

    let correlation_energy = mp2.calculate_energy()?;
    mp2.print_summary();

    print_energy_report(&mut std::io::stdout(), solution.energy, correlation_energy)?;

    Ok(())
}
