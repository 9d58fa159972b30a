//! `clinic`: run one clinic simulation from `config.json` plus flags.

mod cli;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use clinic_core::config::ClinicConfig;
use clinic_core::dataset::load_patients_or_empty;
use clinic_core::report;
use clinic_core::simulation::ClinicSimulation;
use clinic_core::telemetry::district_counts;
use clinic_experiments::{export_outcome_json, export_timeline_csv, run_rate_sensitivity};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut config = ClinicConfig::load_or_default(&args.config);
    args.apply_overrides(&mut config);
    config.validate()?;

    let patients = load_patients_or_empty(&config.dataset_file, config.limit, config.seed);
    if patients.is_empty() {
        warn!(path = %config.dataset_file.display(), "no patients loaded, the clinic stays empty");
    }
    info!(
        patients = patients.len(),
        lambda_rate = config.lambda_rate,
        num_doctors = config.num_doctors,
        simulation_time = config.simulation_time,
        "starting simulation"
    );

    let params = config.to_params();
    let simulation = ClinicSimulation::new(params.clone(), patients);
    let outcome = simulation.run();

    print!("{}", report::render(&outcome.stats));
    let districts = district_counts(&outcome.districts, args.top_districts);
    if !districts.is_empty() {
        println!("\nDistritos:");
        for (district, count) in &districts {
            println!("  {district:<20} {count}");
        }
    }

    if let Some(path) = &args.output_json {
        export_outcome_json(&outcome, path)?;
        info!(path = %path.display(), "wrote run JSON");
    }
    if let Some(path) = &args.output_csv {
        export_timeline_csv(&outcome, path)?;
        info!(path = %path.display(), "wrote timeline CSV");
    }

    if args.sweep {
        println!("\nSensibilidade (fila media por taxa):");
        for point in run_rate_sensitivity(&params, &args.sweep_rates, simulation.patients(), true)? {
            println!("  λ = {:>5.1}/h  fila = {:.2}", point.lambda_rate, point.mean_queue);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
