//! Example: staffing and demand sweep over a synthetic roster.
//!
//! Runs the default arrival-rate sensitivity, then a grid over arrival rate
//! and doctor count with three replications per combination, and writes the
//! grid to `clinic_sweep.csv`.

use clinic_core::scenario::ClinicParams;
use clinic_core::test_helpers::roster;
use clinic_experiments::{
    export_to_csv, find_lowest_queue_index, run_parallel_experiments, run_rate_sensitivity,
    ParameterSpace,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let patients = roster(2_000);
    let base = ClinicParams::default().with_seed(42);

    println!("=== Arrival-rate sensitivity ===");
    for point in run_rate_sensitivity(&base, &[], &patients, false)? {
        println!("λ = {:>5.1}/h  mean queue = {:.2}", point.lambda_rate, point.mean_queue);
    }

    let space = ParameterSpace::grid()
        .with_base(base)
        .lambda_rate(vec![10.0, 20.0, 30.0])
        .num_doctors(vec![2, 3, 4, 5])
        .replications(3);
    let parameter_sets = space.generate();
    println!("\nRunning {} simulations in parallel...", parameter_sets.len());
    let results = run_parallel_experiments(parameter_sets.clone(), &patients, None)?;

    if let Some(best) = find_lowest_queue_index(&results) {
        let result = &results[best];
        println!(
            "Shortest queue: λ = {}/h with {} doctors (mean queue {:.2}, occupancy {:.1}%)",
            result.lambda_rate, result.num_doctors, result.mean_queue, result.mean_occupancy
        );
    }

    export_to_csv(&results, &parameter_sets, "clinic_sweep.csv")?;
    println!("Wrote clinic_sweep.csv");
    Ok(())
}
