//! Run a one-day clinic with mixed specialists and print the trace head and summary.
//!
//! Run with: cargo run -p clinic_core --example clinic_run

use clinic_core::report;
use clinic_core::routing::Specialty;
use clinic_core::scenario::ClinicParams;
use clinic_core::simulation::ClinicSimulation;
use clinic_core::telemetry::district_counts;
use clinic_core::test_helpers::roster;

fn main() {
    const NUM_PATIENTS: usize = 200;
    const SAMPLE: usize = 20;

    let params = ClinicParams::default()
        .with_seed(123)
        .with_num_doctors(4)
        .with_lambda_rate(18.0)
        .with_doctor_specialty(1, Specialty::Cardiology)
        .with_doctor_specialty(2, Specialty::Orthopedics);
    let outcome = ClinicSimulation::new(params, roster(NUM_PATIENTS)).run();

    println!(
        "--- Clinic run ({} patients on roster, {} arrivals, seed 123) ---",
        NUM_PATIENTS, outcome.counts.arrivals
    );
    println!("\nTrace (first {SAMPLE}):");
    for episode in outcome.episodes.iter().take(SAMPLE) {
        let doctor = episode
            .doctor
            .map_or_else(|| "queue".to_string(), |d| format!("M{}", d + 1));
        println!(
            "  min {:>3}  {:<6} {:<15} {:<12} {:>6.1} min  {}",
            episode.start_minute,
            doctor,
            episode.specialty,
            episode.patient_name,
            episode.duration,
            episode.reason
        );
    }

    println!("\n{}", report::render(&outcome.stats));
    println!("Top districts:");
    for (district, count) in district_counts(&outcome.districts, 10) {
        println!("  {district}: {count}");
    }
}
