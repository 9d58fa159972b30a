//! Load tests for clinic_core: validate performance with large rosters.

use clinic_core::scenario::ClinicParams;
use clinic_core::simulation::ClinicSimulation;
use clinic_core::test_helpers::roster;
use std::time::Instant;

#[test]
#[ignore] // Only run explicitly: cargo test --package clinic_core --test load_tests -- --ignored
fn test_sustained_load() {
    let params = ClinicParams::default()
        .with_seed(42)
        .with_lambda_rate(600.0)
        .with_num_doctors(150)
        .with_simulation_time(24 * 60);
    let simulation = ClinicSimulation::new(params, roster(20_000));

    let start = Instant::now();
    let outcome = simulation.run();
    let duration = start.elapsed();

    let events = outcome.counts.arrivals + outcome.counts.departed;
    let events_per_sec = events as f64 / duration.as_secs_f64();
    println!(
        "Sustained load test: {} events in {:.2}s ({:.0} events/sec)",
        events,
        duration.as_secs_f64(),
        events_per_sec
    );

    assert!(outcome.counts.is_conserved());
    assert!(
        events_per_sec > 10_000.0,
        "Should process >10000 events/sec, got {:.0}",
        events_per_sec
    );
}

#[test]
#[ignore]
fn test_overloaded_queues() {
    // Arrivals far above capacity: queues grow for the whole horizon.
    let params = ClinicParams::default()
        .with_seed(7)
        .with_lambda_rate(1_200.0)
        .with_num_doctors(3)
        .with_simulation_time(8 * 60);
    let simulation = ClinicSimulation::new(params, roster(10_000));

    let start = Instant::now();
    let outcome = simulation.run();
    let duration = start.elapsed();

    println!(
        "Overloaded queues: {} arrivals, max queue {}, {:.2}s",
        outcome.counts.arrivals,
        outcome.stats.max_queue,
        duration.as_secs_f64()
    );
    assert!(outcome.stats.max_queue > 100);
    assert!(
        duration.as_secs_f64() < 30.0,
        "Should finish in <30s, took {:.2}s",
        duration.as_secs_f64()
    );
}
