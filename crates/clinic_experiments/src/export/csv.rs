use clinic_core::simulation::SimulationOutcome;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;
use crate::sensitivity::RatePoint;

pub(crate) fn export_to_csv_impl(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    if results.len() != parameter_sets.len() {
        return Err(format!(
            "Results length ({}) doesn't match parameter_sets length ({})",
            results.len(),
            parameter_sets.len()
        )
        .into());
    }

    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "experiment_id",
        "run_id",
        "seed",
        "lambda_rate",
        "num_doctors",
        "service_distribution",
        "mean_service_time",
        "simulation_time",
        "arrival_pattern",
        "patients_arrived",
        "patients_served",
        "still_waiting",
        "mean_queue",
        "max_queue",
        "mean_wait",
        "median_wait",
        "p90_wait",
        "mean_consultation",
        "mean_time_in_clinic",
        "mean_occupancy",
    ])?;

    for (result, param_set) in results.iter().zip(parameter_sets.iter()) {
        if result.experiment_id != param_set.experiment_id || result.run_id != param_set.run_id {
            return Err(format!(
                "Result {}#{} is paired with parameter set {}#{}",
                result.experiment_id, result.run_id, param_set.experiment_id, param_set.run_id
            )
            .into());
        }
        let params = &param_set.params;

        wtr.write_record([
            param_set.experiment_id.clone(),
            param_set.run_id.to_string(),
            param_set.seed.to_string(),
            params.lambda_rate.to_string(),
            params.num_doctors.to_string(),
            params.service_distribution.as_str().to_string(),
            params.mean_service_time.to_string(),
            params.simulation_time.to_string(),
            params.arrival_pattern.as_str().to_string(),
            result.patients_arrived.to_string(),
            result.patients_served.to_string(),
            result.still_waiting.to_string(),
            result.mean_queue.to_string(),
            result.max_queue.to_string(),
            result.mean_wait.to_string(),
            result.median_wait.to_string(),
            result.p90_wait.to_string(),
            result.mean_consultation.to_string(),
            result.mean_time_in_clinic.to_string(),
            result.mean_occupancy.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_timeline_csv_impl(
    outcome: &SimulationOutcome,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(["minute", "queue_size", "occupancy_percent"])?;
    for (minute, (queue, occupancy)) in outcome
        .queue_sizes
        .iter()
        .zip(&outcome.occupancy)
        .enumerate()
    {
        wtr.write_record([minute.to_string(), queue.to_string(), occupancy.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_rate_points_csv_impl(
    points: &[RatePoint],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    for point in points {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}
