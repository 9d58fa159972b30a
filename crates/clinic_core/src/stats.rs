//! Summary statistics over a completed run.
//!
//! Empty inputs never fail: means and variances fall back to zero, queue
//! statistics to a single zero sample.

use serde::{Deserialize, Serialize};

use crate::doctors::DoctorSlot;
use crate::routing::Specialty;
use crate::telemetry::ConsultationRecord;
use crate::timeline::OccupancyTimeline;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorStats {
    pub id: usize,
    #[serde(rename = "especialidade")]
    pub specialty: Specialty,
    #[serde(rename = "num_atendidos")]
    pub served: usize,
    /// Share of the horizon spent in consultation, capped at 100.
    #[serde(rename = "ocupacao_percent")]
    pub occupancy_percent: f64,
    #[serde(rename = "media_consulta")]
    pub mean_consultation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicStats {
    #[serde(rename = "tempo_medio_espera")]
    pub mean_wait: f64,
    #[serde(rename = "variancia_tempo_espera")]
    pub wait_variance: f64,
    #[serde(rename = "tempo_medio_consulta")]
    pub mean_consultation: f64,
    #[serde(rename = "variancia_tempo_consulta")]
    pub consultation_variance: f64,
    #[serde(rename = "tempo_medio_na_clinica")]
    pub mean_time_in_clinic: f64,
    #[serde(rename = "fila_media")]
    pub mean_queue: f64,
    #[serde(rename = "fila_max")]
    pub max_queue: usize,
    /// Mean busy doctors per minute over the doctor count, capped at 100.
    #[serde(rename = "ocupacao_media_medicos")]
    pub mean_occupancy: f64,
    /// Number of processed departures.
    #[serde(rename = "doentes_atendidos")]
    pub patients_served: usize,
    #[serde(rename = "stats_por_medico")]
    pub per_doctor: Vec<DoctorStats>,
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population variance; zero for fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Per-doctor occupancy: consultation minutes over the horizon, capped at 100.
pub fn doctor_stats(slot: &DoctorSlot, simulation_time: u32) -> DoctorStats {
    let horizon = f64::from(simulation_time.max(1));
    let total: f64 = slot.durations.iter().sum();
    DoctorStats {
        id: slot.index,
        specialty: slot.specialty,
        served: slot.served,
        occupancy_percent: (100.0 * total / horizon).min(100.0),
        mean_consultation: mean(&slot.durations),
    }
}

/// Inputs for [compute_stats], borrowed from the finished run.
#[derive(Debug, Clone, Copy)]
pub struct StatsInput<'a> {
    pub consultations: &'a [ConsultationRecord],
    pub doctors: &'a [DoctorSlot],
    pub queue_sizes: &'a [usize],
    pub occupancy: &'a OccupancyTimeline,
    pub num_doctors: usize,
    pub simulation_time: u32,
    pub departures: usize,
}

pub fn compute_stats(input: StatsInput<'_>) -> ClinicStats {
    let waits: Vec<f64> = input.consultations.iter().map(ConsultationRecord::wait).collect();
    let durations: Vec<f64> = input.consultations.iter().map(|c| c.duration).collect();
    let in_clinic: Vec<f64> = input
        .consultations
        .iter()
        .map(ConsultationRecord::time_in_clinic)
        .collect();

    let queue: Vec<f64> = if input.queue_sizes.is_empty() {
        vec![0.0]
    } else {
        input.queue_sizes.iter().map(|q| *q as f64).collect()
    };
    let max_queue = input.queue_sizes.iter().copied().max().unwrap_or(0);

    let busy = input.occupancy.capped_mean_busy(input.num_doctors);
    let mean_occupancy = (busy / input.num_doctors.max(1) as f64 * 100.0).min(100.0);

    ClinicStats {
        mean_wait: mean(&waits),
        wait_variance: variance(&waits),
        mean_consultation: mean(&durations),
        consultation_variance: variance(&durations),
        mean_time_in_clinic: mean(&in_clinic),
        mean_queue: mean(&queue),
        max_queue,
        mean_occupancy,
        patients_served: input.departures,
        per_doctor: input
            .doctors
            .iter()
            .map(|slot| doctor_stats(slot, input.simulation_time))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::PatientId;

    #[test]
    fn mean_and_variance_default_to_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[4.0]), 0.0);
        assert_eq!(mean(&[1.0, 3.0]), 2.0);
        assert_eq!(variance(&[1.0, 3.0]), 1.0);
    }

    #[test]
    fn doctor_occupancy_is_capped() {
        let mut slot = DoctorSlot::new(0, Specialty::GeneralPractice);
        slot.start_consultation(30.0);
        slot.release();
        slot.start_consultation(90.0);
        let stats = doctor_stats(&slot, 100);
        assert_eq!(stats.occupancy_percent, 100.0);
        assert_eq!(stats.mean_consultation, 60.0);
        assert_eq!(stats.served, 2);

        let idle = doctor_stats(&DoctorSlot::new(1, Specialty::Cardiology), 0);
        assert_eq!(idle.occupancy_percent, 0.0);
    }

    #[test]
    fn empty_run_produces_zeroes() {
        let timeline = OccupancyTimeline::new(5);
        let stats = compute_stats(StatsInput {
            consultations: &[],
            doctors: &[],
            queue_sizes: &[0; 5],
            occupancy: &timeline,
            num_doctors: 0,
            simulation_time: 5,
            departures: 0,
        });
        assert_eq!(stats.mean_wait, 0.0);
        assert_eq!(stats.mean_time_in_clinic, 0.0);
        assert_eq!(stats.mean_queue, 0.0);
        assert_eq!(stats.max_queue, 0);
        assert_eq!(stats.mean_occupancy, 0.0);
        assert_eq!(stats.patients_served, 0);
    }

    #[test]
    fn global_and_per_doctor_occupancy_differ() {
        let mut timeline = OccupancyTimeline::new(10);
        timeline.record(0.0, 4.5); // minutes 0..5
        let mut slot = DoctorSlot::new(0, Specialty::GeneralPractice);
        slot.start_consultation(4.5);
        let consultation = ConsultationRecord {
            patient: PatientId(0),
            doctor: 0,
            arrival: 0.0,
            start: 0.0,
            duration: 4.5,
            departure: Some(4.5),
        };
        let stats = compute_stats(StatsInput {
            consultations: &[consultation],
            doctors: std::slice::from_ref(&slot),
            queue_sizes: &[0; 10],
            occupancy: &timeline,
            num_doctors: 1,
            simulation_time: 10,
            departures: 1,
        });
        assert_eq!(stats.mean_occupancy, 50.0);
        assert_eq!(stats.per_doctor[0].occupancy_percent, 45.0);
        assert_eq!(stats.mean_time_in_clinic, 4.5);
    }
}
