#![allow(dead_code)]

use clinic_core::patient::{PatientId, PatientRecord};
use clinic_core::scenario::ClinicParams;
use clinic_core::simulation::{ClinicSimulation, SimulationOutcome};
use clinic_core::test_helpers::{patient_with_illness, roster};
use clinic_core::timeline::queue_sizes_naive;

/// Patients whose descriptions are filler text, so triage substitutes a
/// random catalog label for each of them.
pub fn filler_roster(n: usize) -> Vec<PatientRecord> {
    (0..n)
        .map(|i| {
            PatientRecord::new(format!("f{}", i + 1), format!("Filler {}", i + 1))
                .with_description("Lorem ipsum dolor sit amet, consectetur")
        })
        .collect()
}

/// Stable roster mixed with filler records.
pub fn mixed_roster(n: usize) -> Vec<PatientRecord> {
    let mut patients = roster(n / 2);
    patients.extend(filler_roster(n - n / 2));
    patients
}

pub fn patients(labels: &[&str]) -> Vec<PatientRecord> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| patient_with_illness(&format!("p{}", i + 1), label))
        .collect()
}

pub fn run(params: ClinicParams, patients: Vec<PatientRecord>) -> SimulationOutcome {
    ClinicSimulation::new(params, patients).run()
}

/// Start time of `patient`, if a consultation was started for them.
pub fn start_of(outcome: &SimulationOutcome, patient: PatientId) -> Option<f64> {
    outcome
        .consultations
        .iter()
        .find(|c| c.patient == patient)
        .map(|c| c.start)
}

/// Queue series recomputed with the O(T × P) definition.
pub fn naive_queue_sizes(outcome: &SimulationOutcome, simulation_time: u32) -> Vec<usize> {
    let pairs: Vec<(f64, Option<f64>)> = outcome
        .arrivals
        .iter()
        .map(|a| (a.time, start_of(outcome, a.patient)))
        .collect();
    queue_sizes_naive(&pairs, simulation_time)
}

/// Panics if any doctor has two overlapping consultations.
pub fn assert_no_double_booking(outcome: &SimulationOutcome, num_doctors: usize) {
    for doctor in 0..num_doctors {
        let mut consultations: Vec<_> = outcome
            .consultations
            .iter()
            .filter(|c| c.doctor == doctor)
            .collect();
        consultations.sort_by(|a, b| a.start.total_cmp(&b.start));
        for pair in consultations.windows(2) {
            assert!(
                pair[1].start >= pair[0].end(),
                "doctor {doctor} double-booked: {:?} overlaps {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}
