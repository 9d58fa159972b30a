//! Run trace: service episodes, per-patient timings and end-of-run counts.

use serde::{Deserialize, Serialize};

use crate::patient::PatientId;
use crate::routing::Specialty;

/// One entry of the run trace.
///
/// A consultation start carries the doctor index and drawn duration. A patient
/// that had to queue is recorded once at arrival with no doctor and zero
/// duration, and again when a doctor later takes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEpisode {
    /// Whole minute (floor) at which the episode was recorded.
    #[serde(rename = "minuto_inicio")]
    pub start_minute: u64,
    #[serde(rename = "duracao")]
    pub duration: f64,
    #[serde(rename = "medico")]
    pub doctor: Option<usize>,
    #[serde(rename = "paciente")]
    pub patient_name: String,
    #[serde(rename = "especialidade")]
    pub specialty: Specialty,
    #[serde(rename = "motivo")]
    pub reason: String,
}

impl ServiceEpisode {
    /// Whether this entry marks a patient placed in a queue.
    pub fn is_waiting_marker(&self) -> bool {
        self.doctor.is_none()
    }
}

/// Timings of one patient that started a consultation, in service-start order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsultationRecord {
    pub patient: PatientId,
    pub doctor: usize,
    pub arrival: f64,
    pub start: f64,
    pub duration: f64,
    /// Departure time; `None` only if the departure was never processed.
    pub departure: Option<f64>,
}

impl ConsultationRecord {
    pub fn wait(&self) -> f64 {
        self.start - self.arrival
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Total time in clinic. Without a recorded departure the expected
    /// departure (wait plus consultation) is used.
    pub fn time_in_clinic(&self) -> f64 {
        match self.departure {
            Some(departure) => departure - self.arrival,
            None => self.wait() + self.duration,
        }
    }
}

/// Patient counts at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub arrivals: usize,
    pub departed: usize,
    pub still_waiting: usize,
    pub in_service: usize,
}

impl RunCounts {
    /// Every arrival is accounted for exactly once.
    pub fn is_conserved(&self) -> bool {
        self.departed + self.still_waiting + self.in_service == self.arrivals
    }
}

/// Arrivals per district, most frequent first, ties in first-seen order,
/// truncated to `top` entries.
pub fn district_counts(districts: &[String], top: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for district in districts {
        match counts.iter_mut().find(|(name, _)| name == district) {
            Some((_, count)) => *count += 1,
            None => counts.push((district.clone(), 1)),
        }
    }
    // Stable sort keeps first-seen order on ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_serializes_with_trace_keys() {
        let episode = ServiceEpisode {
            start_minute: 3,
            duration: 0.0,
            doctor: None,
            patient_name: "Ana".to_string(),
            specialty: Specialty::Cardiology,
            reason: "Arritmia".to_string(),
        };
        let json = serde_json::to_value(&episode).expect("serialize");
        assert_eq!(json["minuto_inicio"], 3);
        assert!(json["medico"].is_null());
        assert_eq!(json["especialidade"], "cardiologia");
        assert_eq!(json["motivo"], "Arritmia");
        assert!(episode.is_waiting_marker());
    }

    #[test]
    fn time_in_clinic_estimates_missing_departure() {
        let mut record = ConsultationRecord {
            patient: PatientId(0),
            doctor: 0,
            arrival: 2.0,
            start: 5.0,
            duration: 10.0,
            departure: Some(15.0),
        };
        assert_eq!(record.wait(), 3.0);
        assert_eq!(record.time_in_clinic(), 13.0);
        record.departure = None;
        assert_eq!(record.time_in_clinic(), 13.0);
    }

    #[test]
    fn district_counts_rank_and_truncate() {
        let districts: Vec<String> = ["Porto", "Braga", "Lisboa", "Braga", "Porto", "Faro"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ranked = district_counts(&districts, 3);
        assert_eq!(
            ranked,
            vec![
                ("Porto".to_string(), 2),
                ("Braga".to_string(), 2),
                ("Lisboa".to_string(), 1)
            ]
        );
        assert!(district_counts(&[], 10).is_empty());
    }

    #[test]
    fn counts_conservation() {
        let counts = RunCounts {
            arrivals: 5,
            departed: 3,
            still_waiting: 2,
            in_service: 0,
        };
        assert!(counts.is_conserved());
    }
}
