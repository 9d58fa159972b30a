//! Test helpers for building patients and rosters.
//!
//! Illness labels are picked so that triage keeps them (short, no filler
//! words), which keeps routing deterministic regardless of the seed.

use crate::patient::PatientRecord;

/// Labels that survive triage unchanged, one per specialty family.
pub const STABLE_ILLNESSES: [&str; 6] = [
    "gripe",
    "asma",
    "enfarte",
    "entorse",
    "otite",
    "diabetes",
];

/// Patient with an explicit illness label and a district.
pub fn patient_with_illness(id: &str, illness: &str) -> PatientRecord {
    PatientRecord::new(id, format!("Pessoa {id}"))
        .with_illness(illness)
        .with_district("Braga")
}

/// `n` patients cycling through [STABLE_ILLNESSES].
pub fn roster(n: usize) -> Vec<PatientRecord> {
    (0..n)
        .map(|i| {
            patient_with_illness(
                &format!("p{}", i + 1),
                STABLE_ILLNESSES[i % STABLE_ILLNESSES.len()],
            )
        })
        .collect()
}

/// `n` patients that all route to cardiology.
pub fn cardiology_roster(n: usize) -> Vec<PatientRecord> {
    (0..n)
        .map(|i| patient_with_illness(&format!("c{}", i + 1), "arritmia"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{specialty_for_illness, Specialty};
    use crate::triage::{is_unusable, PLACEHOLDER_ILLNESS};

    #[test]
    fn stable_illnesses_survive_triage() {
        for label in STABLE_ILLNESSES {
            assert!(!is_unusable(label));
            assert_ne!(label, PLACEHOLDER_ILLNESS);
        }
    }

    #[test]
    fn cardiology_roster_routes_to_cardiology() {
        for patient in cardiology_roster(3) {
            let illness = patient.illness.as_deref().unwrap_or_default();
            assert_eq!(specialty_for_illness(illness), Specialty::Cardiology);
        }
    }

    #[test]
    fn roster_ids_are_one_based() {
        let patients = roster(2);
        assert_eq!(patients[0].id, "p1");
        assert_eq!(patients[1].name, "Pessoa p2");
    }
}
