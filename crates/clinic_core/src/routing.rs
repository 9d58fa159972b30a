//! Specialty routing: maps an illness label to the specialty that treats it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Medical specialty a doctor slot is bound to and a patient is routed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    #[default]
    #[serde(rename = "clinica_geral")]
    GeneralPractice,
    #[serde(rename = "cardiologia")]
    Cardiology,
    #[serde(rename = "pneumologia")]
    Pulmonology,
    #[serde(rename = "ortopedia")]
    Orthopedics,
    #[serde(rename = "endocrinologia")]
    Endocrinology,
    #[serde(rename = "geriatria")]
    Geriatrics,
    #[serde(rename = "otorrino")]
    Otolaryngology,
}

/// The safety-net specialty: generalists take any patient when free.
pub const FALLBACK_SPECIALTY: Specialty = Specialty::GeneralPractice;

impl Specialty {
    pub const ALL: [Specialty; 7] = [
        Specialty::GeneralPractice,
        Specialty::Cardiology,
        Specialty::Pulmonology,
        Specialty::Orthopedics,
        Specialty::Endocrinology,
        Specialty::Geriatrics,
        Specialty::Otolaryngology,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Specialty::GeneralPractice => "clinica_geral",
            Specialty::Cardiology => "cardiologia",
            Specialty::Pulmonology => "pneumologia",
            Specialty::Orthopedics => "ortopedia",
            Specialty::Endocrinology => "endocrinologia",
            Specialty::Geriatrics => "geriatria",
            Specialty::Otolaryngology => "otorrino",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown specialty '{0}'")]
pub struct UnknownSpecialty(pub String);

impl FromStr for Specialty {
    type Err = UnknownSpecialty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Specialty::ALL
            .into_iter()
            .find(|specialty| specialty.as_str() == needle)
            .ok_or_else(|| UnknownSpecialty(s.to_string()))
    }
}

/// Illness label → specialty, in lookup order. Order matters for the substring
/// pass: the first key contained in the label wins.
pub const ILLNESS_SPECIALTIES: &[(&str, Specialty)] = &[
    ("asma", Specialty::Pulmonology),
    ("bronquite", Specialty::Pulmonology),
    ("covid", Specialty::Pulmonology),
    ("falta de ar", Specialty::Pulmonology),
    ("diabetes", Specialty::Endocrinology),
    ("obesidade", Specialty::Endocrinology),
    ("angina", Specialty::Cardiology),
    ("arritmia", Specialty::Cardiology),
    ("hipertensão", Specialty::Cardiology),
    ("dor no peito", Specialty::Cardiology),
    ("enfarte", Specialty::Cardiology),
    ("fractura", Specialty::Orthopedics),
    ("fratura", Specialty::Orthopedics),
    ("queda", Specialty::Orthopedics),
    ("luxacao", Specialty::Orthopedics),
    ("entorse", Specialty::Orthopedics),
    ("perna partida", Specialty::Orthopedics),
    ("otite", Specialty::Otolaryngology),
    ("rinite", Specialty::Otolaryngology),
    ("sinusite", Specialty::Otolaryngology),
    ("dor de ouvidos", Specialty::Otolaryngology),
    ("geriatria_cronica", Specialty::Geriatrics),
    ("demencia", Specialty::Geriatrics),
    ("febre", Specialty::GeneralPractice),
    ("virose", Specialty::GeneralPractice),
    ("gripe", Specialty::GeneralPractice),
    ("dor de cabeça", Specialty::GeneralPractice),
    ("checkup", Specialty::GeneralPractice),
];

/// Route an illness label to a specialty.
///
/// Exact table match, then the first table key contained in the label, then the
/// `cardio`/`ortop` roots, then general practice.
pub fn specialty_for_illness(illness: &str) -> Specialty {
    let label = illness.to_lowercase();

    if let Some((_, specialty)) = ILLNESS_SPECIALTIES.iter().find(|(key, _)| *key == label) {
        return *specialty;
    }
    if let Some((_, specialty)) = ILLNESS_SPECIALTIES
        .iter()
        .find(|(key, _)| label.contains(key))
    {
        return *specialty;
    }
    if label.contains("cardio") {
        return Specialty::Cardiology;
    }
    if label.contains("ortop") {
        return Specialty::Orthopedics;
    }
    FALLBACK_SPECIALTY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_labels_route_directly() {
        assert_eq!(specialty_for_illness("asma"), Specialty::Pulmonology);
        assert_eq!(specialty_for_illness("Enfarte"), Specialty::Cardiology);
        assert_eq!(specialty_for_illness("dor de ouvidos"), Specialty::Otolaryngology);
        assert_eq!(specialty_for_illness("checkup"), Specialty::GeneralPractice);
    }

    #[test]
    fn substring_match_uses_table_order() {
        // "asma" precedes "febre" in the table.
        assert_eq!(specialty_for_illness("febre com asma"), Specialty::Pulmonology);
        assert_eq!(specialty_for_illness("queda na escada"), Specialty::Orthopedics);
    }

    #[test]
    fn heuristic_roots_are_a_second_chance() {
        assert_eq!(specialty_for_illness("cardiopatia"), Specialty::Cardiology);
        assert_eq!(specialty_for_illness("problema ortopedico"), Specialty::Orthopedics);
    }

    #[test]
    fn unknown_labels_fall_back_to_general_practice() {
        assert_eq!(specialty_for_illness("tosse"), Specialty::GeneralPractice);
        assert_eq!(specialty_for_illness(""), Specialty::GeneralPractice);
    }

    #[test]
    fn specialty_names_round_trip_through_from_str() {
        for specialty in Specialty::ALL {
            assert_eq!(specialty.as_str().parse::<Specialty>(), Ok(specialty));
        }
        assert!("dermatologia".parse::<Specialty>().is_err());
    }
}
