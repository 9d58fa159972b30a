//! Triage: turns a patient's stored illness text into a canonical illness label,
//! a priority tier and a display reason.
//!
//! Text that looks like filler (empty, too long, or containing placeholder
//! words) is replaced by a uniform draw from [ILLNESS_CATALOG]. The placeholder
//! label `virose` is redrawn the same way so that datasets defaulting to it do
//! not collapse onto one illness. Every draw comes from the caller's generator;
//! the engine passes its run generator, so a fixed seed reproduces triage.

use rand::Rng;

use crate::patient::{PatientRecord, Priority};

/// Longest text still considered a usable illness label (in characters).
pub const MAX_LABEL_CHARS: usize = 25;

/// Words that mark the text as filler rather than a symptom.
pub const FILLER_MARKERS: [&str; 4] = ["nostrud", "ipsum", "magna", "amet"];

/// Default label some datasets carry for every record.
pub const PLACEHOLDER_ILLNESS: &str = "virose";

/// Plausible illnesses substituted for unusable text.
pub const ILLNESS_CATALOG: [&str; 14] = [
    "gripe",
    "virose",
    "febre",
    "checkup",
    "perna partida",
    "entorse",
    "queda",
    "dor no peito",
    "arritmia",
    "enfarte",
    "falta de ar",
    "asma",
    "dor de ouvidos",
    "otite",
];

/// Substrings that make a case urgent. Checked before [MODERATE_MARKERS].
pub const URGENT_MARKERS: [&str; 9] = [
    "angina",
    "enfarte",
    "fratura",
    "fractura",
    "sufocamento",
    "queimadura",
    "acidente",
    "peito",
    "arritmia",
];

/// Substrings that make a case moderate when no urgent marker matched.
pub const MODERATE_MARKERS: [&str; 9] = [
    "febre", "dor", "cólica", "infecção", "covid", "gripe", "asma", "ar", "otite",
];

/// Result of triaging one patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageDecision {
    /// Lower-cased illness label used for routing.
    pub illness: String,
    pub priority: Priority,
    /// Capitalised label for traces and reports.
    pub reason: String,
}

/// Lower-cased illness text: the explicit illness field when present and
/// non-empty, otherwise the description.
pub fn raw_illness_text(patient: &PatientRecord) -> String {
    patient
        .illness
        .as_deref()
        .filter(|text| !text.is_empty())
        .or_else(|| patient.description.as_deref())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Whether `text` cannot be used as an illness label.
pub fn is_unusable(text: &str) -> bool {
    text.is_empty()
        || text.chars().count() > MAX_LABEL_CHARS
        || FILLER_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Priority tier from marker lists; first match wins, urgent list first.
pub fn priority_for(illness: &str) -> Priority {
    let label = illness.to_lowercase();
    if URGENT_MARKERS.iter().any(|marker| label.contains(marker)) {
        Priority::Urgent
    } else if MODERATE_MARKERS.iter().any(|marker| label.contains(marker)) {
        Priority::Moderate
    } else {
        Priority::Normal
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn display_reason(illness: &str) -> String {
    let mut chars = illness.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Uniform draw from [ILLNESS_CATALOG].
pub fn random_catalog_illness<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ILLNESS_CATALOG[rng.gen_range(0..ILLNESS_CATALOG.len())]
}

/// Triage `patient`, drawing a substitute label from `rng` when needed.
///
/// Calling this twice for the same record may give different labels when the
/// substitution triggers; the engine relies on that at dispatch time.
pub fn triage<R: Rng + ?Sized>(patient: &PatientRecord, rng: &mut R) -> TriageDecision {
    let mut illness = raw_illness_text(patient);
    if is_unusable(&illness) || illness == PLACEHOLDER_ILLNESS {
        illness = random_catalog_illness(rng).to_string();
    }

    let priority = priority_for(&illness);
    let reason = display_reason(&illness);
    TriageDecision {
        illness,
        priority,
        reason,
    }
}
