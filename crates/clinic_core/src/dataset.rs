//! Patient dataset loading.
//!
//! The dataset is a JSON array of person objects. Parsing is tolerant: every
//! field except the array shape is optional, and values of an unexpected type
//! are treated as missing. People whose profession marks them as doctors are
//! not patients and are dropped.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::{Map, Value};

use crate::error::DatasetError;
use crate::patient::{Address, PatientRecord};

/// Profession fragments that exclude a record from the roster.
pub const DOCTOR_PROFESSION_MARKERS: [&str; 2] = ["médico", "medicina"];

/// Keys tried in order for the identity document number.
const DOCUMENT_KEYS: [&str; 3] = ["CC", "BI", "cc"];

/// Load, filter, shuffle and truncate the roster at `path`.
///
/// A missing file is an empty roster. The shuffle is seeded when `seed` is
/// given so the roster order is reproducible.
pub fn load_patients(
    path: impl AsRef<Path>,
    limit: Option<usize>,
    seed: Option<u64>,
) -> Result<Vec<PatientRecord>, DatasetError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(path = %path.display(), "dataset not found, using an empty roster");
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(entries) = value else {
        return Err(DatasetError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let mut patients = parse_patients(&entries);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    patients.shuffle(&mut rng);
    if let Some(limit) = limit {
        patients.truncate(limit);
    }
    tracing::info!(
        path = %path.display(),
        records = entries.len(),
        patients = patients.len(),
        "dataset loaded"
    );
    Ok(patients)
}

/// Like [load_patients], but any failure yields an empty roster.
pub fn load_patients_or_empty(
    path: impl AsRef<Path>,
    limit: Option<usize>,
    seed: Option<u64>,
) -> Vec<PatientRecord> {
    load_patients(path, limit, seed).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "dataset unusable, using an empty roster");
        Vec::new()
    })
}

/// Convert raw entries into patient records, in input order, skipping doctors
/// and non-object entries.
pub fn parse_patients(entries: &[Value]) -> Vec<PatientRecord> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match entry.as_object() {
            Some(object) => parse_patient(i, object),
            None => {
                tracing::debug!(index = i, "skipping non-object dataset entry");
                None
            }
        })
        .collect()
}

/// Whether a profession text belongs to medical staff.
pub fn is_doctor_profession(profession: &str) -> bool {
    let lower = profession.to_lowercase();
    DOCTOR_PROFESSION_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

fn parse_patient(index: usize, object: &Map<String, Value>) -> Option<PatientRecord> {
    let profession = scalar_string(object.get("profissao"));
    if profession.as_deref().is_some_and(is_doctor_profession) {
        return None;
    }

    let id = scalar_string(object.get("id")).unwrap_or_else(|| format!("p{index}"));
    let name = object
        .get("nome")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Pessoa {}", index + 1));

    let mut patient = PatientRecord::new(id, name);
    if let Some(document) = DOCUMENT_KEYS
        .iter()
        .filter_map(|key| scalar_string(object.get(*key)))
        .find(|doc| !doc.is_empty())
    {
        patient.document_id = document;
    }
    patient.age = object
        .get("idade")
        .and_then(Value::as_u64)
        .and_then(|age| u32::try_from(age).ok());
    patient.profession = profession;
    patient.sex = string_field(object, "sexo");
    patient.address = object
        .get("morada")
        .and_then(Value::as_object)
        .map(parse_address);
    patient.illness = string_field(object, "doenca");
    patient.description = string_field(object, "descrição");
    patient.religion = string_field(object, "religiao");
    patient.sports = object.get("desportos").filter(|v| !v.is_null()).cloned();
    patient.attributes = object.get("atributos").filter(|v| !v.is_null()).cloned();
    Some(patient)
}

fn parse_address(object: &Map<String, Value>) -> Address {
    let mut address = Address::default();
    for (key, value) in object {
        match (key.as_str(), value.as_str()) {
            ("distrito", Some(district)) => address.district = Some(district.to_string()),
            _ => {
                address.extra.insert(key.clone(), value.clone());
            }
        }
    }
    address
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Strings as-is, numbers in their JSON form; anything else is missing.
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fields_default_when_missing() {
        let patients = parse_patients(&[json!({}), json!({"id": 42, "BI": 123456})]);
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].id, "p0");
        assert_eq!(patients[0].name, "Pessoa 1");
        assert_eq!(patients[0].document_id, "N/A");
        assert!(patients[0].address.is_none());
        assert_eq!(patients[1].id, "42");
        assert_eq!(patients[1].document_id, "123456");
    }

    #[test]
    fn document_keys_are_tried_in_order() {
        let patients = parse_patients(&[
            json!({"CC": "", "BI": "B1", "cc": "c1"}),
            json!({"cc": "c2"}),
        ]);
        assert_eq!(patients[0].document_id, "B1");
        assert_eq!(patients[1].document_id, "c2");
    }

    #[test]
    fn doctors_are_excluded() {
        let patients = parse_patients(&[
            json!({"nome": "Dr. Silva", "profissao": "Médico de família"}),
            json!({"nome": "Ana", "profissao": "Professora de Medicina"}),
            json!({"nome": "Rui", "profissao": "Enfermeiro"}),
        ]);
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "Rui");
    }

    #[test]
    fn address_keeps_extra_keys() {
        let patients = parse_patients(&[json!({
            "morada": {"distrito": "Braga", "concelho": "Guimarães"},
            "descrição": "gripe",
            "idade": 31
        })]);
        let patient = &patients[0];
        assert_eq!(patient.arrival_district(), Some("Braga"));
        let address = patient.address.as_ref().expect("address");
        assert_eq!(address.extra["concelho"], json!("Guimarães"));
        assert_eq!(patient.description.as_deref(), Some("gripe"));
        assert_eq!(patient.age, Some(31));
    }

    #[test]
    fn non_objects_are_skipped_but_keep_their_index() {
        let patients = parse_patients(&[json!(7), json!({})]);
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].id, "p1");
        assert_eq!(patients[0].name, "Pessoa 2");
    }

    #[test]
    fn missing_file_is_an_empty_roster() {
        let patients = load_patients("definitely/not/here.json", None, Some(1)).expect("load");
        assert!(patients.is_empty());
    }
}
