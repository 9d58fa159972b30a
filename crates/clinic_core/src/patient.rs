//! Patient records and the per-run priority assignments written by the engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// District label used when a record carries no address at all.
pub const UNKNOWN_DISTRICT: &str = "Desconhecido";

/// Triage tier. Ordering follows service precedence: urgent first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    #[serde(rename = "urgente")]
    Urgent,
    #[serde(rename = "moderada")]
    Moderate,
    #[default]
    #[serde(rename = "normal")]
    Normal,
}

impl Priority {
    /// Sort key used by the waiting queues (urgent=0, moderate=1, normal=2).
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::Moderate => 1,
            Priority::Normal => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "urgente",
            Priority::Moderate => "moderada",
            Priority::Normal => "normal",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Postal address. Only the district is read by the simulation; everything else
/// the dataset carries is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "distrito", default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.district.is_none() && self.extra.is_empty()
    }
}

/// One person to be simulated. Immutable for the duration of a run; the
/// priority computed at arrival lives in [AssignedPriorities].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    pub id: String,
    /// External identity document (CC/BI).
    pub document_id: String,
    pub name: String,
    pub age: Option<u32>,
    pub profession: Option<String>,
    pub sex: Option<String>,
    pub address: Option<Address>,
    /// Explicit illness label, preferred over the free-text description.
    pub illness: Option<String>,
    /// Free-text symptom description; may be missing or filler text.
    pub description: Option<String>,
    pub religion: Option<String>,
    pub sports: Option<serde_json::Value>,
    pub attributes: Option<serde_json::Value>,
}

impl PatientRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            document_id: "N/A".to_string(),
            name: name.into(),
            age: None,
            profession: None,
            sex: None,
            address: None,
            illness: None,
            description: None,
            religion: None,
            sports: None,
            attributes: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_illness(mut self, illness: impl Into<String>) -> Self {
        self.illness = Some(illness.into());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        let address = self.address.get_or_insert_with(Address::default);
        address.district = Some(district.into());
        self
    }

    pub fn with_profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = Some(profession.into());
        self
    }

    /// District recorded for the arrival series.
    ///
    /// A record without an address (or with an empty one) counts as
    /// [UNKNOWN_DISTRICT]; an address without a district contributes nothing.
    pub fn arrival_district(&self) -> Option<&str> {
        match &self.address {
            None => Some(UNKNOWN_DISTRICT),
            Some(address) if address.is_empty() => Some(UNKNOWN_DISTRICT),
            Some(address) => address.district.as_deref().filter(|d| !d.is_empty()),
        }
    }
}

/// Index of a patient in the roster handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(pub usize);

impl PatientId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0 + 1)
    }
}

/// Priority tiers written by the engine, one slot per roster entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignedPriorities {
    slots: Vec<Option<Priority>>,
}

impl AssignedPriorities {
    pub fn with_capacity(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Record the tier for `id`. Each patient is assigned once per run.
    pub fn assign(&mut self, id: PatientId, priority: Priority) {
        let slot = &mut self.slots[id.index()];
        debug_assert!(slot.is_none(), "priority for {id} assigned twice");
        *slot = Some(priority);
    }

    pub fn get(&self, id: PatientId) -> Option<Priority> {
        self.slots.get(id.index()).copied().flatten()
    }

    /// Tier used for queue ordering; unassigned patients sort as normal.
    pub fn rank_of(&self, id: PatientId) -> u8 {
        self.get(id).unwrap_or_default().rank()
    }

    pub fn as_slice(&self) -> &[Option<Priority>] {
        &self.slots
    }
}
