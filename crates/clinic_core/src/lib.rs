//! Discrete-event simulation of a walk-in medical clinic.
//!
//! Patients arrive over a virtual clock, are triaged into an illness label and a
//! priority tier, routed to a specialty, and either start a consultation with a
//! free doctor or wait in a per-specialty priority queue. After the event heap
//! drains, the run is replayed minute by minute into queue-size and occupancy
//! series and summarised into aggregate statistics.
//!
//! # Quick Start
//!
//! ```no_run
//! use clinic_core::scenario::ClinicParams;
//! use clinic_core::simulation::ClinicSimulation;
//! use clinic_core::dataset::load_patients_or_empty;
//!
//! let patients = load_patients_or_empty("pessoas.json", None, Some(7));
//! let params = ClinicParams::default().with_seed(42).with_num_doctors(2);
//! let outcome = ClinicSimulation::new(params, patients).run();
//! println!("served: {}", outcome.stats.patients_served);
//! ```

pub mod arrivals;
pub mod clock;
pub mod config;
pub mod dataset;
pub mod distributions;
pub mod doctors;
pub mod error;
pub mod matching;
pub mod patient;
pub mod queues;
pub mod report;
pub mod routing;
pub mod scenario;
pub mod simulation;
pub mod stats;
pub mod telemetry;
pub mod timeline;
pub mod triage;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
