//! Parallel experimentation framework for clinic simulation parameter sweeps.
//!
//! This crate runs many clinic simulations in parallel with varying arrival
//! rates, staffing levels and service-time models, extracts summary metrics
//! per run, and exports them for analysis.
//!
//! # Quick Start
//!
//! ```no_run
//! use clinic_core::test_helpers::roster;
//! use clinic_experiments::{export_to_csv, run_parallel_experiments, ParameterSpace};
//!
//! // Define parameter space (grid search)
//! let space = ParameterSpace::grid()
//!     .lambda_rate(vec![10.0, 20.0, 30.0])
//!     .num_doctors(vec![2, 3, 4])
//!     .replications(3);
//!
//! let parameter_sets = space.generate();
//! let patients = roster(500);
//!
//! // Run experiments in parallel
//! let results = run_parallel_experiments(parameter_sets.clone(), &patients, None)
//!     .expect("thread pool");
//! export_to_csv(&results, &parameter_sets, "sweep.csv").expect("export");
//! ```
//!
//! # Architecture
//!
//! - [`parameters`]: Parameter variation framework (grid search, random sampling)
//! - [`runner`]: Parallel simulation execution using rayon
//! - [`metrics`]: Metrics extraction from a finished run
//! - [`sensitivity`]: Queue length as a function of the arrival rate
//! - [`export`]: Result export to CSV/JSON

pub mod export;
pub mod metrics;
pub mod parameters;
pub mod runner;
pub mod sensitivity;

pub use export::{
    export_outcome_json, export_rate_points_csv, export_timeline_csv, export_to_csv,
    export_to_json, find_lowest_queue_index,
};
pub use metrics::{extract_metrics, SimulationResult};
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, run_single_simulation};
pub use sensitivity::{run_rate_sensitivity, RatePoint, DEFAULT_SWEEP_RATES};
