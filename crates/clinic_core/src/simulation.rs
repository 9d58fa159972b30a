//! The event loop.
//!
//! Each call to [ClinicSimulation::run] builds a fresh run context holding
//! every piece of mutable run state, seeds the heap with arrivals, and pops
//! events until the heap is empty. Departures past the horizon are still
//! processed, so every started consultation ends with exactly one departure.
//!
//! Triage runs twice for a patient that had to queue: once on arrival (which
//! fixes the priority used for queue ordering) and again when a doctor takes
//! them (which fixes the specialty and reason written to the trace). When the
//! random substitution triggers, the two calls can disagree.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::arrivals::{generate_arrivals, ScheduledArrival};
use crate::clock::{EventKind, SimulationClock};
use crate::distributions::ServiceDistribution;
use crate::doctors::DoctorPool;
use crate::matching::{DoctorMatching, SpecialtyFirstMatching};
use crate::patient::{AssignedPriorities, PatientId, PatientRecord};
use crate::queues::WaitingQueues;
use crate::routing::{specialty_for_illness, Specialty};
use crate::scenario::ClinicParams;
use crate::stats::{compute_stats, ClinicStats, StatsInput};
use crate::telemetry::{ConsultationRecord, RunCounts, ServiceEpisode};
use crate::timeline::{queue_sizes, OccupancyTimeline};
use crate::triage::triage;

/// Everything a finished run produces.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    /// Waiting patients per minute, length = simulation time.
    #[serde(rename = "fila_sizes")]
    pub queue_sizes: Vec<usize>,
    /// Busy-doctor percentage per minute, length = simulation time.
    #[serde(rename = "ocupacao_medicos")]
    pub occupancy: Vec<f64>,
    #[serde(rename = "eventos")]
    pub episodes: Vec<ServiceEpisode>,
    /// One entry per arrival with a known district, in arrival order.
    #[serde(rename = "distritos_pacientes")]
    pub districts: Vec<String>,
    pub stats: ClinicStats,
    pub counts: RunCounts,
    /// Generated arrivals in time order.
    #[serde(skip)]
    pub arrivals: Vec<ScheduledArrival>,
    #[serde(skip)]
    pub consultations: Vec<ConsultationRecord>,
    #[serde(skip)]
    pub priorities: AssignedPriorities,
}

impl SimulationOutcome {
    /// Wait before consultation, one sample per started patient.
    pub fn wait_samples(&self) -> Vec<f64> {
        self.consultations.iter().map(ConsultationRecord::wait).collect()
    }

    pub fn consultation_samples(&self) -> Vec<f64> {
        self.consultations.iter().map(|c| c.duration).collect()
    }

    pub fn time_in_clinic_samples(&self) -> Vec<f64> {
        self.consultations
            .iter()
            .map(ConsultationRecord::time_in_clinic)
            .collect()
    }
}

/// A configured clinic plus the roster it will simulate.
pub struct ClinicSimulation {
    params: ClinicParams,
    patients: Vec<PatientRecord>,
    matching: Box<dyn DoctorMatching>,
}

impl ClinicSimulation {
    pub fn new(params: ClinicParams, patients: Vec<PatientRecord>) -> Self {
        Self {
            params,
            patients,
            matching: Box::new(SpecialtyFirstMatching),
        }
    }

    /// Replace the default specialist-first policy.
    pub fn with_matching(mut self, matching: Box<dyn DoctorMatching>) -> Self {
        self.matching = matching;
        self
    }

    pub fn params(&self) -> &ClinicParams {
        &self.params
    }

    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    /// Run the simulation to completion. Runs are independent; with a fixed
    /// seed two runs produce identical outcomes.
    pub fn run(&self) -> SimulationOutcome {
        let mut ctx = RunContext::new(&self.params, self.patients.len());

        let arrivals = generate_arrivals(
            &self.params.arrival_pattern,
            self.params.lambda_rate,
            self.params.simulation_time,
            self.patients.len(),
            &mut ctx.rng,
        );
        for arrival in &arrivals {
            ctx.arrival_time[arrival.patient.index()] = Some(arrival.time);
            ctx.clock
                .schedule_at(arrival.time, EventKind::Arrival, arrival.patient);
        }
        tracing::debug!(arrivals = arrivals.len(), "arrivals scheduled");

        while let Some(event) = ctx.clock.pop_next() {
            match event.kind {
                EventKind::Arrival => self.handle_arrival(&mut ctx, event.patient),
                EventKind::Departure => self.handle_departure(&mut ctx, event.patient),
            }
        }

        let outcome = ctx.finish(&self.params, arrivals);
        tracing::info!(
            arrivals = outcome.counts.arrivals,
            served = outcome.stats.patients_served,
            still_waiting = outcome.counts.still_waiting,
            mean_wait = outcome.stats.mean_wait,
            "simulation finished"
        );
        outcome
    }

    fn handle_arrival(&self, ctx: &mut RunContext, id: PatientId) {
        let now = ctx.clock.now();
        let patient = &self.patients[id.index()];
        let decision = triage(patient, &mut ctx.rng);
        ctx.priorities.assign(id, decision.priority);
        let specialty = specialty_for_illness(&decision.illness);

        if let Some(district) = patient.arrival_district() {
            ctx.districts.push(district.to_string());
        }
        ctx.queues.ensure(specialty);

        match self.matching.find_doctor(&ctx.doctors, specialty) {
            Some(doctor) => {
                ctx.start_consultation(doctor, id, patient, specialty, decision.reason);
            }
            None => {
                ctx.queues.enqueue(specialty, id, &ctx.priorities);
                tracing::debug!(
                    time = now,
                    patient = %id,
                    specialty = %specialty,
                    priority = %decision.priority,
                    "patient queued"
                );
                ctx.episodes.push(ServiceEpisode {
                    start_minute: now.floor() as u64,
                    duration: 0.0,
                    doctor: None,
                    patient_name: patient.name.clone(),
                    specialty,
                    reason: decision.reason,
                });
            }
        }
    }

    fn handle_departure(&self, ctx: &mut RunContext, id: PatientId) {
        let now = ctx.clock.now();
        ctx.departures += 1;
        if let Some(index) = ctx.consultation_index[id.index()] {
            ctx.consultations[index].departure = Some(now);
        }

        let Some(doctor) = ctx.assigned_doctor[id.index()] else {
            return;
        };
        let Some(slot) = ctx.doctors.get_mut(doctor) else {
            return;
        };
        slot.release();
        let doctor_specialty = slot.specialty;
        tracing::debug!(time = now, patient = %id, doctor, "departure");

        if let Some(next) = self.matching.next_patient(doctor_specialty, &mut ctx.queues) {
            let patient = &self.patients[next.index()];
            // Re-classified at dispatch; see module docs.
            let decision = triage(patient, &mut ctx.rng);
            let specialty = specialty_for_illness(&decision.illness);
            ctx.start_consultation(doctor, next, patient, specialty, decision.reason);
        }
    }
}

/// All mutable state of one run.
struct RunContext {
    clock: SimulationClock,
    queues: WaitingQueues,
    doctors: DoctorPool,
    rng: StdRng,
    priorities: AssignedPriorities,
    occupancy: OccupancyTimeline,
    episodes: Vec<ServiceEpisode>,
    districts: Vec<String>,
    consultations: Vec<ConsultationRecord>,
    arrival_time: Vec<Option<f64>>,
    assigned_doctor: Vec<Option<usize>>,
    consultation_index: Vec<Option<usize>>,
    departures: usize,
    service_distribution: ServiceDistribution,
    mean_service_time: f64,
}

impl RunContext {
    fn new(params: &ClinicParams, roster_len: usize) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            clock: SimulationClock::default(),
            queues: WaitingQueues::new(),
            doctors: DoctorPool::from_assignments(&params.resolved_specialties()),
            rng,
            priorities: AssignedPriorities::with_capacity(roster_len),
            occupancy: OccupancyTimeline::new(params.simulation_time),
            episodes: Vec::new(),
            districts: Vec::new(),
            consultations: Vec::new(),
            arrival_time: vec![None; roster_len],
            assigned_doctor: vec![None; roster_len],
            consultation_index: vec![None; roster_len],
            departures: 0,
            service_distribution: params.service_distribution,
            mean_service_time: params.mean_service_time,
        }
    }

    fn start_consultation(
        &mut self,
        doctor: usize,
        id: PatientId,
        patient: &PatientRecord,
        specialty: Specialty,
        reason: String,
    ) {
        let now = self.clock.now();
        let duration = self
            .service_distribution
            .sample_minutes(self.mean_service_time, &mut self.rng);
        let Some(slot) = self.doctors.get_mut(doctor) else {
            return;
        };
        slot.start_consultation(duration);

        self.assigned_doctor[id.index()] = Some(doctor);
        self.consultation_index[id.index()] = Some(self.consultations.len());
        self.consultations.push(ConsultationRecord {
            patient: id,
            doctor,
            arrival: self.arrival_time[id.index()].unwrap_or(now),
            start: now,
            duration,
            departure: None,
        });
        self.occupancy.record(now, duration);
        self.clock
            .schedule_at(now + duration, EventKind::Departure, id);
        tracing::debug!(
            time = now,
            patient = %id,
            doctor,
            specialty = %specialty,
            duration,
            "consultation started"
        );
        self.episodes.push(ServiceEpisode {
            start_minute: now.floor() as u64,
            duration,
            doctor: Some(doctor),
            patient_name: patient.name.clone(),
            specialty,
            reason,
        });
    }

    fn finish(self, params: &ClinicParams, arrivals: Vec<ScheduledArrival>) -> SimulationOutcome {
        let arrival_times: Vec<f64> = arrivals.iter().map(|a| a.time).collect();
        let start_times: Vec<f64> = self.consultations.iter().map(|c| c.start).collect();
        let queue_sizes = queue_sizes(&arrival_times, &start_times, params.simulation_time);
        let occupancy = self.occupancy.percent_series(params.num_doctors);

        let counts = RunCounts {
            arrivals: arrivals.len(),
            departed: self.departures,
            still_waiting: self.queues.total_waiting(),
            in_service: self.doctors.busy_count(),
        };
        debug_assert!(counts.is_conserved(), "patient conservation violated: {counts:?}");

        let stats = compute_stats(StatsInput {
            consultations: &self.consultations,
            doctors: self.doctors.slots(),
            queue_sizes: &queue_sizes,
            occupancy: &self.occupancy,
            num_doctors: params.num_doctors,
            simulation_time: params.simulation_time,
            departures: self.departures,
        });

        SimulationOutcome {
            queue_sizes,
            occupancy,
            episodes: self.episodes,
            districts: self.districts,
            stats,
            counts,
            arrivals,
            consultations: self.consultations,
            priorities: self.priorities,
        }
    }
}
