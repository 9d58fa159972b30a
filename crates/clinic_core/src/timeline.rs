//! Per-minute series rebuilt after the event heap drains.
//!
//! `queue_sizes[m]` is the number of patients that arrived at or before minute
//! `m` minus those that started a consultation at or before `m`.
//! `occupancy[m]` is the share of doctors busy during minute `m`, where a
//! consultation starting at `s` with duration `d` occupies the whole minutes
//! `[floor(s), floor(s) + ceil(d))`, truncated at the horizon.

/// Queue-size series by a linear sweep over sorted timestamps.
///
/// `starts` holds the start time of every patient that began a consultation.
/// Produces exactly the same values as [queue_sizes_naive].
pub fn queue_sizes(arrivals: &[f64], starts: &[f64], simulation_time: u32) -> Vec<usize> {
    let mut arrivals = arrivals.to_vec();
    let mut starts = starts.to_vec();
    arrivals.sort_by(f64::total_cmp);
    starts.sort_by(f64::total_cmp);

    let mut arrived = 0;
    let mut started = 0;
    (0..simulation_time)
        .map(|minute| {
            let m = f64::from(minute);
            while arrived < arrivals.len() && arrivals[arrived] <= m {
                arrived += 1;
            }
            while started < starts.len() && starts[started] <= m {
                started += 1;
            }
            arrived.saturating_sub(started)
        })
        .collect()
}

/// Reference O(T × P) definition of the queue-size series.
///
/// `patients` pairs each arrival time with the start time, if any.
pub fn queue_sizes_naive(patients: &[(f64, Option<f64>)], simulation_time: u32) -> Vec<usize> {
    (0..simulation_time)
        .map(|minute| {
            let m = f64::from(minute);
            let mut arrived = 0usize;
            let mut started = 0usize;
            for (arrival, start) in patients {
                if *arrival <= m {
                    arrived += 1;
                    if start.is_some_and(|s| s <= m) {
                        started += 1;
                    }
                }
            }
            arrived.saturating_sub(started)
        })
        .collect()
}

/// Busy-doctor count per whole minute of the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyTimeline {
    slots: Vec<u32>,
}

impl OccupancyTimeline {
    pub fn new(simulation_time: u32) -> Self {
        Self {
            slots: vec![0; simulation_time as usize],
        }
    }

    /// Mark the minutes covered by a consultation.
    pub fn record(&mut self, start: f64, duration: f64) {
        let horizon = self.slots.len();
        // Float-to-int casts saturate, so huge or negative values are safe.
        let first = start.floor() as usize;
        let last = first
            .saturating_add(duration.ceil() as usize)
            .min(horizon);
        if last > first {
            for slot in &mut self.slots[first..last] {
                *slot += 1;
            }
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.slots
    }

    /// `min(busy, num_doctors) / max(1, num_doctors) × 100` for every minute.
    pub fn percent_series(&self, num_doctors: usize) -> Vec<f64> {
        let denom = num_doctors.max(1) as f64;
        self.slots
            .iter()
            .map(|busy| (*busy as usize).min(num_doctors) as f64 / denom * 100.0)
            .collect()
    }

    /// Mean number of busy doctors per minute, each minute capped at
    /// `num_doctors`. Zero for an empty horizon.
    pub fn capped_mean_busy(&self, num_doctors: usize) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        let total: usize = self
            .slots
            .iter()
            .map(|busy| (*busy as usize).min(num_doctors))
            .sum();
        total as f64 / self.slots.len() as f64
    }
}
