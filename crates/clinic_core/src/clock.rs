use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::patient::PatientId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arrival,
    Departure,
}

/// One scheduled transition. `seq` is assigned by [SimulationClock] and is
/// strictly increasing, so events at equal times pop in insertion order.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub time: f64,
    pub seq: u64,
    pub kind: EventKind,
    pub patient: PatientId,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap on (time, seq).
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Virtual clock plus the pending event heap for a single run.
#[derive(Debug, Default)]
pub struct SimulationClock {
    now: f64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `kind` for `patient` at `time` and return the assigned sequence number.
    pub fn schedule_at(&mut self, time: f64, kind: EventKind, patient: PatientId) -> u64 {
        debug_assert!(time >= self.now, "event time must be >= current time");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            time,
            seq,
            kind,
            patient,
        });
        seq
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.time;
        Some(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
