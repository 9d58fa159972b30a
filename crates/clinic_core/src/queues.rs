//! Per-specialty waiting queues.
//!
//! Queues are kept in creation order (general practice first, then each
//! specialty as it is first encountered) because a free generalist scans them
//! in that order. Each queue stays sorted by priority rank, stable on ties.

use crate::patient::{AssignedPriorities, PatientId};
use crate::routing::{Specialty, FALLBACK_SPECIALTY};

#[derive(Debug, Clone, Default)]
pub struct WaitingQueues {
    queues: Vec<(Specialty, Vec<PatientId>)>,
}

impl WaitingQueues {
    /// Queues for a new run: the general-practice queue always exists.
    pub fn new() -> Self {
        let mut queues = Self::default();
        queues.ensure(FALLBACK_SPECIALTY);
        queues
    }

    /// Create the queue for `specialty` if it does not exist yet.
    pub fn ensure(&mut self, specialty: Specialty) {
        if !self.queues.iter().any(|(s, _)| *s == specialty) {
            self.queues.push((specialty, Vec::new()));
        }
    }

    /// Append `patient` and re-sort the queue by priority rank.
    pub fn enqueue(
        &mut self,
        specialty: Specialty,
        patient: PatientId,
        priorities: &AssignedPriorities,
    ) {
        self.ensure(specialty);
        if let Some(queue) = self.queue_mut(specialty) {
            queue.push(patient);
            // sort_by_key is stable: equal ranks keep arrival order.
            queue.sort_by_key(|id| priorities.rank_of(*id));
        }
    }

    pub fn pop_front(&mut self, specialty: Specialty) -> Option<PatientId> {
        let queue = self.queue_mut(specialty)?;
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        }
    }

    /// Pop the front of the first non-empty queue, in creation order.
    pub fn pop_first_non_empty(&mut self) -> Option<PatientId> {
        self.queues
            .iter_mut()
            .find(|(_, queue)| !queue.is_empty())
            .map(|(_, queue)| queue.remove(0))
    }

    pub fn get(&self, specialty: Specialty) -> Option<&[PatientId]> {
        self.queues
            .iter()
            .find(|(s, _)| *s == specialty)
            .map(|(_, queue)| queue.as_slice())
    }

    pub fn len_of(&self, specialty: Specialty) -> usize {
        self.get(specialty).map_or(0, <[PatientId]>::len)
    }

    pub fn total_waiting(&self) -> usize {
        self.queues.iter().map(|(_, queue)| queue.len()).sum()
    }

    /// Specialties in creation order.
    pub fn specialties(&self) -> impl Iterator<Item = Specialty> + '_ {
        self.queues.iter().map(|(s, _)| *s)
    }

    fn queue_mut(&mut self, specialty: Specialty) -> Option<&mut Vec<PatientId>> {
        self.queues
            .iter_mut()
            .find(|(s, _)| *s == specialty)
            .map(|(_, queue)| queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::Priority;

    #[test]
    fn general_practice_queue_is_precreated() {
        let queues = WaitingQueues::new();
        assert_eq!(
            queues.specialties().collect::<Vec<_>>(),
            vec![Specialty::GeneralPractice]
        );
        assert_eq!(queues.total_waiting(), 0);
    }

    #[test]
    fn enqueue_sorts_by_rank_and_keeps_arrival_order_on_ties() {
        let mut priorities = AssignedPriorities::with_capacity(4);
        priorities.assign(PatientId(0), Priority::Normal);
        priorities.assign(PatientId(1), Priority::Moderate);
        priorities.assign(PatientId(2), Priority::Normal);
        priorities.assign(PatientId(3), Priority::Urgent);

        let mut queues = WaitingQueues::new();
        for i in 0..4 {
            queues.enqueue(Specialty::Cardiology, PatientId(i), &priorities);
        }
        assert_eq!(
            queues.get(Specialty::Cardiology),
            Some(&[PatientId(3), PatientId(1), PatientId(0), PatientId(2)][..])
        );
    }

    #[test]
    fn pop_first_non_empty_follows_creation_order() {
        let priorities = AssignedPriorities::with_capacity(2);
        let mut queues = WaitingQueues::new();
        queues.ensure(Specialty::Orthopedics);
        queues.enqueue(Specialty::Pulmonology, PatientId(0), &priorities);
        queues.enqueue(Specialty::Orthopedics, PatientId(1), &priorities);

        assert_eq!(queues.pop_first_non_empty(), Some(PatientId(1)));
        assert_eq!(queues.pop_first_non_empty(), Some(PatientId(0)));
        assert_eq!(queues.pop_first_non_empty(), None);
    }

    #[test]
    fn pop_front_on_missing_or_empty_queue() {
        let mut queues = WaitingQueues::new();
        assert_eq!(queues.pop_front(Specialty::Geriatrics), None);
        assert_eq!(queues.pop_front(Specialty::GeneralPractice), None);
        assert_eq!(queues.len_of(Specialty::Geriatrics), 0);
    }
}
