//! Doctor slots: one per configured doctor, each bound to a single specialty.

use crate::routing::Specialty;

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorSlot {
    pub index: usize,
    pub specialty: Specialty,
    pub free: bool,
    /// Sum of consultation durations started by this doctor (minutes).
    pub busy_minutes: f64,
    pub served: usize,
    /// Consultation durations in service-start order.
    pub durations: Vec<f64>,
}

impl DoctorSlot {
    pub fn new(index: usize, specialty: Specialty) -> Self {
        Self {
            index,
            specialty,
            free: true,
            busy_minutes: 0.0,
            served: 0,
            durations: Vec::new(),
        }
    }

    /// Mark busy and record a consultation of `duration` minutes.
    pub fn start_consultation(&mut self, duration: f64) {
        debug_assert!(self.free, "doctor {} double-booked", self.index);
        self.free = false;
        self.served += 1;
        self.busy_minutes += duration;
        self.durations.push(duration);
    }

    pub fn release(&mut self) {
        self.free = true;
    }
}

/// The fixed set of doctors for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorPool {
    slots: Vec<DoctorSlot>,
}

impl DoctorPool {
    /// Build one slot per entry of `specialties`, indexed in order.
    pub fn from_assignments(specialties: &[Specialty]) -> Self {
        Self {
            slots: specialties
                .iter()
                .enumerate()
                .map(|(index, specialty)| DoctorSlot::new(index, *specialty))
                .collect(),
        }
    }

    pub fn slots(&self) -> &[DoctorSlot] {
        &self.slots
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DoctorSlot> {
        self.slots.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn busy_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.free).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_assignment_order() {
        let pool = DoctorPool::from_assignments(&[Specialty::Cardiology, Specialty::GeneralPractice]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.slots()[0].specialty, Specialty::Cardiology);
        assert_eq!(pool.slots()[1].index, 1);
        assert!(pool.slots().iter().all(|slot| slot.free));
    }

    #[test]
    fn consultation_updates_workload() {
        let mut pool = DoctorPool::from_assignments(&[Specialty::GeneralPractice]);
        let slot = pool.get_mut(0).expect("slot");
        slot.start_consultation(12.5);
        assert_eq!(pool.busy_count(), 1);

        let slot = pool.get_mut(0).expect("slot");
        slot.release();
        slot.start_consultation(2.5);
        assert_eq!(slot.served, 2);
        assert_eq!(slot.busy_minutes, 15.0);
        assert_eq!(slot.durations, vec![12.5, 2.5]);
    }
}
