//! Doctor/patient matching policy.

use crate::doctors::DoctorPool;
use crate::patient::PatientId;
use crate::queues::WaitingQueues;
use crate::routing::{Specialty, FALLBACK_SPECIALTY};

/// Decides which doctor takes an arriving patient and which waiting patient a
/// freed doctor takes next.
pub trait DoctorMatching: Send + Sync {
    /// Index of the doctor that should see a patient needing `required`, or
    /// `None` when the patient must wait.
    fn find_doctor(&self, doctors: &DoctorPool, required: Specialty) -> Option<usize>;

    /// Remove and return the next patient for a doctor of `specialty` that just
    /// became free.
    fn next_patient(&self, specialty: Specialty, queues: &mut WaitingQueues) -> Option<PatientId>;
}

/// Specialist first, generalist as safety net.
///
/// # Arrival
///
/// 1. First free doctor (index order) whose specialty equals the required one.
/// 2. Otherwise the first free general practitioner.
///
/// # Freed doctor
///
/// 1. Front of the doctor's own specialty queue.
/// 2. A generalist with an empty own queue takes the front of the first
///    non-empty queue in creation order.
/// 3. A specialist with an empty own queue stays idle.
#[derive(Debug, Default)]
pub struct SpecialtyFirstMatching;

impl DoctorMatching for SpecialtyFirstMatching {
    fn find_doctor(&self, doctors: &DoctorPool, required: Specialty) -> Option<usize> {
        let slots = doctors.slots();
        slots
            .iter()
            .find(|slot| slot.free && slot.specialty == required)
            .or_else(|| {
                slots
                    .iter()
                    .find(|slot| slot.free && slot.specialty == FALLBACK_SPECIALTY)
            })
            .map(|slot| slot.index)
    }

    fn next_patient(&self, specialty: Specialty, queues: &mut WaitingQueues) -> Option<PatientId> {
        if let Some(patient) = queues.pop_front(specialty) {
            return Some(patient);
        }
        if specialty == FALLBACK_SPECIALTY {
            // Own queue is the general-practice queue and is already empty.
            return queues.pop_first_non_empty();
        }
        None
    }
}
