use std::fmt;

use crate::common::{BedSlot, PatientId};

/// A patient's stored data plus current bed assignment.
///
/// Identity (`id`) is immutable after creation; the bed assignment is the only
/// field mutated in place, and only through the ward allocator so that the
/// allocation table and this field never diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    id: PatientId,
    pub name: String,
    pub age: u32,
    pub disease: String,
    bed: Option<BedSlot>,
}

impl Patient {
    pub fn new(id: PatientId, name: impl Into<String>, age: u32, disease: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            disease: disease.into(),
            bed: None,
        }
    }

    /// Reconstructs a patient with a bed assignment during persistence load.
    /// Crate-internal: a preset bed field is only valid once the allocator
    /// has restored the matching slot, which the loader guarantees.
    pub(crate) fn with_bed(
        id: PatientId,
        name: impl Into<String>,
        age: u32,
        disease: impl Into<String>,
        bed: Option<BedSlot>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            disease: disease.into(),
            bed,
        }
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn bed(&self) -> Option<BedSlot> {
        self.bed
    }

    pub fn is_admitted(&self) -> bool {
        self.bed.is_some()
    }

    /// Sets or clears the bed assignment. Only the ward allocator should call
    /// this; it keeps the slot table and this field in lockstep.
    pub(crate) fn set_bed(&mut self, bed: Option<BedSlot>) {
        self.bed = bed;
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bed {
            Some(slot) => write!(f, "#{} {} ({}) - {}", self.id, self.name, slot, self.disease),
            None => write!(f, "#{} {} - {}", self.id, self.name, self.disease),
        }
    }
}
