use crate::common::{BedSlot, MedrecError, PatientId, Result, WardConfig};
use crate::record::Patient;

/// Fixed-capacity bed allocation table: slot index -> occupying patient ID.
///
/// Allocation policy is deterministic: the lowest-indexed free slot wins. Each
/// patient holds at most one bed, and the table is kept in lockstep with the
/// `bed` field of the record it annotates; `assign` and `discharge` update
/// both sides in the same call so no intermediate state is observable.
pub struct BedAllocator {
    slots: Vec<Option<PatientId>>,
}

impl BedAllocator {
    pub fn new(config: WardConfig) -> Self {
        Self {
            slots: vec![None; config.capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of free beds.
    pub fn available(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Number of occupied beds.
    pub fn occupied(&self) -> usize {
        self.capacity() - self.available()
    }

    /// Admits a patient to the lowest-indexed free bed.
    ///
    /// Fails with `AlreadyAdmitted` if the patient holds a bed, and with
    /// `WardFull` if every slot is occupied; neither failure changes any
    /// state. On success both the slot table and the patient's bed field are
    /// updated before returning.
    pub fn assign(&mut self, patient: &mut Patient) -> Result<BedSlot> {
        if let Some(slot) = patient.bed() {
            return Err(MedrecError::AlreadyAdmitted(patient.id(), slot));
        }

        let free = self
            .slots
            .iter()
            .position(|slot| slot.is_none())
            .ok_or(MedrecError::WardFull {
                capacity: self.capacity(),
            })?;

        let slot = BedSlot::new(free as u16);
        self.slots[free] = Some(patient.id());
        patient.set_bed(Some(slot));
        Ok(slot)
    }

    /// Releases the patient's bed.
    ///
    /// Fails with `NotAdmitted` if the patient holds no bed. The slot table
    /// must agree with the record's bed field: a claimed slot that is outside
    /// the ward, empty, or held by another patient is an error and nothing is
    /// cleared. On success both the slot table and the patient's bed field
    /// are cleared before returning.
    pub fn discharge(&mut self, patient: &mut Patient) -> Result<BedSlot> {
        let slot = patient
            .bed()
            .ok_or_else(|| MedrecError::NotAdmitted(patient.id()))?;

        match self.slots.get(slot.as_usize()).copied() {
            Some(Some(holder)) if holder == patient.id() => {
                self.slots[slot.as_usize()] = None;
                patient.set_bed(None);
                Ok(slot)
            }
            Some(Some(holder)) => Err(MedrecError::BedConflict {
                slot,
                holder,
                claimant: patient.id(),
            }),
            // Record claims a slot the table shows empty.
            Some(None) => Err(MedrecError::NotAdmitted(patient.id())),
            None => Err(MedrecError::SlotOutOfRange {
                slot,
                capacity: self.capacity(),
            }),
        }
    }

    /// Membership scan: is this patient occupying any bed?
    pub fn is_occupied_by(&self, id: PatientId) -> bool {
        self.slots.iter().any(|slot| *slot == Some(id))
    }

    /// Returns the occupant of a slot, if any.
    pub fn occupant(&self, slot: BedSlot) -> Option<PatientId> {
        self.slots.get(slot.as_usize()).copied().flatten()
    }

    /// Occupied slots in ascending slot order.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (BedSlot, PatientId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|id| (BedSlot::new(i as u16), id)))
    }

    /// Re-occupies a specific slot during startup reconstruction from
    /// persisted records. Rejects slots outside the ward and slots already
    /// claimed by another record; the loader treats either as a per-record
    /// recoverable error.
    pub(crate) fn restore(&mut self, slot: BedSlot, id: PatientId) -> Result<()> {
        if slot.as_usize() >= self.capacity() {
            return Err(MedrecError::SlotOutOfRange {
                slot,
                capacity: self.capacity(),
            });
        }
        if let Some(holder) = self.slots[slot.as_usize()] {
            return Err(MedrecError::BedConflict {
                slot,
                holder,
                claimant: id,
            });
        }

        self.slots[slot.as_usize()] = Some(id);
        Ok(())
    }
}

impl Default for BedAllocator {
    fn default() -> Self {
        Self::new(WardConfig::default())
    }
}
