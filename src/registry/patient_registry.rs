use std::path::Path;

use tracing::debug;

use crate::common::{BedSlot, MedrecError, PatientId, Result, WardConfig};
use crate::persist::{FlatFile, LoadReport};
use crate::record::Patient;
use crate::store::{InOrderIter, RecordStore};
use crate::triage::{TreatmentHistory, WaitingQueue};
use crate::ward::BedAllocator;

/// The facade the interactive layer drives: record store, bed allocator,
/// waiting queue, and treatment history behind one mutation surface.
///
/// Store and allocator form a single consistency domain. Admission,
/// discharge, and deletion go through here so that no path can leave the slot
/// table disagreeing with the bed field of the record it annotates. Deleting
/// an admitted patient is rejected with `StillAdmitted`; the explicit
/// confirmed path is [`discharge_and_delete`](Self::discharge_and_delete).
pub struct PatientRegistry {
    store: RecordStore,
    ward: BedAllocator,
    waiting: WaitingQueue,
    history: TreatmentHistory,
    config: WardConfig,
    /// Persistence adapter bound by the last load/save; reused while the
    /// path is unchanged so its operation counters span the session.
    file: Option<FlatFile>,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::with_config(WardConfig::default())
    }

    pub fn with_config(config: WardConfig) -> Self {
        Self {
            store: RecordStore::new(),
            ward: BedAllocator::new(config),
            waiting: WaitingQueue::new(),
            history: TreatmentHistory::new(),
            config,
            file: None,
        }
    }

    /// Opens a registry from the persisted file at `path`, creating the file
    /// if absent (an absent file is an empty database). Returns the registry
    /// together with the per-line load report.
    pub fn open<P: AsRef<Path>>(path: P, config: WardConfig) -> Result<(Self, LoadReport)> {
        let mut registry = Self::with_config(config);
        let report = registry.load(path)?;
        Ok((registry, report))
    }

    // --- record store ---

    /// Inserts a record without touching the waiting queue.
    /// Fails with `DuplicateId` if the ID is taken.
    pub fn insert(&mut self, patient: Patient) -> Result<()> {
        self.store.insert(patient)
    }

    /// Registers a new patient: inserts the record and puts a copy at the
    /// back of the waiting queue, as front-desk registration does.
    pub fn register(&mut self, patient: Patient) -> Result<()> {
        let id = patient.id();
        self.store.insert(patient.clone())?;
        self.waiting.enqueue(patient);
        debug!(%id, "registered patient");
        Ok(())
    }

    pub fn find(&self, id: PatientId) -> Option<&Patient> {
        self.store.get(id)
    }

    /// All records in ascending ID order.
    pub fn patients(&self) -> InOrderIter<'_> {
        self.store.iter()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Deletes a record that is not currently admitted.
    ///
    /// Fails with `StillAdmitted` if the patient holds a bed; callers that
    /// have confirmed the discharge use
    /// [`discharge_and_delete`](Self::discharge_and_delete) instead. Either
    /// way the allocator and the store stay consistent.
    pub fn delete(&mut self, id: PatientId) -> Result<Patient> {
        if !self.store.contains(id) {
            return Err(MedrecError::PatientNotFound(id));
        }
        if self.ward.is_occupied_by(id) {
            return Err(MedrecError::StillAdmitted(id));
        }

        let removed = self.store.remove(id)?;
        debug!(%id, "deleted patient record");
        Ok(removed)
    }

    /// The confirmed discharge-then-delete path: releases the bed if one is
    /// held, then removes the record.
    pub fn discharge_and_delete(&mut self, id: PatientId) -> Result<Patient> {
        if !self.store.contains(id) {
            return Err(MedrecError::PatientNotFound(id));
        }
        if self.ward.is_occupied_by(id) {
            self.discharge(id)?;
        }

        let removed = self.store.remove(id)?;
        debug!(%id, "discharged and deleted patient record");
        Ok(removed)
    }

    // --- ward ---

    /// Admits the patient to the lowest-numbered free bed.
    pub fn admit(&mut self, id: PatientId) -> Result<BedSlot> {
        let patient = self
            .store
            .get_mut(id)
            .ok_or(MedrecError::PatientNotFound(id))?;
        let slot = self.ward.assign(patient)?;
        debug!(%id, %slot, "admitted patient");
        Ok(slot)
    }

    /// Releases the patient's bed.
    pub fn discharge(&mut self, id: PatientId) -> Result<BedSlot> {
        let patient = self
            .store
            .get_mut(id)
            .ok_or(MedrecError::PatientNotFound(id))?;
        let slot = self.ward.discharge(patient)?;
        debug!(%id, %slot, "discharged patient");
        Ok(slot)
    }

    pub fn is_admitted(&self, id: PatientId) -> bool {
        self.ward.is_occupied_by(id)
    }

    pub fn available_beds(&self) -> usize {
        self.ward.available()
    }

    pub fn ward_capacity(&self) -> usize {
        self.ward.capacity()
    }

    // --- waiting queue / history ---

    pub fn enqueue_waiting(&mut self, patient: Patient) {
        self.waiting.enqueue(patient);
    }

    pub fn dequeue_waiting(&mut self) -> Option<Patient> {
        self.waiting.dequeue()
    }

    /// Takes the next patient off the waiting queue and records them as the
    /// most recently treated. Returns `None` when nobody is waiting.
    pub fn treat_next(&mut self) -> Option<Patient> {
        let patient = self.waiting.dequeue()?;
        debug!(id = %patient.id(), "treating patient");
        self.history.push(patient.clone());
        Some(patient)
    }

    pub fn push_history(&mut self, patient: Patient) {
        self.history.push(patient);
    }

    pub fn last_treated(&self) -> Option<&Patient> {
        self.history.last()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Waiting patients front-to-back, for dashboard rendering.
    pub fn waiting(&self) -> impl Iterator<Item = &Patient> {
        self.waiting.iter()
    }

    // --- persistence ---

    /// Replaces the store and allocator with the contents of the persisted
    /// file at `path`. Queue and history are session state and are left
    /// untouched. Returns the per-line load report.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        self.bind_file(path.as_ref())?;
        let file = self.file.as_ref().expect("persistence handle bound above");
        let outcome = file.load(self.config)?;
        self.store = outcome.store;
        self.ward = outcome.ward;
        Ok(outcome.report)
    }

    /// Writes every record to the file at `path` in ascending ID order,
    /// truncating whatever was there. Returns the number of records written.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        self.bind_file(path.as_ref())?;
        let file = self.file.as_ref().expect("persistence handle bound above");
        file.save(self.store.iter())
    }

    /// The persistence adapter bound by the last load or save, if any;
    /// exposes the adapter's session statistics.
    pub fn persistence(&self) -> Option<&FlatFile> {
        self.file.as_ref()
    }

    /// Opens the adapter for `path`, keeping the held handle when it already
    /// points there.
    fn bind_file(&mut self, path: &Path) -> Result<()> {
        let rebind = self
            .file
            .as_ref()
            .map_or(true, |file| file.db_path() != path.to_string_lossy().as_ref());
        if rebind {
            self.file = Some(FlatFile::new(path)?);
        }
        Ok(())
    }
}

impl Default for PatientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
