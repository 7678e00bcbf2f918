use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use bytes::{BufMut, BytesMut};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::common::{MedrecError, Result, WardConfig};
use crate::record::Patient;
use crate::store::RecordStore;
use crate::ward::BedAllocator;

use super::codec;

/// Per-line problems encountered during a load, with 1-based line numbers.
/// A skipped line never aborts the load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<(usize, MedrecError)>,
}

/// Result of reconstructing the database from the flat file: the rebuilt
/// store and allocator plus what was loaded or skipped.
pub struct LoadOutcome {
    pub store: RecordStore,
    pub ward: BedAllocator,
    pub report: LoadReport,
}

/// FlatFile persists the record store to a single line-oriented text file.
///
/// Saving truncates and rewrites the whole file from an ascending-ID
/// snapshot; there is no partial-write recovery if the process dies
/// mid-rewrite. Loading parses every line independently and reports, rather
/// than propagates, per-line failures. A freshly created (empty) file loads
/// as an empty database.
pub struct FlatFile {
    /// The persisted database file
    db_file: Mutex<File>,
    /// Path to the persisted file
    db_path: String,
    /// Number of whole-file saves performed
    num_saves: AtomicU32,
    /// Number of loads performed
    num_loads: AtomicU32,
}

impl FlatFile {
    /// Opens the persisted file at the given path, creating it if absent.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path_str = db_path.as_ref().to_string_lossy().to_string();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&db_path)?;

        Ok(Self {
            db_file: Mutex::new(file),
            db_path: path_str,
            num_saves: AtomicU32::new(0),
            num_loads: AtomicU32::new(0),
        })
    }

    /// Truncates and rewrites the file from the given snapshot, one line per
    /// record. The caller supplies records in ascending ID order; ordering
    /// only matters for human readability of the file, any order parses back.
    /// Returns the number of records written.
    pub fn save<'a>(&self, records: impl Iterator<Item = &'a Patient>) -> Result<usize> {
        let mut buf = BytesMut::new();
        let mut count = 0;

        for patient in records {
            let line = codec::encode_line(patient)?;
            buf.put_slice(line.as_bytes());
            buf.put_u8(b'\n');
            count += 1;
        }

        // Assemble the full image first, then one truncate + one write, so a
        // codec failure never leaves a half-written file behind.
        let mut file = self.db_file.lock();
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&buf)?;
        file.flush()?;

        self.num_saves.fetch_add(1, Ordering::Relaxed);
        debug!(path = %self.db_path, records = count, "saved record store");
        Ok(count)
    }

    /// Reconstructs the record store and bed allocator from the file.
    ///
    /// Each line is parsed independently; malformed lines, duplicate IDs, and
    /// bed conflicts are skipped and reported in the returned `LoadReport`.
    pub fn load(&self, config: WardConfig) -> Result<LoadOutcome> {
        let mut text = String::new();
        {
            let mut file = self.db_file.lock();
            file.seek(SeekFrom::Start(0))?;
            file.read_to_string(&mut text)?;
        }
        self.num_loads.fetch_add(1, Ordering::Relaxed);

        let mut store = RecordStore::new();
        let mut ward = BedAllocator::new(config);
        let mut report = LoadReport::default();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let patient = match codec::parse_line(line_no, raw) {
                Ok(patient) => patient,
                Err(err) => {
                    warn!(path = %self.db_path, line = line_no, %err, "skipping line");
                    report.skipped.push((line_no, err));
                    continue;
                }
            };

            if store.contains(patient.id()) {
                let err = MedrecError::DuplicateId(patient.id());
                warn!(path = %self.db_path, line = line_no, %err, "skipping line");
                report.skipped.push((line_no, err));
                continue;
            }

            // Claim the bed before inserting so a conflicting line is dropped
            // whole, leaving no half-restored record.
            if let Some(slot) = patient.bed() {
                if let Err(err) = ward.restore(slot, patient.id()) {
                    warn!(path = %self.db_path, line = line_no, %err, "skipping line");
                    report.skipped.push((line_no, err));
                    continue;
                }
            }

            store.insert(patient)?;
            report.loaded += 1;
        }

        debug!(
            path = %self.db_path,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded record store"
        );

        Ok(LoadOutcome {
            store,
            ward,
            report,
        })
    }

    /// Returns the path to the persisted file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Number of whole-file saves performed on this handle.
    pub fn num_saves(&self) -> u32 {
        self.num_saves.load(Ordering::Relaxed)
    }

    /// Number of loads performed on this handle.
    pub fn num_loads(&self) -> u32 {
        self.num_loads.load(Ordering::Relaxed)
    }

    /// Flushes buffered writes to stable storage.
    pub fn sync(&self) -> Result<()> {
        let file = self.db_file.lock();
        file.sync_all()?;
        Ok(())
    }
}

impl Drop for FlatFile {
    fn drop(&mut self) {
        let file = self.db_file.get_mut();
        let _ = file.sync_all();
    }
}
