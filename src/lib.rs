//! Medrec - an indexed patient-record store with ward bed allocation
//!
//! This crate provides the core of a single-process patient-record manager:
//! an ordered record store keyed by patient ID, a fixed-capacity bed
//! allocation table kept consistent with the records it annotates, a FIFO
//! treatment queue, a LIFO treatment history, and line-oriented flat-file
//! persistence.
//!
//! # Architecture
//!
//! The system is organized into several layers:
//!
//! - **Record** (`record`): the `Patient` value object - identity plus the
//!   bed assignment the ward keeps in lockstep with its slot table
//!
//! - **Store** (`store`): the authoritative database
//!   - `RecordStore`: ordered map realized as a binary search tree; point
//!     lookup, ascending in-order enumeration, and deletion with in-order
//!     predecessor splicing
//!
//! - **Ward** (`ward`): bed management
//!   - `BedAllocator`: fixed-capacity slot table with deterministic
//!     lowest-free-slot allocation
//!
//! - **Triage** (`triage`): session flow
//!   - `WaitingQueue`: FIFO of patients awaiting treatment
//!   - `TreatmentHistory`: LIFO of treated patients
//!
//! - **Persistence** (`persist`): flat-file save/load
//!   - `FlatFile`: whole-file rewrite on save, per-line recoverable parse on
//!     load
//!   - `codec`: the `id,name,age,disease,bed` line format
//!
//! - **Registry** (`registry`): the facade the interactive layer drives;
//!   treats store + allocator as one consistency domain
//!
//! # Example
//!
//! ```rust,no_run
//! use medrec::common::{PatientId, WardConfig};
//! use medrec::record::Patient;
//! use medrec::registry::PatientRegistry;
//!
//! // Open (or create) the persisted database
//! let (mut registry, report) =
//!     PatientRegistry::open("patients_data.txt", WardConfig::default()).unwrap();
//! assert!(report.skipped.is_empty());
//!
//! // Register a patient and admit them to the first free bed
//! let id = PatientId::new(101);
//! registry.register(Patient::new(id, "Asha Rao", 34, "Flu")).unwrap();
//! let bed = registry.admit(id).unwrap();
//! println!("admitted to {}", bed);
//!
//! // Flush the database back to the flat file
//! registry.save("patients_data.txt").unwrap();
//! ```

pub mod common;
pub mod persist;
pub mod record;
pub mod registry;
pub mod store;
pub mod triage;
pub mod ward;

// Re-export commonly used types at the crate root
pub use common::{BedSlot, MedrecError, PatientId, Result, WardConfig};
pub use record::Patient;
pub use registry::PatientRegistry;
