use thiserror::Error;

use super::types::{BedSlot, PatientId};

/// Record-manager error types
#[derive(Error, Debug)]
pub enum MedrecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Patient {0} not found")]
    PatientNotFound(PatientId),

    #[error("Patient {0} already registered")]
    DuplicateId(PatientId),

    #[error("Ward is full ({capacity} beds occupied)")]
    WardFull { capacity: usize },

    #[error("Patient {0} is already admitted to {1}")]
    AlreadyAdmitted(PatientId, BedSlot),

    #[error("Patient {0} is not admitted to the ward")]
    NotAdmitted(PatientId),

    #[error("Patient {0} is still admitted; discharge before deleting")]
    StillAdmitted(PatientId),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Field '{0}' contains a delimiter or line break and cannot be persisted")]
    UnencodableField(&'static str),

    #[error("{slot} is held by patient {holder} but claimed by patient {claimant}")]
    BedConflict {
        slot: BedSlot,
        holder: PatientId,
        claimant: PatientId,
    },

    #[error("{slot} is out of range for a ward of {capacity} beds")]
    SlotOutOfRange { slot: BedSlot, capacity: usize },
}

pub type Result<T> = std::result::Result<T, MedrecError>;
