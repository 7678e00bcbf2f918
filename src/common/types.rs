use std::fmt;
use std::str::FromStr;

/// Patient identifier type - uniquely identifies a record in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(pub u32);

impl PatientId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

/// Bed slot index - identifies one position in the ward allocation table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BedSlot(pub u16);

impl BedSlot {
    pub fn new(slot: u16) -> Self {
        Self(slot)
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for BedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bed {}", self.0)
    }
}
