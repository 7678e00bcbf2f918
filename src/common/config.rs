/// Number of beds in the default ward
pub const DEFAULT_WARD_CAPACITY: usize = 50;

/// Persisted bed value meaning "not admitted"
pub const NO_BED_SENTINEL: i32 = -1;

/// Field delimiter in the persisted flat file
pub const FIELD_DELIMITER: char = ',';

/// Ward sizing parameters.
///
/// The original system hardcoded a 50-bed ward; capacity is a parameter here
/// but the lowest-free-slot allocation policy is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WardConfig {
    pub capacity: usize,
}

impl WardConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for WardConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_WARD_CAPACITY,
        }
    }
}
