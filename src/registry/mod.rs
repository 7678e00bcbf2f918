mod patient_registry;

pub use patient_registry::*;
