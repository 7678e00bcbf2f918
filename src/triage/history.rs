use crate::record::Patient;

/// LIFO of treated patients. Only the most recent entry is ever inspected;
/// entries are clones taken at push time.
pub struct TreatmentHistory {
    stack: Vec<Patient>,
}

impl TreatmentHistory {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, patient: Patient) {
        self.stack.push(patient);
    }

    /// Most recently treated patient, if any.
    pub fn last(&self) -> Option<&Patient> {
        self.stack.last()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl Default for TreatmentHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PatientId;

    #[test]
    fn test_last_is_most_recent_push() {
        let mut history = TreatmentHistory::new();
        assert!(history.last().is_none());

        history.push(Patient::new(PatientId::new(1), "Ana", 25, "Migraine"));
        history.push(Patient::new(PatientId::new(2), "Bruno", 31, "Flu"));

        assert_eq!(history.last().unwrap().name, "Bruno");
        assert_eq!(history.len(), 2);
    }
}
