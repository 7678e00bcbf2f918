use std::collections::VecDeque;

use crate::record::Patient;

/// FIFO of patients awaiting treatment.
///
/// Holds independent clones taken at enqueue time; later edits to the
/// authoritative store do not propagate into queued entries. Dequeueing an
/// empty queue yields `None`, never a placeholder record.
pub struct WaitingQueue {
    queue: VecDeque<Patient>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, patient: Patient) {
        self.queue.push_back(patient);
    }

    pub fn dequeue(&mut self) -> Option<Patient> {
        self.queue.pop_front()
    }

    /// Next patient to be treated, without removing them.
    pub fn front(&self) -> Option<&Patient> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Front-to-back iteration, for waiting-room display.
    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.queue.iter()
    }
}

impl Default for WaitingQueue {
    fn default() -> Self {
        Self::new()
    }
}
