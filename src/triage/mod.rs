mod history;
mod waiting_queue;

pub use history::*;
pub use waiting_queue::*;
