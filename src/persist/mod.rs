pub mod codec;
mod flat_file;

pub use flat_file::*;
