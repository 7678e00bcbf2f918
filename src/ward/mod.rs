mod bed_allocator;

pub use bed_allocator::*;
