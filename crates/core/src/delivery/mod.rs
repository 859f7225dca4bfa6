//! Batch delivery splitter

mod splitter;

pub use splitter::split_page;
