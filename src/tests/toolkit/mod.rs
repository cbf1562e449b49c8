//! Test fixtures and bitstream inspection helpers
mod fixtures;
mod words;

pub use fixtures::*;
pub use words::*;
