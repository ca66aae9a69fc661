//! Deterministic text/coordinate codecs.

pub mod dms;
pub mod grid;
