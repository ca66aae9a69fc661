//! Placefinder library exports for testing

pub mod codec;
pub mod config;
pub mod search;

#[cfg(test)]
pub mod test_support;
