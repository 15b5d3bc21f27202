//! The tools module provides the helpers around the huffpack codec.
//!
//! The tools are:
//! - cli: Command line interface and the settings shared with the codec.
//! - freq_count: Frequency count of the input, the first pass of compression.
//!
pub mod cli;
pub mod freq_count;
