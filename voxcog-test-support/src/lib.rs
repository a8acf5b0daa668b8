//! Shared test utilities used across voxcog crates.
//!
//! Three concerns live here: capturing `tracing` output for instrumentation
//! assertions, tuning property-test runs from the environment, and building
//! golden segmentation volumes on disk.

pub mod ci;
pub mod fixtures;
pub mod tracing_capture;
