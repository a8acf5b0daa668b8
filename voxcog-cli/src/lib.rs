//! Support library for the `compute-cog` binary.
//!
//! Exposes the command pipeline and logging setup so integration tests can
//! drive the CLI without spawning a subprocess.

pub mod cli;
pub mod logging;
