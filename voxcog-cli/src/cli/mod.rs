//! Command-line interface for `compute-cog`.
//!
//! A single invocation either reduces one `.npy` label volume to its centre
//! of geometry (`--input`) or walks a directory of volumes (`--input-dir`),
//! optionally printing the translation that recentres a scaled mesh.

mod commands;

pub use commands::{Cli, CliError, ExecutionSummary, VolumeOutcome, render_summary, run_cli};

#[cfg(test)]
mod test_helpers;
