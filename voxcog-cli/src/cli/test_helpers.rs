//! Small helpers shared across CLI tests.

use std::path::{Path, PathBuf};

use ndarray::Array3;
use tempfile::TempDir;
use voxcog_test_support::fixtures::{letter_f, write_volume};

use super::{Cli, CliError, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_letter_f(dir: &TempDir, name: &str) -> PathBuf {
    write_u8_volume(dir.path(), name, &letter_f())
}

pub(super) fn write_u8_volume(dir: &Path, name: &str, volume: &Array3<u8>) -> PathBuf {
    match write_volume(dir, name, volume) {
        Ok(path) => path,
        Err(err) => panic!("failed to write `{name}`: {err}"),
    }
}

pub(super) fn file_cli(path: PathBuf, remove: &[&str]) -> Cli {
    Cli {
        input: Some(path),
        input_dir: None,
        remove: remove.iter().map(|token| (*token).to_owned()).collect(),
        scale: None,
    }
}

pub(super) fn dir_cli(dir: &Path, remove: &[&str]) -> Cli {
    Cli {
        input: None,
        input_dir: Some(dir.to_path_buf()),
        remove: remove.iter().map(|token| (*token).to_owned()).collect(),
        scale: None,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn assert_close(actual: [f64; 3], expected: [f64; 3]) {
    for (axis, (a, e)) in actual.into_iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-6, "axis {axis}: {a} != {e}");
    }
}
