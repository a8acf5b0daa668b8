//! Builders for on-disk and in-memory `.npy` inputs.

use std::path::PathBuf;

use ndarray::{Array, Dimension};
use ndarray_npy::{WritableElement, WriteNpyExt};
use tempfile::TempDir;
use voxcog_core::{CommandDescriptor, build_command};
use voxcog_test_support::fixtures::{letter_f, write_volume};

pub(super) fn npy_bytes<A, D>(array: &Array<A, D>) -> Vec<u8>
where
    A: WritableElement,
    D: Dimension,
{
    let mut bytes = Vec::new();
    array.write_npy(&mut bytes).expect("in-memory write");
    bytes
}

/// Letter F written to a temporary directory, with a validated command.
pub(super) struct LetterF {
    pub(super) dir: TempDir,
    pub(super) path: PathBuf,
}

impl LetterF {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = write_volume(dir.path(), "letter_f.npy", &letter_f()).expect("write fixture");
        Self { dir, path }
    }

    pub(super) fn command(&self, exclude: &[&str]) -> CommandDescriptor {
        build_command(&self.path, exclude).expect("fixture command is valid")
    }
}
