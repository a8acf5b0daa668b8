//! Segmentation loader for NumPy `.npy` label volumes.

mod dtype;
mod errors;
mod loader;

pub use dtype::LabelDtype;
pub use errors::{NpyVolumeError, NpyVolumeErrorCode};
pub use loader::{load, load_from_reader};

#[cfg(test)]
mod tests;
