//! Reading label volumes from disk or any byte stream.

use std::fs;
use std::io::Read;

use tracing::{Span, field, info, instrument};
use voxcog_core::{CommandDescriptor, Label, LabeledVolume};

use crate::dtype;
use crate::errors::NpyVolumeError;

/// Reads the volume named by `descriptor` and pairs it with the descriptor's
/// exclusion list.
///
/// The descriptor has already been validated; this only fails when the file
/// cannot be read or decoded.
///
/// # Errors
/// Returns [`NpyVolumeError`] when reading fails, the array is not a 3D
/// integer array, or it has no voxels.
#[instrument(
    name = "npy.load",
    err,
    skip(descriptor),
    fields(path = %descriptor.input_file().display(), shape = field::Empty, dtype = field::Empty),
)]
pub fn load(descriptor: &CommandDescriptor) -> Result<LabeledVolume, NpyVolumeError> {
    let path = descriptor.input_file();
    let source_name = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| NpyVolumeError::Io {
        source_name: source_name.clone(),
        source,
    })?;
    decode_volume(
        &source_name,
        &bytes,
        Some(descriptor.exclude_labels().to_vec()),
    )
}

/// Reads a volume from `reader`, using `source_name` in diagnostics.
///
/// `None` exclusions normalise to an empty list.
///
/// # Errors
/// As [`load`].
///
/// # Examples
/// ```
/// use ndarray::Array3;
/// use ndarray_npy::WriteNpyExt;
///
/// let mut bytes = Vec::new();
/// Array3::<u8>::ones((2, 3, 4)).write_npy(&mut bytes)?;
/// let volume = voxcog_providers_npy::load_from_reader("memory", bytes.as_slice(), None)?;
/// assert_eq!(volume.shape(), [2, 3, 4]);
/// assert!(volume.exclude_labels().is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "npy.load_reader",
    err,
    skip(reader, exclude_labels),
    fields(shape = field::Empty, dtype = field::Empty),
)]
pub fn load_from_reader<R: Read>(
    source_name: &str,
    mut reader: R,
    exclude_labels: Option<Vec<Label>>,
) -> Result<LabeledVolume, NpyVolumeError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| NpyVolumeError::Io {
            source_name: source_name.to_owned(),
            source,
        })?;
    decode_volume(source_name, &bytes, exclude_labels)
}

fn decode_volume(
    source_name: &str,
    bytes: &[u8],
    exclude_labels: Option<Vec<Label>>,
) -> Result<LabeledVolume, NpyVolumeError> {
    let (labels, dtype) = dtype::decode(source_name, bytes)?;
    let span = Span::current();
    span.record("shape", field::debug(labels.shape()));
    span.record("dtype", dtype.as_str());
    let volume = LabeledVolume::try_new(labels, exclude_labels).map_err(|source| {
        NpyVolumeError::Volume {
            source_name: source_name.to_owned(),
            source,
        }
    })?;
    info!(source = source_name, %dtype, "segmentation loaded");
    Ok(volume)
}
