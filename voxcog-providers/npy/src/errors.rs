use std::{fmt, io};

use ndarray_npy::ReadNpyError;
use thiserror::Error;
use voxcog_core::{ErrorKind, GeometryError};

/// Failures raised while loading a `.npy` segmentation.
///
/// `source_name` is the path (or caller-chosen name) of the input so that
/// messages point at the offending file.
#[derive(Debug, Error)]
pub enum NpyVolumeError {
    /// The file could not be read.
    #[error("failed to read `{source_name}`")]
    Io {
        /// Input being read.
        source_name: String,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The bytes are not a readable three-dimensional `.npy` array.
    #[error("`{source_name}` is not a valid 3D .npy array")]
    Malformed {
        /// Input being read.
        source_name: String,
        /// Decoder failure.
        #[source]
        source: ReadNpyError,
    },
    /// The array holds something other than integer labels.
    #[error("`{source_name}` stores unsupported dtype {descriptor}; expected an integer dtype")]
    UnsupportedDtype {
        /// Input being read.
        source_name: String,
        /// NumPy type descriptor found in the header.
        descriptor: String,
    },
    /// An unsigned 64-bit label does not fit the signed label type.
    #[error("`{source_name}` contains label {value}, which exceeds the supported range")]
    LabelOutOfRange {
        /// Input being read.
        source_name: String,
        /// First offending value.
        value: u64,
    },
    /// The array decoded but is not a usable segmentation.
    #[error("`{source_name}` is not a usable segmentation")]
    Volume {
        /// Input being read.
        source_name: String,
        /// Rejection raised by the core volume type.
        #[source]
        source: GeometryError,
    },
}

/// Stable codes describing [`NpyVolumeError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum NpyVolumeErrorCode {
    /// The file could not be read.
    Io,
    /// The bytes are not a readable three-dimensional `.npy` array.
    Malformed,
    /// The array holds something other than integer labels.
    UnsupportedDtype,
    /// An unsigned 64-bit label does not fit the signed label type.
    LabelOutOfRange,
    /// The array decoded but is not a usable segmentation.
    EmptyVolume,
}

impl NpyVolumeErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "NPY_IO",
            Self::Malformed => "NPY_MALFORMED",
            Self::UnsupportedDtype => "NPY_UNSUPPORTED_DTYPE",
            Self::LabelOutOfRange => "NPY_LABEL_OUT_OF_RANGE",
            Self::EmptyVolume => "NPY_EMPTY_VOLUME",
        }
    }
}

impl fmt::Display for NpyVolumeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NpyVolumeError {
    /// Retrieve the stable [`NpyVolumeErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> NpyVolumeErrorCode {
        match self {
            Self::Io { .. } => NpyVolumeErrorCode::Io,
            Self::Malformed { .. } => NpyVolumeErrorCode::Malformed,
            Self::UnsupportedDtype { .. } => NpyVolumeErrorCode::UnsupportedDtype,
            Self::LabelOutOfRange { .. } => NpyVolumeErrorCode::LabelOutOfRange,
            Self::Volume { .. } => NpyVolumeErrorCode::EmptyVolume,
        }
    }

    /// Classify this error within [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Malformed { .. }
            | Self::UnsupportedDtype { .. }
            | Self::LabelOutOfRange { .. } => ErrorKind::Format,
            Self::Volume { source, .. } => source.kind(),
        }
    }
}
