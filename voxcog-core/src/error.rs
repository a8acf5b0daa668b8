//! Error types for the voxcog core library.
//!
//! Every error enum carries a stable machine-readable code and maps onto the
//! coarse [`ErrorKind`] taxonomy that callers use to decide how to report a
//! failure.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::volume::Label;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Coarse failure classes shared by every stage of the pipeline.
///
/// All kinds are terminal for a single invocation; nothing is retried.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input path does not name an existing regular file.
    NotFound,
    /// Wrong file extension or unparsable array content.
    Format,
    /// The exclusion list holds a non-integer or negative entry.
    InvalidArgument,
    /// No voxel remains once exclusions are applied.
    EmptySelection,
    /// The operating system refused a read.
    Io,
}

impl ErrorKind {
    /// Return the stable name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Format => "format",
            Self::InvalidArgument => "invalid_argument",
            Self::EmptySelection => "empty_selection",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures raised by [`crate::build_command`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CommandError {
    /// The input path is missing or is not a regular file.
    #[error("File {} not found.", path.display())]
    NotFound {
        /// Path supplied by the caller.
        path: PathBuf,
    },
    /// The input file does not carry the volume extension.
    #[error("File {} must be a .{expected} file.", path.display())]
    UnsupportedExtension {
        /// Path supplied by the caller.
        path: PathBuf,
        /// Extension the loader understands.
        expected: &'static str,
    },
    /// An exclusion entry did not parse as an integer.
    #[error("Remove IDs must be integers: `{token}` is not an integer.")]
    NonIntegerLabel {
        /// Raw entry as supplied.
        token: String,
    },
    /// An exclusion entry was negative.
    #[error("Remove IDs must be non-negative: got {label}.")]
    NegativeLabel {
        /// Offending value.
        label: Label,
    },
}

define_error_codes! {
    /// Stable codes describing [`CommandError`] variants.
    enum CommandErrorCode for CommandError {
        /// The input path is missing or is not a regular file.
        NotFound => NotFound { .. } => "COMMAND_NOT_FOUND",
        /// The input file does not carry the volume extension.
        UnsupportedExtension => UnsupportedExtension { .. } => "COMMAND_UNSUPPORTED_EXTENSION",
        /// An exclusion entry did not parse as an integer.
        NonIntegerLabel => NonIntegerLabel { .. } => "COMMAND_NON_INTEGER_LABEL",
        /// An exclusion entry was negative.
        NegativeLabel => NegativeLabel { .. } => "COMMAND_NEGATIVE_LABEL",
    }
}

impl CommandError {
    /// Classify this error within [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UnsupportedExtension { .. } => ErrorKind::Format,
            Self::NonIntegerLabel { .. } | Self::NegativeLabel { .. } => {
                ErrorKind::InvalidArgument
            }
        }
    }
}

/// Failures raised while building a [`crate::LabeledVolume`] or reducing it
/// to a [`crate::Centroid`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GeometryError {
    /// The label array has a zero-length axis.
    #[error("segmentation with shape {shape:?} contains no voxels")]
    EmptyVolume {
        /// Shape of the rejected array.
        shape: [usize; 3],
    },
    /// Every voxel carries an excluded label.
    #[error(
        "Segmentation does not include valid IDs. Valid IDs: {included:?}, remove IDs: {excluded:?}"
    )]
    EmptySelection {
        /// Labels left after exclusion, ascending.
        included: Vec<Label>,
        /// Exclusions as requested by the caller.
        excluded: Vec<Label>,
    },
}

define_error_codes! {
    /// Stable codes describing [`GeometryError`] variants.
    enum GeometryErrorCode for GeometryError {
        /// The label array has a zero-length axis.
        EmptyVolume => EmptyVolume { .. } => "GEOMETRY_EMPTY_VOLUME",
        /// Every voxel carries an excluded label.
        EmptySelection => EmptySelection { .. } => "GEOMETRY_EMPTY_SELECTION",
    }
}

impl GeometryError {
    /// Classify this error within [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyVolume { .. } => ErrorKind::Format,
            Self::EmptySelection { .. } => ErrorKind::EmptySelection,
        }
    }
}
