//! Integer element types accepted in label volumes.

use std::fmt;

use ndarray::Array3;
use ndarray_npy::{ReadNpyError, ReadNpyExt, ReadableElement};
use voxcog_core::Label;

use crate::errors::NpyVolumeError;

/// Element type a volume was stored with before widening to [`Label`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LabelDtype {
    /// `|i1`
    Int8,
    /// `|u1`
    Uint8,
    /// `<i2` / `>i2`
    Int16,
    /// `<u2` / `>u2`
    Uint16,
    /// `<i4` / `>i4`
    Int32,
    /// `<u4` / `>u4`
    Uint32,
    /// `<i8` / `>i8`
    Int64,
    /// `<u8` / `>u8`
    Uint64,
}

// Most common first: NumPy's default integer, then segmentation exports.
const CANDIDATES: [LabelDtype; 8] = [
    LabelDtype::Int64,
    LabelDtype::Uint8,
    LabelDtype::Int32,
    LabelDtype::Uint16,
    LabelDtype::Int16,
    LabelDtype::Int8,
    LabelDtype::Uint32,
    LabelDtype::Uint64,
];

impl LabelDtype {
    /// NumPy name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
        }
    }

    fn read(self, bytes: &[u8]) -> Result<Array3<Label>, Rejected> {
        match self {
            Self::Int8 => widen::<i8>(bytes),
            Self::Uint8 => widen::<u8>(bytes),
            Self::Int16 => widen::<i16>(bytes),
            Self::Uint16 => widen::<u16>(bytes),
            Self::Int32 => widen::<i32>(bytes),
            Self::Uint32 => widen::<u32>(bytes),
            Self::Int64 => Array3::<i64>::read_npy(bytes).map_err(Rejected::from),
            Self::Uint64 => narrow_u64(bytes),
        }
    }
}

impl fmt::Display for LabelDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Rejected {
    WrongType(String),
    Malformed(ReadNpyError),
    OutOfRange(u64),
}

impl From<ReadNpyError> for Rejected {
    fn from(error: ReadNpyError) -> Self {
        match error {
            ReadNpyError::WrongDescriptor(descriptor) => Self::WrongType(descriptor.to_string()),
            other => Self::Malformed(other),
        }
    }
}

/// Decodes `bytes` as a 3D array of any supported integer type.
pub(crate) fn decode(
    source_name: &str,
    bytes: &[u8],
) -> Result<(Array3<Label>, LabelDtype), NpyVolumeError> {
    let mut descriptor = String::new();
    for dtype in CANDIDATES {
        match dtype.read(bytes) {
            Ok(labels) => return Ok((labels, dtype)),
            Err(Rejected::WrongType(found)) => descriptor = found,
            Err(Rejected::Malformed(source)) => {
                return Err(NpyVolumeError::Malformed {
                    source_name: source_name.to_owned(),
                    source,
                });
            }
            Err(Rejected::OutOfRange(value)) => {
                return Err(NpyVolumeError::LabelOutOfRange {
                    source_name: source_name.to_owned(),
                    value,
                });
            }
        }
    }
    Err(NpyVolumeError::UnsupportedDtype {
        source_name: source_name.to_owned(),
        descriptor,
    })
}

fn widen<A>(bytes: &[u8]) -> Result<Array3<Label>, Rejected>
where
    A: ReadableElement + Copy,
    Label: From<A>,
{
    let raw = Array3::<A>::read_npy(bytes)?;
    Ok(raw.mapv(Label::from))
}

fn narrow_u64(bytes: &[u8]) -> Result<Array3<Label>, Rejected> {
    let raw = Array3::<u64>::read_npy(bytes)?;
    let mut labels = Array3::<Label>::zeros(raw.raw_dim());
    for (label, &value) in labels.iter_mut().zip(raw.iter()) {
        *label = Label::try_from(value).map_err(|_| Rejected::OutOfRange(value))?;
    }
    Ok(labels)
}
