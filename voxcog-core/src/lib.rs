//! Center-of-geometry computation for labelled voxel segmentations.
//!
//! The pipeline is strictly sequential: [`build_command`] validates the
//! caller's input, a loader (see `voxcog-providers-npy`) turns the command
//! into a [`LabeledVolume`], and [`center_of_geometry`] reduces the volume to
//! a [`Centroid`] in voxel-index units.

mod command;
mod error;
mod geometry;
mod translation;
mod volume;

pub use crate::{
    command::{CommandDescriptor, VOLUME_EXTENSION, build_command, build_command_from_labels},
    error::{CommandError, CommandErrorCode, ErrorKind, GeometryError, GeometryErrorCode},
    geometry::{Centroid, HALF_VOXEL, center_of_geometry},
    translation::Translation,
    volume::{Label, LabeledVolume},
};
