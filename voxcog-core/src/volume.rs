//! In-memory labelled segmentation paired with its exclusion list.

use ndarray::Array3;

use crate::error::GeometryError;

/// Integer identifying a material or region; `0` is conventionally void.
pub type Label = i64;

/// A non-empty 3D label array indexed `[x, y, z]` with the labels to leave
/// out of the centre of geometry.
///
/// Exclusions need not occur in the volume; absent ones are ignored when the
/// centroid is computed.
///
/// # Examples
/// ```
/// use ndarray::Array3;
/// use voxcog_core::LabeledVolume;
///
/// let volume = LabeledVolume::try_new(Array3::zeros((2, 2, 1)), None)?;
/// assert!(volume.exclude_labels().is_empty());
/// assert_eq!(volume.shape(), [2, 2, 1]);
/// # Ok::<(), voxcog_core::GeometryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledVolume {
    voxel_labels: Array3<Label>,
    exclude_labels: Vec<Label>,
}

impl LabeledVolume {
    /// Pairs `voxel_labels` with `exclude_labels`, normalising `None` to an
    /// empty list.
    ///
    /// # Errors
    /// Returns [`GeometryError::EmptyVolume`] when any axis has length zero.
    pub fn try_new(
        voxel_labels: Array3<Label>,
        exclude_labels: Option<Vec<Label>>,
    ) -> Result<Self, GeometryError> {
        if voxel_labels.is_empty() {
            return Err(GeometryError::EmptyVolume {
                shape: shape_of(&voxel_labels),
            });
        }
        Ok(Self {
            voxel_labels,
            exclude_labels: exclude_labels.unwrap_or_default(),
        })
    }

    /// The label array.
    #[must_use]
    pub const fn voxel_labels(&self) -> &Array3<Label> {
        &self.voxel_labels
    }

    /// Labels to leave out, in the order supplied.
    #[must_use]
    pub fn exclude_labels(&self) -> &[Label] {
        &self.exclude_labels
    }

    /// Extent of the volume along `x`, `y` and `z`.
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        shape_of(&self.voxel_labels)
    }
}

fn shape_of(labels: &Array3<Label>) -> [usize; 3] {
    let (x, y, z) = labels.dim();
    [x, y, z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case([0, 3, 3])]
    #[case([3, 0, 3])]
    #[case([3, 3, 0])]
    fn rejects_zero_length_axes(#[case] shape: [usize; 3]) {
        let labels = Array3::<Label>::zeros((shape[0], shape[1], shape[2]));
        let err = LabeledVolume::try_new(labels, Some(vec![0])).expect_err("empty volume");
        assert_eq!(err, GeometryError::EmptyVolume { shape });
    }

    #[rstest]
    #[case(None, vec![])]
    #[case(Some(vec![]), vec![])]
    #[case(Some(vec![11, 0, 11]), vec![11, 0, 11])]
    fn keeps_exclusions_as_given(#[case] supplied: Option<Vec<Label>>, #[case] expected: Vec<Label>) {
        let volume =
            LabeledVolume::try_new(Array3::zeros((1, 1, 1)), supplied).expect("valid volume");
        assert_eq!(volume.exclude_labels(), expected.as_slice());
    }
}
