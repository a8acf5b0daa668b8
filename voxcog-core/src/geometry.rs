//! Center-of-geometry reduction over a [`LabeledVolume`].

use std::collections::BTreeSet;
use std::fmt;

use tracing::{Span, debug, field, instrument};

use crate::{
    error::GeometryError,
    translation::Translation,
    volume::{Label, LabeledVolume},
};

/// Offset from a voxel's stored index (its lower corner) to its centre.
pub const HALF_VOXEL: f64 = 0.5;

/// Unweighted centroid of the included voxel centres, in voxel-index units.
///
/// Unit conversion is the caller's concern; see [`Centroid::translation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    /// Mean `x` voxel centre.
    pub x: f64,
    /// Mean `y` voxel centre.
    pub y: f64,
    /// Mean `z` voxel centre.
    pub z: f64,
}

impl Centroid {
    /// Components as `[x, y, z]`.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Translation that moves this centroid to the origin once voxel indices
    /// are multiplied by `scale` (length units per voxel).
    ///
    /// # Examples
    /// ```
    /// use voxcog_core::Centroid;
    ///
    /// let centroid = Centroid { x: 1.0, y: 3.0, z: 0.5 };
    /// let translation = centroid.translation(2.0);
    /// assert_eq!(translation.as_array(), [-2.0, -6.0, -1.0]);
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "unit scaling")]
    pub fn translation(&self, scale: f64) -> Translation {
        Translation {
            x: -scale * self.x,
            y: -scale * self.y,
            z: -scale * self.z,
        }
    }
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}, {:.6}]", self.x, self.y, self.z)
    }
}

/// Computes the centre of geometry of every voxel whose label is not
/// excluded.
///
/// Exclusions absent from the volume are ignored. Each selected index is
/// shifted by [`HALF_VOXEL`] on every axis so the result reflects voxel
/// centres rather than corners. Indices are summed as integers, so repeated
/// calls are bit-identical regardless of memory layout.
///
/// # Errors
/// Returns [`GeometryError::EmptySelection`] when exclusion removes every
/// voxel; the error lists the remaining labels and the requested exclusions.
///
/// # Examples
/// ```
/// use ndarray::array;
/// use voxcog_core::{LabeledVolume, center_of_geometry};
///
/// let labels = array![[[0_i64], [7]], [[7], [7]]];
/// let volume = LabeledVolume::try_new(labels, Some(vec![0]))?;
/// let centroid = center_of_geometry(&volume)?;
/// assert!((centroid.x - 7.0 / 6.0).abs() < 1e-12);
/// assert!((centroid.z - 0.5).abs() < 1e-12);
/// # Ok::<(), voxcog_core::GeometryError>(())
/// ```
#[instrument(
    name = "geometry.center_of_geometry",
    err,
    skip(volume),
    fields(shape = ?volume.shape(), included = field::Empty, voxels = field::Empty),
)]
pub fn center_of_geometry(volume: &LabeledVolume) -> Result<Centroid, GeometryError> {
    let labels = volume.voxel_labels();
    let distinct: BTreeSet<Label> = labels.iter().copied().collect();
    let excluded: BTreeSet<Label> = volume.exclude_labels().iter().copied().collect();
    let included: BTreeSet<Label> = distinct.difference(&excluded).copied().collect();

    let span = Span::current();
    span.record("included", field::debug(&included));

    let mut sums = IndexSums::default();
    for ((x, y, z), label) in labels.indexed_iter() {
        if included.contains(label) {
            sums.add(x, y, z);
        }
    }
    span.record("voxels", sums.count);

    let Some(centroid) = sums.mean_centre() else {
        return Err(GeometryError::EmptySelection {
            included: included.into_iter().collect(),
            excluded: volume.exclude_labels().to_vec(),
        });
    };
    debug!(%centroid, "center of geometry computed");
    Ok(centroid)
}

#[derive(Default)]
struct IndexSums {
    x: u128,
    y: u128,
    z: u128,
    count: u64,
}

impl IndexSums {
    fn add(&mut self, x: usize, y: usize, z: usize) {
        self.x += widen(x);
        self.y += widen(y);
        self.z += widen(z);
        self.count += 1;
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "integer index sums are converted once for the mean"
    )]
    fn mean_centre(&self) -> Option<Centroid> {
        if self.count == 0 {
            return None;
        }
        let count = self.count as f64;
        let mean = |sum: u128| sum as f64 / count + HALF_VOXEL;
        Some(Centroid {
            x: mean(self.x),
            y: mean(self.y),
            z: mean(self.z),
        })
    }
}

fn widen(index: usize) -> u128 {
    u128::try_from(index).unwrap_or(u128::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{Array3, ShapeBuilder};
    use rstest::rstest;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use voxcog_test_support::fixtures::letter_f;
    use voxcog_test_support::tracing_capture::RecordingLayer;

    fn letter_f_volume(exclude: &[Label]) -> LabeledVolume {
        LabeledVolume::try_new(letter_f().mapv(Label::from), Some(exclude.to_vec()))
            .expect("letter F is non-empty")
    }

    fn assert_close(actual: Centroid, expected: [f64; 3]) {
        for (value, want) in actual.as_array().into_iter().zip(expected) {
            assert!(
                (value - want).abs() <= 1e-5 * want.abs().max(1.0),
                "expected {expected:?}, got {actual}"
            );
        }
    }

    #[rstest]
    #[case::void_only(&[11], [2.071_429, 1.928_571, 0.5])]
    #[case::material_only(&[0], [1.0, 3.0, 0.5])]
    #[case::whole_assembly(&[], [1.5, 2.5, 0.5])]
    #[case::absent_label_is_ignored(&[42], [1.5, 2.5, 0.5])]
    fn letter_f_golden_values(#[case] exclude: &[Label], #[case] expected: [f64; 3]) {
        let centroid = center_of_geometry(&letter_f_volume(exclude)).expect("voxels remain");
        assert_close(centroid, expected);
    }

    #[test]
    fn excluding_every_label_reports_sets() {
        let err = center_of_geometry(&letter_f_volume(&[11, 0])).expect_err("nothing left");
        assert_eq!(
            err,
            GeometryError::EmptySelection {
                included: vec![],
                excluded: vec![11, 0],
            }
        );
        assert_eq!(
            err.to_string(),
            "Segmentation does not include valid IDs. Valid IDs: [], remove IDs: [11, 0]"
        );
    }

    #[test]
    fn single_voxel_sits_at_its_centre() {
        let mut labels = Array3::<Label>::zeros((4, 4, 4));
        labels[[3, 1, 2]] = 5;
        let volume = LabeledVolume::try_new(labels, Some(vec![0])).expect("non-empty");
        let centroid = center_of_geometry(&volume).expect("one voxel");
        assert_eq!(centroid.as_array(), [3.5, 1.5, 2.5]);
    }

    #[test]
    fn fortran_layout_matches_standard_layout() {
        let standard = letter_f().mapv(Label::from);
        let mut fortran = Array3::<Label>::zeros(standard.raw_dim().f());
        fortran.assign(&standard);
        let a = LabeledVolume::try_new(standard, Some(vec![0])).expect("non-empty");
        let b = LabeledVolume::try_new(fortran, Some(vec![0])).expect("non-empty");
        assert_eq!(
            center_of_geometry(&a).expect("centroid"),
            center_of_geometry(&b).expect("centroid")
        );
    }

    #[test]
    fn display_uses_six_decimals() {
        let centroid = Centroid {
            x: 2.071_428_571,
            y: 1.928_571_428,
            z: 0.5,
        };
        assert_eq!(centroid.to_string(), "[2.071429, 1.928571, 0.500000]");
    }

    #[test]
    fn records_selection_on_span() {
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            center_of_geometry(&letter_f_volume(&[0])).expect("material remains");
        });
        let span = layer
            .span_named("geometry.center_of_geometry")
            .expect("span must close");
        assert_eq!(span.field("voxels"), Some("8"));
        assert_eq!(span.field("included"), Some("{11}"));
        assert_eq!(span.field("shape"), Some("[3, 5, 1]"));
        assert!(layer.has_message(Level::DEBUG, "center of geometry computed"));
    }
}
