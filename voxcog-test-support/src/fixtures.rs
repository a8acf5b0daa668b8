//! Golden segmentation volumes shared by the unit, integration and CLI tests.
//!
//! Volumes are `u8` labelled like the segmentations produced upstream of the
//! mesher, and can be written to `.npy` files with [`write_volume`].

use std::path::{Path, PathBuf};

use ndarray::Array3;
use ndarray_npy::{WritableElement, WriteNpyError, write_npy};

/// Label used for the material voxels of [`letter_f`].
pub const LETTER_F_MATERIAL: u8 = 11;

/// Label used for void voxels in every fixture.
pub const VOID: u8 = 0;

/// Cube scale factors for the four sphere resolutions.
pub const SPHERE_SCALES: [usize; 4] = [1, 2, 4, 10];

const SPHERE_HALF_EDGE: usize = 12;
const SPHERE_EDGE: usize = 2 * SPHERE_HALF_EDGE;
const SHELL_RADII: [i64; 3] = [8, 10, 12];

/// A 3 x 5 x 1 volume spelling the letter F with label 11 on a void of 0.
///
/// Material occupies the spine at `x = 0`, the top bar at `y = 4` and the
/// middle stub at `(1, 2)`.
///
/// # Examples
/// ```
/// use voxcog_test_support::fixtures::{LETTER_F_MATERIAL, letter_f};
///
/// let volume = letter_f();
/// assert_eq!(volume.shape(), &[3, 5, 1]);
/// assert_eq!(volume[[0, 0, 0]], LETTER_F_MATERIAL);
/// ```
#[must_use]
pub fn letter_f() -> Array3<u8> {
    Array3::from_shape_fn((3, 5, 1), |(x, y, _)| {
        let spine = x == 0;
        let top = y == 4;
        let stub = x == 1 && y == 2;
        if spine || top || stub {
            LETTER_F_MATERIAL
        } else {
            VOID
        }
    })
}

/// A cube of edge `24 * scale` holding three concentric shells labelled
/// 1, 2 and 3 (radii 8, 10 and 12, times `scale`) around the cube centre.
///
/// Voxel centres are tested against the radii, so the labelled region is
/// symmetric about the centre and its centre of geometry is exactly
/// `12 * scale` on every axis.
#[must_use]
pub fn sphere_with_shells(scale: usize) -> Array3<u8> {
    let edge = SPHERE_EDGE * scale;
    let scale = i64::try_from(scale).unwrap_or(i64::MAX);
    // Work in doubled units so voxel centres stay integral.
    let centre = i64::try_from(SPHERE_EDGE).unwrap_or(i64::MAX) * scale;
    let doubled = |index: usize| i64::try_from(index).unwrap_or(i64::MAX) * 2 + 1 - centre;
    Array3::from_shape_fn((edge, edge, edge), |(x, y, z)| {
        let (dx, dy, dz) = (doubled(x), doubled(y), doubled(z));
        let distance_sq = dx * dx + dy * dy + dz * dz;
        let shell = SHELL_RADII
            .iter()
            .position(|radius| distance_sq <= 4 * radius * radius * scale * scale);
        shell.map_or(VOID, |index| match index {
            0 => 1,
            1 => 2,
            _ => 3,
        })
    })
}

/// Expected centre of geometry of [`sphere_with_shells`] with void excluded.
#[must_use]
pub fn sphere_centre(scale: usize) -> [f64; 3] {
    let centre = f64::from(u32::try_from(SPHERE_HALF_EDGE * scale).unwrap_or(u32::MAX));
    [centre; 3]
}

/// Writes `volume` to `dir/name` in `.npy` format and returns the path.
///
/// # Errors
/// Returns [`WriteNpyError`] when the file cannot be created or written.
pub fn write_volume<A>(
    dir: &Path,
    name: &str,
    volume: &Array3<A>,
) -> Result<PathBuf, WriteNpyError>
where
    A: WritableElement,
{
    let path = dir.join(name);
    write_npy(&path, volume)?;
    Ok(path)
}
