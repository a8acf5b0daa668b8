//! Translation arguments handed to an external mesher.

/// Offset, in length units, that recentres a scaled mesh on its centre of
/// geometry. Built by [`crate::Centroid::translation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    /// Offset along `x`.
    pub x: f64,
    /// Offset along `y`.
    pub y: f64,
    /// Offset along `z`.
    pub z: f64,
}

impl Translation {
    /// Components as `[x, y, z]`.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Flag/value pairs in the form the mesher's command line expects.
    ///
    /// # Examples
    /// ```
    /// use voxcog_core::Translation;
    ///
    /// let args = Translation { x: -1.5, y: 0.0, z: 2.0 }.mesher_args();
    /// assert_eq!(
    ///     args,
    ///     ["--xtranslate", "-1.5", "--ytranslate", "0", "--ztranslate", "2"]
    /// );
    /// ```
    #[must_use]
    pub fn mesher_args(&self) -> Vec<String> {
        ["--xtranslate", "--ytranslate", "--ztranslate"]
            .into_iter()
            .zip(self.as_array())
            .flat_map(|(flag, value)| [flag.to_owned(), value.to_string()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::Centroid;

    #[test]
    fn negates_and_scales_each_axis() {
        let centroid = Centroid {
            x: 12.0,
            y: 24.0,
            z: 0.5,
        };
        let translation = centroid.translation(2.5);
        assert_eq!(translation.as_array(), [-30.0, -60.0, -1.25]);
        assert_eq!(
            translation.mesher_args(),
            [
                "--xtranslate",
                "-30",
                "--ytranslate",
                "-60",
                "--ztranslate",
                "-1.25"
            ]
        );
    }
}
