//! Time-varying scalar fields stored per grid corner.

use crate::error::{CommonError, CommonResult};

/// One scalar value per grid corner per timestep.
///
/// Values are flat, indexed as `timestep * rec_size + corner`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    rec_size: usize,
    values: Vec<f32>,
}

impl ScalarField {
    /// Wrap a flat value array. Its length must be a multiple of `rec_size`.
    pub fn new(name: &str, rec_size: usize, values: Vec<f32>) -> CommonResult<Self> {
        if rec_size == 0 || values.len() % rec_size != 0 {
            return Err(CommonError::FieldLengthMismatch {
                field: name.to_string(),
                len: values.len(),
                rec_size,
            });
        }
        Ok(Self { rec_size, values })
    }

    /// Number of corners per timestep.
    pub fn rec_size(&self) -> usize {
        self.rec_size
    }

    /// Number of timesteps stored.
    pub fn timesteps(&self) -> usize {
        self.values.len() / self.rec_size
    }

    /// The raw flat value array.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value of `corner` at `timestep`.
    pub fn at(&self, timestep: usize, corner: usize) -> f32 {
        debug_assert!(corner < self.rec_size && timestep < self.timesteps());
        self.values[timestep * self.rec_size + corner]
    }

    /// All corner values for one timestep.
    pub fn record(&self, timestep: usize) -> CommonResult<&[f32]> {
        self.check_timestep(timestep)?;
        let start = timestep * self.rec_size;
        Ok(&self.values[start..start + self.rec_size])
    }

    /// Ensure `timestep` is stored in this field.
    pub fn check_timestep(&self, timestep: usize) -> CommonResult<()> {
        if timestep >= self.timesteps() {
            return Err(CommonError::TimestepOutOfRange {
                timestep,
                available: self.timesteps(),
            });
        }
        Ok(())
    }

    /// Minimum and maximum over every timestep and corner.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        fold_range(self.values.iter().copied())
    }

    /// Minimum and maximum of the per-timestep change at each corner.
    ///
    /// The change at timestep 0 is taken as zero.
    pub fn delta_range(&self) -> Option<(f32, f32)> {
        if self.values.is_empty() {
            return None;
        }
        let deltas = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if i < self.rec_size {
                    0.0
                } else {
                    v - self.values[i - self.rec_size]
                }
            });
        fold_range(deltas)
    }
}

fn fold_range<I: Iterator<Item = f32>>(values: I) -> Option<(f32, f32)> {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_indexing() {
        // 2 timesteps of a 3-corner record
        let field = ScalarField::new("test", 3, vec![1.0, 2.0, 3.0, 10.0, 20.0, 30.0]).unwrap();
        assert_eq!(field.timesteps(), 2);
        assert_eq!(field.at(0, 2), 3.0);
        assert_eq!(field.at(1, 0), 10.0);
        assert_eq!(field.record(1).unwrap(), &[10.0, 20.0, 30.0]);
        assert!(field.record(2).is_err());
    }

    #[test]
    fn test_field_length_must_match_record() {
        let err = ScalarField::new("snowpack", 4, vec![0.0; 6]).unwrap_err();
        assert!(matches!(err, CommonError::FieldLengthMismatch { .. }));
    }

    #[test]
    fn test_value_and_delta_ranges() {
        let field = ScalarField::new("test", 2, vec![5.0, 1.0, 2.0, 4.0, 9.0, 4.0]).unwrap();
        assert_eq!(field.value_range(), Some((1.0, 9.0)));
        // deltas: [0, 0, -3, 3, 7, 0]
        assert_eq!(field.delta_range(), Some((-3.0, 7.0)));
    }

    #[test]
    fn test_ranges_skip_nan() {
        let field = ScalarField::new("test", 2, vec![f32::NAN, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(field.value_range(), Some((1.0, 3.0)));
    }
}
