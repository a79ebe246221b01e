use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::AnalysisErrors;

/// What a relative error does where the reference value is exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroReference {
    /// Plain IEEE division: `inf`, or `NaN` for `0 / 0`.
    #[default]
    Propagate,
    /// `NaN`, so the point drops out of plots and maxima.
    Mask,
}

impl ZeroReference {
    /// Largest value under this policy. `Propagate` behaves like an IEEE
    /// maximum, so a `NaN` anywhere yields `NaN` and `inf` wins over any
    /// finite value. `Mask` only looks at finite values.
    pub fn maximum(self, values: &[f64]) -> Option<f64> {
        match self {
            ZeroReference::Propagate => values.iter().copied().reduce(|a, b| {
                if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
            }),
            ZeroReference::Mask => max_finite(values),
        }
    }
}

fn check_lengths(a: usize, b: usize) -> Result<(), AnalysisErrors> {
    if a != b {
        return Err(AnalysisErrors::LengthMismatch(a, b));
    }
    Ok(())
}

pub fn absolute_error(num: &[f64], anal: &[f64]) -> Result<Vec<f64>, AnalysisErrors> {
    check_lengths(num.len(), anal.len())?;
    Ok(num.iter().zip(anal).map(|(v, u)| (v - u).abs()).collect())
}

/// `|num - anal| / |anal|` element-wise.
pub fn relative_error(
    num: &[f64],
    anal: &[f64],
    zero: ZeroReference,
) -> Result<Vec<f64>, AnalysisErrors> {
    check_lengths(num.len(), anal.len())?;
    Ok(num
        .iter()
        .zip(anal)
        .map(|(v, u)| match zero {
            ZeroReference::Mask if *u == 0.0 => f64::NAN,
            _ => (v - u).abs() / u.abs(),
        })
        .collect())
}

/// Ratio of the error norm to the reference norm for each pair of 3-vectors.
pub fn vector_relative_error(
    num: &[Vector3<f64>],
    anal: &[Vector3<f64>],
) -> Result<Vec<f64>, AnalysisErrors> {
    check_lengths(num.len(), anal.len())?;
    Ok(num
        .iter()
        .zip(anal)
        .map(|(r, r_anal)| (r - r_anal).norm() / r_anal.norm())
        .collect())
}

pub fn log10_values(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.log10()).collect()
}

pub fn max_finite(values: &[f64]) -> Option<f64> {
    utilities::finite_bounds(values.iter().copied()).map(|(_, hi)| hi)
}

/// Drops the first and last sample, which are fixed by the boundary conditions.
pub fn interior<T>(values: &[T]) -> &[T] {
    if values.len() <= 2 {
        return &[];
    }
    &values[1..values.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::assert_equal;

    #[test]
    fn test_absolute_error() {
        let err = absolute_error(&[1.0, 2.5, -1.0], &[1.5, 2.0, 1.0]).unwrap();
        assert_eq!(err, vec![0.5, 0.5, 2.0]);
    }

    #[test]
    fn test_relative_error() {
        let err = relative_error(&[1.1, -1.8], &[1.0, -2.0], ZeroReference::default()).unwrap();
        assert_equal(err[0], 0.1);
        assert_equal(err[1], 0.1);
    }

    #[test]
    fn test_relative_error_length_mismatch() {
        assert!(matches!(
            relative_error(&[1.0], &[1.0, 2.0], ZeroReference::Propagate),
            Err(AnalysisErrors::LengthMismatch(1, 2))
        ));
    }

    #[test]
    fn test_zero_reference_never_zero() {
        let num = [0.5, 0.0];
        let anal = [0.0, 0.0];

        let propagated = relative_error(&num, &anal, ZeroReference::Propagate).unwrap();
        assert!(propagated[0].is_infinite());
        assert!(propagated[1].is_nan());

        let masked = relative_error(&num, &anal, ZeroReference::Mask).unwrap();
        assert!(masked.iter().all(|e| e.is_nan()));
    }

    #[test]
    fn test_vector_relative_error() {
        let num = [Vector3::new(3.0, 4.0, 1.0)];
        let anal = [Vector3::new(3.0, 4.0, 0.0)];
        let err = vector_relative_error(&num, &anal).unwrap();
        assert_equal(err[0], 0.2);
    }

    #[test]
    fn test_maximum_per_zero_policy() {
        let values = [0.5, f64::INFINITY, 2.0];
        assert_eq!(ZeroReference::Propagate.maximum(&values), Some(f64::INFINITY));
        assert_eq!(ZeroReference::Mask.maximum(&values), Some(2.0));

        let values = [0.5, f64::NAN, 2.0];
        assert!(ZeroReference::Propagate.maximum(&values).unwrap().is_nan());
        assert_eq!(ZeroReference::Mask.maximum(&values), Some(2.0));

        assert_eq!(ZeroReference::Propagate.maximum(&[]), None);
        assert_eq!(ZeroReference::Mask.maximum(&[f64::NAN]), None);
    }

    #[test]
    fn test_max_finite_and_interior() {
        assert_eq!(max_finite(&[1.0, f64::INFINITY, f64::NAN, 3.0]), Some(3.0));
        assert_eq!(max_finite(&[f64::NAN]), None);
        assert_eq!(interior(&[0, 1, 2, 3]), &[1, 2]);
        assert!(interior(&[0, 1]).is_empty());
        assert_eq!(log10_values(&[100.0, 1000.0]), vec![2.0, 3.0]);
    }
}
