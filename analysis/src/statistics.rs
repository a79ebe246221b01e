use serde::{Deserialize, Serialize};

use crate::AnalysisErrors;

pub fn mean(values: &[f64]) -> Result<f64, AnalysisErrors> {
    if values.is_empty() {
        return Err(AnalysisErrors::TooFewPoints {
            needed: 1,
            found: 0,
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (one delta degree of freedom).
pub fn std_dev(values: &[f64]) -> Result<f64, AnalysisErrors> {
    if values.len() < 2 {
        return Err(AnalysisErrors::TooFewPoints {
            needed: 2,
            found: values.len(),
        });
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok((ss / (values.len() - 1) as f64).sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    pub mean: f64,
    pub std: f64,
}

impl TimingSummary {
    pub fn from_samples(samples: &[f64]) -> Result<Self, AnalysisErrors> {
        Ok(Self {
            mean: mean(samples)?,
            std: std_dev(samples)?,
        })
    }

    pub fn lower(&self) -> f64 {
        self.mean - self.std
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.std
    }
}

/// Scales every summary by the largest mean found in `reference`, so
/// several timing sets share one relative axis.
pub fn normalize_timings(
    summaries: &[TimingSummary],
    reference: &[TimingSummary],
) -> Result<Vec<TimingSummary>, AnalysisErrors> {
    let max = reference
        .iter()
        .map(|s| s.mean)
        .fold(f64::NEG_INFINITY, f64::max);
    if reference.is_empty() {
        return Err(AnalysisErrors::TooFewPoints {
            needed: 1,
            found: 0,
        });
    }
    if max <= 0.0 {
        return Err(AnalysisErrors::NonPositive(max));
    }
    Ok(summaries
        .iter()
        .map(|s| TimingSummary {
            mean: s.mean / max,
            std: s.std / max,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::assert_equal;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_equal(mean(&values).unwrap(), 5.0);
        assert_equal(std_dev(&values).unwrap(), (32.0f64 / 7.0).sqrt());
        assert!(std_dev(&[1.0]).is_err());
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_normalize_timings() {
        let general = vec![
            TimingSummary::from_samples(&[1.0, 3.0]).unwrap(),
            TimingSummary::from_samples(&[3.0, 5.0]).unwrap(),
        ];
        let special = vec![TimingSummary { mean: 2.0, std: 0.5 }];

        let normalized = normalize_timings(&special, &general).unwrap();
        assert_equal(normalized[0].mean, 0.5);
        assert_equal(normalized[0].std, 0.125);

        let general = normalize_timings(&general, &general).unwrap();
        assert_equal(general[1].mean, 1.0);
        assert_equal(general[1].upper(), 1.0 + 2.0f64.sqrt() / 4.0);
    }

    #[test]
    fn test_normalize_needs_positive_reference() {
        let zero = [TimingSummary { mean: 0.0, std: 0.0 }];
        assert!(matches!(
            normalize_timings(&zero, &zero),
            Err(AnalysisErrors::NonPositive(_))
        ));
        assert!(normalize_timings(&zero, &[]).is_err());
    }
}
