use serde::{Deserialize, Serialize};

use crate::AnalysisErrors;

/// Ordinary least squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r_value: f64,
    /// Standard error of the slope.
    pub std_err: f64,
}

impl LinearFit {
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<LinearFit, AnalysisErrors> {
    if x.len() != y.len() {
        return Err(AnalysisErrors::LengthMismatch(x.len(), y.len()));
    }
    let n = x.len();
    if n < 3 {
        return Err(AnalysisErrors::TooFewPoints {
            needed: 3,
            found: n,
        });
    }

    let nf = n as f64;
    let xmean = x.iter().sum::<f64>() / nf;
    let ymean = y.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - xmean;
        let dy = yi - ymean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 {
        return Err(AnalysisErrors::ConstantX);
    }

    let slope = sxy / sxx;
    let intercept = ymean - slope * xmean;
    let r_value = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };
    let df = nf - 2.0;
    let std_err = ((1.0 - r_value * r_value) * syy / sxx / df).sqrt();

    Ok(LinearFit {
        slope,
        intercept,
        r_value,
        std_err,
    })
}

/// `y = prefactor * n^exponent`, fitted as a straight line in log-log space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLaw {
    pub prefactor: f64,
    pub exponent: f64,
    pub fit: LinearFit,
}

impl PowerLaw {
    pub fn fit(n: &[f64], y: &[f64]) -> Result<Self, AnalysisErrors> {
        let ln = |values: &[f64]| -> Result<Vec<f64>, AnalysisErrors> {
            values
                .iter()
                .map(|v| {
                    if *v > 0.0 {
                        Ok(v.ln())
                    } else {
                        Err(AnalysisErrors::NonPositive(*v))
                    }
                })
                .collect()
        };
        let fit = linear_regression(&ln(n)?, &ln(y)?)?;
        Ok(Self {
            prefactor: fit.intercept.exp(),
            exponent: fit.slope,
            fit,
        })
    }

    pub fn eval(&self, n: f64) -> f64 {
        self.prefactor * n.powf(self.exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::{assert_equal, assert_equal_reltol};

    #[test]
    fn test_exact_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let fit = linear_regression(&x, &y).unwrap();
        assert_equal(fit.slope, 2.0);
        assert_equal(fit.intercept, 1.0);
        assert_equal(fit.r_squared(), 1.0);
        assert!(fit.std_err.abs() < 1e-12);
        assert_equal(fit.eval(10.0), 21.0);
    }

    #[test]
    fn test_noisy_line() {
        // reference values from an ordinary least squares solve
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = linear_regression(&x, &y).unwrap();
        assert_equal(fit.slope, 0.6);
        assert_equal(fit.intercept, 2.2);
        assert_equal_reltol(fit.r_value, 0.7745966692414834, 1e-9);
        assert_equal_reltol(fit.std_err, 0.282842712474619, 1e-9);
    }

    #[test]
    fn test_regression_errors() {
        assert!(matches!(
            linear_regression(&[1.0, 2.0], &[1.0, 2.0]),
            Err(AnalysisErrors::TooFewPoints { .. })
        ));
        assert!(matches!(
            linear_regression(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(AnalysisErrors::ConstantX)
        ));
    }

    #[test]
    fn test_power_law() {
        let n = [10.0, 20.0, 40.0, 80.0];
        let y: Vec<f64> = n.iter().map(|n: &f64| 1.5 * n.powf(2.0)).collect();
        let law = PowerLaw::fit(&n, &y).unwrap();
        assert_equal_reltol(law.exponent, 2.0, 1e-9);
        assert_equal_reltol(law.prefactor, 1.5, 1e-9);
        assert_equal_reltol(law.eval(160.0), 1.5 * 160.0 * 160.0, 1e-9);

        assert!(matches!(
            PowerLaw::fit(&[1.0, 0.0, 2.0], &[1.0, 1.0, 1.0]),
            Err(AnalysisErrors::NonPositive(_))
        ));
    }
}
