use crate::AnalysisErrors;

/// Piecewise linear interpolation over strictly increasing samples. Outside
/// the sampled range the first or last segment is extended.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl LinearInterpolator {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, AnalysisErrors> {
        if x.len() != y.len() {
            return Err(AnalysisErrors::LengthMismatch(x.len(), y.len()));
        }
        if x.len() < 2 {
            return Err(AnalysisErrors::TooFewPoints {
                needed: 2,
                found: x.len(),
            });
        }
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AnalysisErrors::NotIncreasing(i + 1));
        }
        Ok(Self { x, y })
    }

    pub fn eval(&self, x: f64) -> f64 {
        let n = self.x.len();
        // index of the segment [i, i + 1] used for x
        let i = match self.x.partition_point(|xi| *xi <= x) {
            0 => 0,
            p if p >= n => n - 2,
            p => p - 1,
        };
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    pub fn eval_many(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|x| self.eval(*x)).collect()
    }
}
