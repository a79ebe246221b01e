use std::f64::consts::PI;

use crate::AnalysisErrors;

/// Eigenpairs of a tridiagonal operator on the interior grid points of the
/// unit interval, as written by a Jacobi rotation solver.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    eigenvalues: Vec<f64>,
    /// vectors[i][j] is component i of eigenvector j
    vectors: Vec<Vec<f64>>,
}

/// One eigenpair sampled on the full grid, boundaries included.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    pub eigenvalue: f64,
    pub x: Vec<f64>,
    pub v: Vec<f64>,
}

impl EigenDecomposition {
    /// First row holds the eigenvalues, each following row one component of
    /// every eigenvector.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, AnalysisErrors> {
        let (eigenvalues, vectors) = rows
            .split_first()
            .ok_or_else(|| AnalysisErrors::EigenLayout("no rows".to_string()))?;
        let n = eigenvalues.len();
        if vectors.is_empty() {
            return Err(AnalysisErrors::EigenLayout(
                "no eigenvector components".to_string(),
            ));
        }
        if let Some(row) = vectors.iter().find(|r| r.len() != n) {
            return Err(AnalysisErrors::LengthMismatch(row.len(), n));
        }
        Ok(Self {
            eigenvalues: eigenvalues.clone(),
            vectors: vectors.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Number of interior grid points.
    pub fn n_points(&self) -> usize {
        self.vectors.len()
    }

    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Column indices ordered by ascending eigenvalue.
    pub fn order(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.len()).collect();
        idx.sort_by(|a, b| self.eigenvalues[*a].total_cmp(&self.eigenvalues[*b]));
        idx
    }

    /// The `k`-th lowest eigenpair. Zero boundary values are added on both
    /// ends and every component is divided by the largest component of the
    /// whole decomposition, so modes keep their relative scale.
    pub fn mode(&self, k: usize) -> Result<Mode, AnalysisErrors> {
        let j = *self
            .order()
            .get(k)
            .ok_or(AnalysisErrors::ModeOutOfRange(k, self.len()))?;

        let scale = self.scale();
        let n = self.n_points() + 2;
        let mut v = Vec::with_capacity(n);
        v.push(0.0);
        v.extend(self.vectors.iter().map(|row| row[j] / scale));
        v.push(0.0);

        Ok(Mode {
            eigenvalue: self.eigenvalues[j],
            x: linspace(0.0, 1.0, n),
            v,
        })
    }

    fn scale(&self) -> f64 {
        let values = self.vectors.iter().flatten().copied();
        let max = values.clone().fold(0.0, f64::max);
        if max > 0.0 {
            return max;
        }
        let abs_max = values.fold(0.0f64, |a, v| a.max(v.abs()));
        if abs_max > 0.0 { abs_max } else { 1.0 }
    }
}

impl Mode {
    /// Flips the sign when the mode points away from `reference`.
    /// Eigenvectors are only defined up to sign.
    pub fn align_sign(&mut self, reference: &[f64]) {
        let projection: f64 = self.v.iter().zip(reference).map(|(a, b)| a * b).sum();
        if projection < 0.0 {
            self.v.iter_mut().for_each(|v| *v = -*v);
        }
    }

    /// Analytical mode `k` sampled on this mode's grid.
    pub fn analytical(&self, k: usize) -> Vec<f64> {
        self.x.iter().map(|x| analytical_mode(k, *x)).collect()
    }
}

/// `sin((k + 1) pi x)`, the `k`-th eigenfunction of the second derivative on
/// the unit interval with zero boundaries.
pub fn analytical_mode(k: usize, x: f64) -> f64 {
    ((k + 1) as f64 * PI * x).sin()
}

pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
