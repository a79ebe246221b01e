use serde::{Deserialize, Serialize};

use crate::PlotErrors;

/// A named, ordered list of (x, y) coordinate pairs drawn as one trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        let xmin = points.iter().fold(f64::INFINITY, |a, p| a.min(p.0));
        let xmax = points.iter().fold(f64::NEG_INFINITY, |a, p| a.max(p.0));
        let ymin = points.iter().fold(f64::INFINITY, |a, p| a.min(p.1));
        let ymax = points.iter().fold(f64::NEG_INFINITY, |a, p| a.max(p.1));

        Self {
            name: name.into(),
            points,
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    pub fn from_xy(name: impl Into<String>, xdata: &[f64], ydata: &[f64]) -> Result<Self, PlotErrors> {
        if xdata.len() != ydata.len() {
            return Err(PlotErrors::DataSizeMismatch(xdata.len(), ydata.len()));
        }
        let points = xdata.iter().copied().zip(ydata.iter().copied()).collect();
        Ok(Self::new(name, points))
    }

    /// Builds a series from rows of a 2-column array.
    pub fn from_rows(name: impl Into<String>, rows: &[[f64; 2]]) -> Self {
        Self::new(name, rows.iter().map(|r| (r[0], r[1])).collect())
    }

    /// Display label: underscores in the name become spaces.
    pub fn label(&self) -> String {
        self.name.replace('_', " ")
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.0).collect()
    }

    pub fn y(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_replaces_underscores() {
        let s = Series::new("Particle_1_int", vec![(0.0, 0.0)]);
        assert_eq!(s.label(), "Particle 1 int");
    }

    #[test]
    fn test_bounds() {
        let s = Series::new("a", vec![(0.0, 1.0), (2.0, -1.0), (1.0, 3.0)]);
        assert_eq!((s.xmin, s.xmax), (0.0, 2.0));
        assert_eq!((s.ymin, s.ymax), (-1.0, 3.0));
        assert_eq!(s.first(), Some((0.0, 1.0)));
        assert_eq!(s.last(), Some((1.0, 3.0)));
    }

    #[test]
    fn test_from_xy_mismatch() {
        let err = Series::from_xy("a", &[0.0, 1.0], &[1.0]).unwrap_err();
        assert!(matches!(err, PlotErrors::DataSizeMismatch(2, 1)));
    }

    #[test]
    fn test_from_rows() {
        let s = Series::from_rows("b", &[[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(s.x(), vec![0.0, 1.0]);
        assert_eq!(s.y(), vec![1.0, 0.0]);
    }
}
