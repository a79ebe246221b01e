//! Overlaying named trajectories with start and end markers.

use color::Color;

use crate::artist::{HALO_ZORDER, Line, Marker, MarkerShape};
use crate::legend::LegendPosition;
use crate::series::Series;
use crate::surface::Surface;

/// An ordered set of trajectories plus optional axis labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotRequest {
    pub series: Vec<Series>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
}

impl PlotRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trajectory from rows of (x, y). Insertion order is drawing order.
    pub fn series(mut self, name: impl Into<String>, rows: &[[f64; 2]]) -> Self {
        self.series.push(Series::from_rows(name, rows));
        self
    }

    pub fn push(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }
}

/// Draws every series of `request` onto `surface`.
///
/// Series `i` gets color `i` of the surface palette. Its first point is marked
/// with a filled circle and its last with a cross, each backed by a larger
/// white halo drawn above every line and below the colored markers, and the points are joined by a line labelled
/// with the series label. A legend with one entry per series is enabled last.
///
/// The surface is not saved; the caller owns it before and after.
pub fn plot_trajectories(surface: &mut Surface, request: &PlotRequest) {
    if let Some(xlabel) = &request.xlabel {
        surface.set_xlabel(xlabel.clone());
    }
    if let Some(ylabel) = &request.ylabel {
        surface.set_ylabel(ylabel.clone());
    }

    for (i, series) in request.series.iter().enumerate() {
        let color = surface.color(i);

        if let Some(start) = series.first() {
            surface.add_marker(Marker::new(start, MarkerShape::Circle, color));
            surface.add_marker(halo(start, MarkerShape::Circle, 2));
        }
        if let Some(end) = series.last() {
            surface.add_marker(Marker::new(end, MarkerShape::Cross, color));
            surface.add_marker(halo(end, MarkerShape::Cross, 3));
        }

        surface.add_line(Line::new(series.clone(), color).with_label(series.label()));
    }

    surface.legend(LegendPosition::default());
}

fn halo(position: (f64, f64), shape: MarkerShape, stroke_width: u32) -> Marker {
    Marker::new(position, shape, Color::WHITE)
        .with_size(6)
        .with_stroke_width(stroke_width)
        .with_zorder(HALO_ZORDER)
}
