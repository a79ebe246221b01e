use color::Color;
use serde::{Deserialize, Serialize};

use crate::series::Series;

/// Paint order, lowest first. Halos sit above every line and below every
/// colored marker.
pub const BACKGROUND_ZORDER: i32 = 1;
pub const LINE_ZORDER: i32 = 2;
pub const HALO_ZORDER: i32 = 3;
pub const MARKER_ZORDER: i32 = 4;
pub const TEXT_ZORDER: i32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    Circle,
    Cross,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub label: Option<String>,
    pub data: Series,
    pub color: Color,
    pub style: LineStyle,
    pub width: u32,
    pub zorder: i32,
}

impl Line {
    pub fn new(data: Series, color: Color) -> Self {
        Self {
            label: None,
            data,
            color,
            style: LineStyle::Solid,
            width: 2,
            zorder: LINE_ZORDER,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_zorder(mut self, zorder: i32) -> Self {
        self.zorder = zorder;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: (f64, f64),
    pub shape: MarkerShape,
    pub color: Color,
    pub size: u32,
    pub stroke_width: u32,
    pub zorder: i32,
}

impl Marker {
    pub fn new(position: (f64, f64), shape: MarkerShape, color: Color) -> Self {
        Self {
            position,
            shape,
            color,
            size: 4,
            stroke_width: 2,
            zorder: MARKER_ZORDER,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_zorder(mut self, zorder: i32) -> Self {
        self.zorder = zorder;
        self
    }
}

/// Everything a surface can hold. Rendering walks artists in z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Artist {
    Line(Line),
    Marker(Marker),
    /// Vertical line spanning the y range of the axes.
    VLine {
        x: f64,
        color: Color,
        style: LineStyle,
        zorder: i32,
    },
    /// Text anchored at data coordinates.
    Text {
        content: String,
        position: (f64, f64),
        color: Color,
        size: u32,
        zorder: i32,
    },
    /// Filled region between two curves sharing the same x values.
    Band {
        x: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        color: Color,
        zorder: i32,
    },
    /// Symmetric vertical error bars.
    ErrorBars {
        x: Vec<f64>,
        y: Vec<f64>,
        err: Vec<f64>,
        color: Color,
        zorder: i32,
    },
}

impl Artist {
    pub fn zorder(&self) -> i32 {
        match self {
            Artist::Line(line) => line.zorder,
            Artist::Marker(marker) => marker.zorder,
            Artist::VLine { zorder, .. }
            | Artist::Text { zorder, .. }
            | Artist::Band { zorder, .. }
            | Artist::ErrorBars { zorder, .. } => *zorder,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Artist::Line(line) => line.color,
            Artist::Marker(marker) => marker.color,
            Artist::VLine { color, .. }
            | Artist::Text { color, .. }
            | Artist::Band { color, .. }
            | Artist::ErrorBars { color, .. } => *color,
        }
    }

    /// Data points this artist needs inside the axes limits.
    pub fn samples(&self) -> Vec<(f64, f64)> {
        match self {
            Artist::Line(line) => line.data.points.clone(),
            Artist::Marker(marker) => vec![marker.position],
            Artist::Band { x, lower, upper, .. } => x
                .iter()
                .zip(lower)
                .map(|(x, y)| (*x, *y))
                .chain(x.iter().zip(upper).map(|(x, y)| (*x, *y)))
                .collect(),
            Artist::ErrorBars { x, y, err, .. } => x
                .iter()
                .zip(y.iter().zip(err))
                .flat_map(|(x, (y, e))| [(*x, y - e), (*x, y + e)])
                .collect(),
            Artist::VLine { .. } | Artist::Text { .. } => Vec::new(),
        }
    }
}
