use color::{Color, Palette};
use serde::{Deserialize, Serialize};

use crate::artist::{
    Artist, BACKGROUND_ZORDER, LINE_ZORDER, Line, LineStyle, Marker, MarkerShape, TEXT_ZORDER,
};
use crate::legend::{Legend, LegendPosition};
use crate::series::Series;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    #[default]
    Linear,
    Log10,
}

/// A single set of axes that artists are drawn into.
///
/// The surface only records what should be drawn. Turning it into pixels or
/// vector graphics is the job of [`Figure`](crate::figure::Figure), so the same
/// surface can be inspected in tests and rendered to any backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    artists: Vec<Artist>,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub yscale: Scale,
    legend: Option<LegendPosition>,
    palette: Palette,
    cycle: usize,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color `i` of this surface's palette, without touching the auto cycle.
    pub fn color(&self, i: usize) -> Color {
        self.palette.get(i)
    }

    /// Next color of the automatic cycle used by [`Surface::next_line`].
    pub fn next_color(&mut self) -> Color {
        let color = self.palette.get(self.cycle);
        self.cycle += 1;
        color
    }

    /// A line for `series` colored by the automatic cycle. It is not added yet.
    pub fn next_line(&mut self, series: Series) -> Line {
        let color = self.next_color();
        Line::new(series, color)
    }

    pub fn add(&mut self, artist: Artist) {
        self.artists.push(artist);
    }

    pub fn add_line(&mut self, line: Line) {
        self.add(Artist::Line(line));
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.add(Artist::Marker(marker));
    }

    /// Plots `series` with the next cycle color and an optional legend label.
    pub fn plot(&mut self, series: Series, label: Option<&str>) {
        let mut line = self.next_line(series);
        line.label = label.map(str::to_string);
        self.add_line(line);
    }

    pub fn scatter(&mut self, position: (f64, f64), shape: MarkerShape, color: Color) {
        self.add_marker(Marker::new(position, shape, color));
    }

    pub fn vline(&mut self, x: f64, color: Color, style: LineStyle) {
        self.add(Artist::VLine {
            x,
            color,
            style,
            zorder: BACKGROUND_ZORDER,
        });
    }

    pub fn text(&mut self, content: impl Into<String>, position: (f64, f64), color: Color) {
        self.add(Artist::Text {
            content: content.into(),
            position,
            color,
            size: 14,
            zorder: TEXT_ZORDER,
        });
    }

    pub fn fill_between(&mut self, x: &[f64], lower: &[f64], upper: &[f64], color: Color) {
        self.add(Artist::Band {
            x: x.to_vec(),
            lower: lower.to_vec(),
            upper: upper.to_vec(),
            color,
            zorder: BACKGROUND_ZORDER,
        });
    }

    pub fn errorbar(&mut self, x: &[f64], y: &[f64], err: &[f64], color: Color) {
        self.add(Artist::ErrorBars {
            x: x.to_vec(),
            y: y.to_vec(),
            err: err.to_vec(),
            color,
            zorder: LINE_ZORDER,
        });
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = Some((lo, hi));
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = Some((lo, hi));
    }

    pub fn set_yscale(&mut self, scale: Scale) {
        self.yscale = scale;
    }

    /// Enables the legend. Entries are collected from labelled lines at render time.
    pub fn legend(&mut self, position: LegendPosition) {
        self.legend = Some(position);
    }

    pub fn get_legend(&self) -> Option<Legend> {
        self.legend
            .map(|position| Legend::from_artists(&self.artists, position))
    }

    pub fn legend_labels(&self) -> Vec<String> {
        self.get_legend()
            .map(|legend| legend.entries.into_iter().map(|e| e.label).collect())
            .unwrap_or_default()
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Marker(marker) => Some(marker),
            _ => None,
        })
    }
}
