use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

use crate::PlotErrors;
use crate::artist::{Artist, LineStyle, MarkerShape};
use crate::legend::LegendPosition;
use crate::surface::{Scale, Surface};
use crate::theme::{PlotTheme, PlotThemes};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// A surface plus the page it is rendered onto.
#[derive(Debug, Clone)]
pub struct Figure {
    width: u32,
    height: u32,
    theme: PlotTheme,
    pub surface: Surface,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_theme(width, height, PlotThemes::default())
    }

    pub fn with_theme(width: u32, height: u32, theme: PlotThemes) -> Self {
        let theme = theme.palette();
        Self {
            width,
            height,
            surface: Surface::with_palette(theme.line_colors.clone()),
            theme,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Renders the figure as an SVG file, creating parent directories as needed.
    pub fn save_svg(&self, path: &Path) -> Result<(), PlotErrors> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        {
            let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
            self.draw_on(&root)?;
            root.present().map_err(drawing_error)?;
        }
        info!("saved figure to {}", path.display());
        Ok(())
    }

    pub fn render_svg(&self) -> Result<String, PlotErrors> {
        let mut buffer = String::new();
        {
            let root =
                SVGBackend::with_string(&mut buffer, (self.width, self.height)).into_drawing_area();
            self.draw_on(&root)?;
            root.present().map_err(drawing_error)?;
        }
        Ok(buffer)
    }

    /// Draws the surface onto any plotters drawing area.
    pub fn draw_on<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), PlotErrors> {
        let surface = &self.surface;
        let theme = &self.theme;
        let ymap = y_transform(surface.yscale);

        root.fill(&rgba(&theme.figure_background))
            .map_err(drawing_error)?;

        let (xlim, ylim) = limits(surface, ymap);
        debug!(?xlim, ?ylim, artists = surface.artists().len(), "rendering surface");

        let text = rgba(&theme.text_color);
        let mut builder = ChartBuilder::on(root);
        builder
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70);
        if let Some(title) = &surface.title {
            builder.caption(title, ("sans-serif", 20).into_font().color(&text));
        }
        let mut chart = builder
            .build_cartesian_2d(xlim.0..xlim.1, ylim.0..ylim.1)
            .map_err(drawing_error)?;

        chart
            .plotting_area()
            .fill(&rgba(&theme.axes_background))
            .map_err(drawing_error)?;

        let log_formatter = |v: &f64| {
            if (v - v.round()).abs() < 1e-9 {
                format!("1e{}", v.round() as i64)
            } else {
                utilities::format_number(10f64.powf(*v))
            }
        };
        let linear_formatter = |v: &f64| utilities::format_number(*v);

        {
            let mut mesh = chart.configure_mesh();
            mesh.bold_line_style(rgba(&theme.grid_color).stroke_width(1))
                .light_line_style(TRANSPARENT.filled())
                .label_style(("sans-serif", 12).into_font().color(&text))
                .axis_desc_style(("sans-serif", 15).into_font().color(&text))
                .x_label_formatter(&linear_formatter);
            match surface.yscale {
                Scale::Linear => mesh.y_label_formatter(&linear_formatter),
                Scale::Log10 => mesh.y_label_formatter(&log_formatter),
            };
            if let Some(xlabel) = &surface.xlabel {
                mesh.x_desc(xlabel.as_str());
            }
            if let Some(ylabel) = &surface.ylabel {
                mesh.y_desc(ylabel.as_str());
            }
            mesh.draw().map_err(drawing_error)?;
        }

        let mut ordered: Vec<&Artist> = surface.artists().iter().collect();
        ordered.sort_by_key(|artist| artist.zorder());
        for artist in ordered {
            draw_artist(&mut chart, artist, ymap, ylim)?;
        }

        if let Some(legend) = surface.get_legend() {
            if !legend.is_empty() {
                chart
                    .configure_series_labels()
                    .position(label_position(legend.position))
                    .background_style(rgba(&theme.legend_background).filled())
                    .border_style(text.stroke_width(1))
                    .label_font(("sans-serif", 13).into_font().color(&text))
                    .draw()
                    .map_err(drawing_error)?;
            }
        }
        Ok(())
    }
}

fn draw_artist<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    artist: &Artist,
    ymap: fn(f64) -> f64,
    ylim: (f64, f64),
) -> Result<(), PlotErrors> {
    match artist {
        Artist::Line(line) => {
            let style = rgba(&line.color).stroke_width(line.width);
            let points: Vec<(f64, f64)> =
                line.data.points.iter().map(|&(x, y)| (x, ymap(y))).collect();
            let segments = finite_runs(&points);
            let mut labelled = line.label.is_none();
            for segment in segments {
                let anno = match line.style {
                    LineStyle::Solid => chart.draw_series(LineSeries::new(segment, style)),
                    LineStyle::Dashed => {
                        chart.draw_series(DashedLineSeries::new(segment, 10, 6, style))
                    }
                    LineStyle::Dotted => {
                        chart.draw_series(DashedLineSeries::new(segment, 2, 4, style))
                    }
                }
                .map_err(drawing_error)?;
                if !labelled {
                    if let Some(label) = &line.label {
                        anno.label(label.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], style)
                        });
                    }
                    labelled = true;
                }
            }
            if !labelled {
                // keep a legend entry for lines with nothing drawable
                if let Some(label) = &line.label {
                    chart
                        .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
                        .map_err(drawing_error)?
                        .label(label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
                }
            }
        }
        Artist::Marker(marker) => {
            let (x, y) = (marker.position.0, ymap(marker.position.1));
            if !(x.is_finite() && y.is_finite()) {
                return Ok(());
            }
            let color = rgba(&marker.color);
            let size = marker.size as i32;
            match marker.shape {
                MarkerShape::Circle => {
                    chart
                        .draw_series(std::iter::once(Circle::new((x, y), size, color.filled())))
                        .map_err(drawing_error)?;
                }
                MarkerShape::Cross => {
                    chart
                        .draw_series(std::iter::once(Cross::new(
                            (x, y),
                            size,
                            color.stroke_width(marker.stroke_width),
                        )))
                        .map_err(drawing_error)?;
                }
            }
        }
        Artist::VLine { x, color, style, .. } => {
            let points = vec![(*x, ylim.0), (*x, ylim.1)];
            let shape = rgba(color).stroke_width(1);
            match style {
                LineStyle::Solid => chart.draw_series(LineSeries::new(points, shape)),
                LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(points, 10, 6, shape)),
                LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(points, 2, 4, shape)),
            }
            .map_err(drawing_error)?;
        }
        Artist::Text {
            content,
            position,
            color,
            size,
            ..
        } => {
            let (x, y) = (position.0, ymap(position.1));
            if x.is_finite() && y.is_finite() {
                let style = ("sans-serif", *size as i32)
                    .into_font()
                    .color(&rgba(color))
                    .pos(Pos::new(HPos::Center, VPos::Bottom));
                chart
                    .draw_series(std::iter::once(Text::new(content.clone(), (x, y), style)))
                    .map_err(drawing_error)?;
            }
        }
        Artist::Band {
            x,
            lower,
            upper,
            color,
            ..
        } => {
            let mut polygon: Vec<(f64, f64)> = x
                .iter()
                .zip(lower)
                .map(|(x, y)| (*x, ymap(*y)))
                .collect();
            polygon.extend(x.iter().zip(upper).rev().map(|(x, y)| (*x, ymap(*y))));
            if polygon.iter().all(|(x, y)| x.is_finite() && y.is_finite()) {
                chart
                    .draw_series(std::iter::once(Polygon::new(polygon, rgba(color).filled())))
                    .map_err(drawing_error)?;
            }
        }
        Artist::ErrorBars { x, y, err, color, .. } => {
            let style = rgba(color).stroke_width(1);
            let bars: Vec<PathElement<(f64, f64)>> = x
                .iter()
                .zip(y.iter().zip(err))
                .map(|(x, (y, e))| (*x, ymap(y - e), ymap(y + e)))
                .filter(|(x, lo, hi)| x.is_finite() && lo.is_finite() && hi.is_finite())
                .map(|(x, lo, hi)| PathElement::new(vec![(x, lo), (x, hi)], style))
                .collect();
            chart.draw_series(bars).map_err(drawing_error)?;
        }
    }
    Ok(())
}

fn y_transform(scale: Scale) -> fn(f64) -> f64 {
    match scale {
        Scale::Linear => identity,
        Scale::Log10 => log10_or_nan,
    }
}

fn identity(y: f64) -> f64 {
    y
}

/// Non-positive values have no place on a log axis and are dropped.
fn log10_or_nan(y: f64) -> f64 {
    if y > 0.0 { y.log10() } else { f64::NAN }
}

/// Axis limits in plotting coordinates: explicit limits win, otherwise the
/// finite data range padded by 5 percent.
fn limits(surface: &Surface, ymap: fn(f64) -> f64) -> ((f64, f64), (f64, f64)) {
    let samples: Vec<(f64, f64)> = surface
        .artists()
        .iter()
        .flat_map(|a| a.samples())
        .map(|(x, y)| (x, ymap(y)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    let xlim = surface.xlim.unwrap_or_else(|| {
        padded(utilities::finite_bounds(samples.iter().map(|p| p.0)))
    });
    let ylim = match surface.ylim {
        Some((lo, hi)) if ymap(lo).is_finite() && ymap(hi).is_finite() => (ymap(lo), ymap(hi)),
        _ => padded(utilities::finite_bounds(samples.iter().map(|p| p.1))),
    };
    (xlim, ylim)
}

fn padded(bounds: Option<(f64, f64)>) -> (f64, f64) {
    match bounds {
        None => (0.0, 1.0),
        Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}

/// Splits a polyline at non-finite points.
fn finite_runs(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &(x, y) in points {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn label_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

fn rgba(color: &color::Color) -> RGBAColor {
    let (r, g, b) = color.to_rgb8();
    RGBAColor(r, g, b, color.alpha() as f64)
}

fn drawing_error<E: std::fmt::Display>(e: E) -> PlotErrors {
    PlotErrors::Drawing(e.to_string())
}
