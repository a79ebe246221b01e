use analysis::{PenningTrap, fraction_inside, vector_relative_error};
use color::Color;
use datafile::{EscapeData, TrapRun};
use nalgebra::Vector3;
use plotting::{LegendPosition, Line, LineStyle, Scale, Series, Surface};

use super::{LabelledPath, open_npz, save};
use crate::SimvizErrors;
use crate::config::SimvizConfig;

fn vector(values: &[f64], name: &str) -> Result<Vector3<f64>, SimvizErrors> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(SimvizErrors::InvalidArgument(format!(
            "{name} needs 3 components, got {}",
            values.len()
        ))),
    }
}

pub fn run_error(
    config: &SimvizConfig,
    runs: &[LabelledPath<usize>],
    method: &str,
    r0: &[f64],
    v0: &[f64],
) -> Result<(), SimvizErrors> {
    let r0 = vector(r0, "r0")?;
    let v0 = vector(v0, "v0")?;
    let runs = runs
        .iter()
        .map(|f| -> Result<_, SimvizErrors> {
            Ok((f.label, TrapRun::load(&mut open_npz(config, &f.path)?)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut figure = config.figure();
    draw_error(&mut figure.surface, &config.trap, &runs, &r0, &v0)?;
    figure.surface.set_title(method);
    save(config, &figure, &format!("relerror-{method}.svg"))
}

/// Relative position error of particle 0 of every run against the
/// analytical single particle solution, on a log scale.
pub(crate) fn draw_error(
    surface: &mut Surface,
    trap: &PenningTrap,
    runs: &[(usize, TrapRun)],
    r0: &Vector3<f64>,
    v0: &Vector3<f64>,
) -> Result<(), SimvizErrors> {
    for (n_steps, run) in runs {
        let numerical: Vec<Vector3<f64>> = run
            .position(0)?
            .into_iter()
            .map(Vector3::from)
            .collect();
        let exact = trap.trajectory(run.times(), r0, v0)?;
        let error = vector_relative_error(&numerical, &exact)?;

        let label = format!("n_steps={n_steps}");
        surface.plot(Series::from_xy(label.clone(), run.times(), &error)?, Some(label.as_str()));
    }
    surface.set_xlabel("t [us]");
    surface.set_ylabel("Relative error");
    surface.set_yscale(Scale::Log10);
    surface.legend(LegendPosition::LowerRight);
    Ok(())
}

pub fn run_trapped(
    config: &SimvizConfig,
    files: &[LabelledPath<String>],
    reference: &[LabelledPath<String>],
    particles: usize,
    xlim: Option<&[f64]>,
) -> Result<(), SimvizErrors> {
    let load = |files: &[LabelledPath<String>]| {
        files
            .iter()
            .map(|f| -> Result<_, SimvizErrors> {
                Ok((f.label.clone(), EscapeData::load(&mut open_npz(config, &f.path)?)?))
            })
            .collect::<Result<Vec<_>, _>>()
    };
    let sweeps = load(files)?;
    let reference = load(reference)?;
    let xlim = match xlim {
        Some([lo, hi]) => Some((*lo, *hi)),
        Some(_) => {
            return Err(SimvizErrors::InvalidArgument(
                "xlim needs MIN,MAX".to_string(),
            ));
        }
        None => None,
    };

    let mut figure = config.figure();
    draw_trapped(&mut figure.surface, &config.trap, &sweeps, &reference, particles, xlim);
    let name = if reference.is_empty() {
        "trapped_fraction.svg"
    } else {
        "trapped_fraction_zoomed.svg"
    };
    save(config, &figure, name)
}

/// Fraction of particles left against driving frequency, one line per
/// amplitude. Reference sweeps are drawn dashed and faded in the color of the
/// matching amplitude. Multiples of the axial frequency are marked, only those
/// inside `xlim` when it is given.
pub(crate) fn draw_trapped(
    surface: &mut Surface,
    trap: &PenningTrap,
    sweeps: &[(String, EscapeData)],
    reference: &[(String, EscapeData)],
    particles: usize,
    xlim: Option<(f64, f64)>,
) {
    let mut amplitudes: Vec<&str> = Vec::new();
    let mut fractions = Vec::new();
    let mut frequencies = Vec::new();
    let sets = [
        (sweeps, LineStyle::Solid, 1.0, ""),
        (reference, LineStyle::Dashed, 0.7, " (no interactions)"),
    ];
    for (set, style, alpha, suffix) in sets {
        for (amplitude, data) in set {
            let k = match amplitudes.iter().position(|a| *a == amplitude.as_str()) {
                Some(k) => k,
                None => {
                    amplitudes.push(amplitude);
                    amplitudes.len() - 1
                }
            };
            let inside: Vec<f64> = data
                .escaped
                .iter()
                .map(|e| fraction_inside(*e, particles))
                .collect();
            let points = data
                .frequencies
                .iter()
                .copied()
                .zip(inside.iter().copied())
                .collect();
            let label = format!("f={amplitude}{suffix}");
            let line = Line::new(Series::new(label.clone(), points), surface.color(k).with_alpha(alpha))
                .with_style(style)
                .with_label(label);
            surface.add_line(line);
            fractions.extend(inside);
            frequencies.extend(data.frequencies.iter().copied());
        }
    }

    let (ylo, yhi) = utilities::finite_bounds(fractions).unwrap_or((0.0, 1.0));
    let pad = ((yhi - ylo) * 0.05).max(0.01);
    let (ylo, yhi) = (ylo - pad, yhi + pad);
    surface.set_ylim(ylo, yhi);

    if let Some((lo, hi)) = xlim.or_else(|| utilities::finite_bounds(frequencies)) {
        surface.set_xlim(lo, hi);
    }

    let omega_z = trap.omega_z();
    let label_y = yhi - 0.08 * (yhi - ylo);
    for (k, text) in [(1.0, "omega_z"), (2.0, "2 omega_z"), (3.0, "3 omega_z")] {
        let x = k * omega_z;
        if let Some((lo, hi)) = xlim {
            if x < lo || x > hi {
                continue;
            }
        }
        surface.vline(x, Color::BLACK, LineStyle::Dotted);
        surface.text(text, (x, label_y), Color::BLACK);
    }

    surface.set_xlabel("omega_V [MHz]");
    surface.set_ylabel("Fraction of particles inside the trap");
    surface.legend(LegendPosition::LowerLeft);
}
