use std::path::Path;

use analysis::{
    ConvergenceTable, LinearInterpolator, ZeroReference, absolute_error, interior, log10_values,
    relative_error,
};
use datafile::{Delimiter, Table};
use plotting::{LegendPosition, Series, Surface};
use tracing::{info, warn};

use super::{LabelledPath, load_table, save};
use crate::SimvizErrors;
use crate::config::SimvizConfig;

pub fn run(
    config: &SimvizConfig,
    exact: &Path,
    numerical: &[LabelledPath<usize>],
    zero: ZeroReference,
    latex: bool,
) -> Result<(), SimvizErrors> {
    let exact = load_table(config, exact, Delimiter::Comma)?;
    let numerical = numerical
        .iter()
        .map(|f| -> Result<_, SimvizErrors> {
            Ok((f.label, load_table(config, &f.path, Delimiter::Comma)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut abs = config.figure();
    let mut rel = config.figure();
    let mut max = config.figure();
    let table = draw(
        &mut abs.surface,
        &mut rel.surface,
        &mut max.surface,
        &exact,
        &numerical,
        zero,
    )?;

    save(config, &abs, "abs_err.svg")?;
    save(config, &rel, "rel_err.svg")?;
    save(config, &max, "max_error.svg")?;

    if latex {
        println!("{}", table.to_latex());
    } else {
        print!("{table}");
    }
    info!("compared {} numerical solutions", numerical.len());
    Ok(())
}

/// Draws log10 absolute and relative errors of every run against the
/// interpolated exact solution, plus the maximum relative error per run.
pub(crate) fn draw(
    abs: &mut Surface,
    rel: &mut Surface,
    max: &mut Surface,
    exact: &Table,
    numerical: &[(usize, Table)],
    zero: ZeroReference,
) -> Result<ConvergenceTable, SimvizErrors> {
    let (x_exact, u_exact) = exact.xy(0, 1)?;
    let exact = LinearInterpolator::new(x_exact, u_exact)?;

    let mut table = ConvergenceTable::new();
    for (n_steps, run) in numerical {
        let (x, v) = run.xy(0, 1)?;
        let x = interior(&x);
        let v = interior(&v);
        let u = exact.eval_many(x);

        let abs_err = absolute_error(v, &u)?;
        let rel_err = relative_error(v, &u, zero)?;

        let label = format!("n = {n_steps}");
        abs.plot(Series::from_xy(label.clone(), x, &log10_values(&abs_err))?, Some(label.as_str()));
        rel.plot(Series::from_xy(label.clone(), x, &log10_values(&rel_err))?, Some(label.as_str()));

        // points next to the boundary are left out of the maximum
        match zero.maximum(interior(&rel_err)) {
            Some(m) => {
                if !m.is_finite() {
                    warn!("relative error for n = {n_steps} is {m}, the exact solution crosses zero");
                }
                table.push((*n_steps as f64).log10(), m)
            }
            None => warn!("no relative error left for n = {n_steps}"),
        }
    }

    for (surface, ylabel) in [(&mut *abs, "log10(Delta_i)"), (&mut *rel, "log10(eps_i)")] {
        surface.set_xlabel("x");
        surface.set_ylabel(ylabel);
        surface.set_xlim(0.0, 1.0);
        surface.legend(LegendPosition::UpperRight);
    }

    max.plot(Series::new("max(eps)", table.rows().to_vec()), None);
    max.set_xlabel("log10(n_steps)");
    max.set_ylabel("max(eps)");

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::assert_equal;

    fn sampled(n: usize, f: impl Fn(f64) -> f64) -> Table {
        let text: String = (0..=n)
            .map(|i| {
                let x = i as f64 / n as f64;
                format!("{x},{}\n", f(x))
            })
            .collect();
        Table::from_reader(text.as_bytes(), Delimiter::Comma).unwrap()
    }

    #[test]
    fn test_error_plots_and_table() {
        let exact = sampled(1000, |x| 1.0 + x);
        let numerical = vec![
            (10, sampled(10, |x| 1.01 * (1.0 + x))),
            (100, sampled(100, |x| 1.001 * (1.0 + x))),
        ];
        let (mut abs, mut rel, mut max) = (Surface::new(), Surface::new(), Surface::new());
        let table = draw(
            &mut abs,
            &mut rel,
            &mut max,
            &exact,
            &numerical,
            ZeroReference::Propagate,
        )
        .unwrap();

        assert_eq!(abs.legend_labels(), vec!["n = 10", "n = 100"]);
        assert_eq!(rel.lines().count(), 2);
        // boundary points are dropped
        assert_eq!(rel.lines().next().map(|l| l.data.len()), Some(9));

        let rows = table.rows();
        assert_eq!(rows.len(), 2);
        assert_equal(rows[0].0, 1.0);
        assert_equal(rows[1].0, 2.0);
        assert!((rows[0].1 - 0.01).abs() < 1e-9);
        assert!((rows[1].1 - 0.001).abs() < 1e-9);
        assert_eq!(max.lines().next().map(|l| l.data.len()), Some(2));
    }

    #[test]
    fn test_masked_zero_reference() {
        let exact = sampled(4, |x| x - 0.5);
        let numerical = vec![(4, sampled(4, |x| x - 0.4))];
        let (mut abs, mut rel, mut max) = (Surface::new(), Surface::new(), Surface::new());
        draw(&mut abs, &mut rel, &mut max, &exact, &numerical, ZeroReference::Mask).unwrap();

        let y = rel.lines().next().map(|l| l.data.y()).unwrap_or_default();
        assert_eq!(y.len(), 3);
        assert!(y[1].is_nan());
        assert!(y[0].is_finite() && y[2].is_finite());
    }

    #[test]
    fn test_zero_policy_reaches_the_table() {
        let exact = sampled(8, |x| x - 0.5);
        let numerical = vec![(8, sampled(8, |x| x - 0.4))];
        let table = |zero| {
            let (mut abs, mut rel, mut max) = (Surface::new(), Surface::new(), Surface::new());
            draw(&mut abs, &mut rel, &mut max, &exact, &numerical, zero).unwrap()
        };

        let propagated = table(ZeroReference::Propagate);
        assert_eq!(propagated.rows().len(), 1);
        assert_eq!(propagated.rows()[0].1, f64::INFINITY);

        let masked = table(ZeroReference::Mask);
        assert_eq!(masked.rows().len(), 1);
        assert!((masked.rows()[0].1 - 0.8).abs() < 1e-9);
    }
}
