use analysis::{TimingSummary, normalize_timings};
use datafile::Delimiter;
use plotting::{LegendPosition, Series, Surface};

use super::{LabelledPath, load_table, save};
use crate::SimvizErrors;
use crate::config::SimvizConfig;

pub fn run(
    config: &SimvizConfig,
    general: &[LabelledPath<usize>],
    special: &[LabelledPath<usize>],
    column: usize,
) -> Result<(), SimvizErrors> {
    let summarize = |files: &[LabelledPath<usize>]| -> Result<Vec<(f64, TimingSummary)>, SimvizErrors> {
        files
            .iter()
            .map(|f| -> Result<_, SimvizErrors> {
                let table = load_table(config, &f.path, Delimiter::Whitespace)?;
                let summary = TimingSummary::from_samples(&table.column(column)?)?;
                Ok((f.label as f64, summary))
            })
            .collect()
    };
    let general = summarize(general)?;
    let special = summarize(special)?;

    let mut figure = config.figure();
    draw(&mut figure.surface, &general, &special)?;
    save(config, &figure, "timings.svg")
}

/// Mean run times with error bars and a one sigma band, both sets scaled
/// by the slowest general mean.
pub(crate) fn draw(
    surface: &mut Surface,
    general: &[(f64, TimingSummary)],
    special: &[(f64, TimingSummary)],
) -> Result<(), SimvizErrors> {
    let reference: Vec<TimingSummary> = general.iter().map(|(_, s)| *s).collect();

    for (label, set) in [("general", general), ("special", special)] {
        if set.is_empty() {
            continue;
        }
        let n: Vec<f64> = set.iter().map(|(n, _)| *n).collect();
        let summaries: Vec<TimingSummary> = set.iter().map(|(_, s)| *s).collect();
        let normalized = normalize_timings(&summaries, &reference)?;

        let mean: Vec<f64> = normalized.iter().map(|s| s.mean).collect();
        let std: Vec<f64> = normalized.iter().map(|s| s.std).collect();
        let lower: Vec<f64> = normalized.iter().map(|s| s.lower()).collect();
        let upper: Vec<f64> = normalized.iter().map(|s| s.upper()).collect();

        let color = surface.next_color();
        surface.errorbar(&n, &mean, &std, color);
        surface.add_line(
            plotting::Line::new(Series::from_xy(label, &n, &mean)?, color).with_label(label),
        );
        surface.fill_between(&n, &lower, &upper, color.with_alpha(0.2));
    }

    surface.set_xlabel("n_steps");
    surface.set_ylabel("Runtime [a.u.]");
    surface.legend(LegendPosition::UpperLeft);
    Ok(())
}
