use analysis::EigenDecomposition;
use datafile::{Delimiter, Table};
use plotting::{Line, LineStyle, LegendPosition, Series, Surface};
use tracing::debug;

use super::{LabelledPath, load_table, save};
use crate::SimvizErrors;
use crate::config::SimvizConfig;

pub fn run(
    config: &SimvizConfig,
    files: &[LabelledPath<usize>],
    modes: usize,
) -> Result<(), SimvizErrors> {
    for file in files {
        let table = load_table(config, &file.path, Delimiter::Whitespace)?;
        let mut figure = config.figure();
        draw(&mut figure.surface, &table, modes)?;
        figure.surface.set_title(format!("n_steps = {}", file.label));
        save(config, &figure, &format!("eigenvectors-n{}.svg", file.label))?;
    }
    Ok(())
}

/// Draws the lowest `modes` eigenvectors next to the matching analytical
/// modes, each pair in one color.
pub(crate) fn draw(surface: &mut Surface, table: &Table, modes: usize) -> Result<(), SimvizErrors> {
    let eig = EigenDecomposition::from_rows(table.rows())?;
    debug!(
        "{} eigenpairs on {} interior points",
        eig.len(),
        eig.n_points()
    );

    for k in 0..modes.min(eig.len()) {
        let mut mode = eig.mode(k)?;
        let analytical = mode.analytical(k);
        mode.align_sign(&analytical);

        let color = surface.color(k);
        surface.add_line(
            Line::new(Series::from_xy(format!("v{k}"), &mode.x, &mode.v)?, color)
                .with_label(format!("v({k}), lambda = {}", utilities::format_number(mode.eigenvalue))),
        );
        surface.add_line(
            Line::new(Series::from_xy(format!("analytic_v{k}"), &mode.x, &analytical)?, color)
                .with_label(format!("analytic v({k})"))
                .with_style(LineStyle::Dotted),
        );
    }

    surface.set_xlabel("x/L");
    surface.set_ylabel("v(x)");
    surface.legend(LegendPosition::LowerLeft);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_paired_by_color() {
        // eigenvalues out of order, second mode stored with flipped sign
        let text = "\
            3.0 1.0\n\
            -0.7071067811865476 0.7071067811865476\n\
            0.7071067811865476 0.7071067811865476\n";
        let table = Table::from_reader(text.as_bytes(), Delimiter::Whitespace).unwrap();
        let mut surface = Surface::new();
        draw(&mut surface, &table, 3).unwrap();

        let lines: Vec<&Line> = surface.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].color, lines[1].color);
        assert_eq!(lines[2].color, lines[3].color);
        assert_ne!(lines[0].color, lines[2].color);
        assert_eq!(lines[1].style, LineStyle::Dotted);

        // sign follows sin(2 pi x): positive then negative
        let v = lines[2].data.y();
        assert!(v[1] > 0.0 && v[2] < 0.0);
    }
}
