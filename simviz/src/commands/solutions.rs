use std::path::Path;

use color::Color;
use datafile::{Delimiter, Table};
use plotting::{Line, LineStyle, LegendPosition, Series, Surface};
use tracing::info;

use super::{LabelledPath, load_table, save};
use crate::SimvizErrors;
use crate::config::SimvizConfig;

pub fn run(
    config: &SimvizConfig,
    exact: &Path,
    numerical: &[LabelledPath<usize>],
) -> Result<(), SimvizErrors> {
    let exact = load_table(config, exact, Delimiter::Comma)?;
    let numerical = numerical
        .iter()
        .map(|f| -> Result<_, SimvizErrors> {
            Ok((f.label, load_table(config, &f.path, Delimiter::Comma)?))
        })
        .collect::<Result<Vec<_>, SimvizErrors>>()?;

    let mut figure = config.figure();
    draw(&mut figure.surface, &exact, &numerical)?;
    let name = if numerical.is_empty() {
        "exact_solution.svg"
    } else {
        "solutions.svg"
    };
    save(config, &figure, name)?;
    info!("plotted {} numerical solutions", numerical.len());
    Ok(())
}

pub(crate) fn draw(
    surface: &mut Surface,
    exact: &Table,
    numerical: &[(usize, Table)],
) -> Result<(), SimvizErrors> {
    let (x, u) = exact.xy(0, 1)?;
    surface.add_line(
        Line::new(Series::from_xy("exact", &x, &u)?, Color::RED)
            .with_label("exact solution")
            .with_style(LineStyle::Dashed)
            .with_zorder(10),
    );

    for (n_steps, table) in numerical {
        let (x, v) = table.xy(0, 1)?;
        let label = format!("n = {n_steps}");
        surface.plot(Series::from_xy(label.clone(), &x, &v)?, Some(label.as_str()));
    }

    surface.set_xlabel("x");
    surface.set_ylabel("u(x)");
    surface.set_xlim(0.0, 1.0);
    surface.set_ylim(0.0, 1.0);
    surface.legend(LegendPosition::UpperRight);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> Table {
        Table::from_reader(text.as_bytes(), Delimiter::Comma).unwrap()
    }

    #[test]
    fn test_exact_drawn_on_top() {
        let mut surface = Surface::new();
        let exact = table("0,0\n0.5,0.8\n1,0\n");
        let numerical = vec![(10, table("0,0\n0.5,0.7\n1,0\n"))];
        draw(&mut surface, &exact, &numerical).unwrap();

        let lines: Vec<&Line> = surface.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].style, LineStyle::Dashed);
        assert!(lines[0].zorder > lines[1].zorder);
        assert_eq!(lines[1].color, surface.color(0));
        assert_eq!(
            surface.legend_labels(),
            vec!["exact solution".to_string(), "n = 10".to_string()]
        );
        assert_eq!(surface.xlim, Some((0.0, 1.0)));
    }
}
