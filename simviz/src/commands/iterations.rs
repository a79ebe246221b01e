use std::path::Path;

use analysis::PowerLaw;
use color::Color;
use datafile::{Delimiter, Table};
use plotting::{Line, LineStyle, LegendPosition, MarkerShape, Series, Surface};

use super::{load_table, save};
use crate::SimvizErrors;
use crate::config::SimvizConfig;

pub fn run(config: &SimvizConfig, data: &Path) -> Result<(), SimvizErrors> {
    let table = load_table(config, data, Delimiter::Comma)?;
    let mut figure = config.figure();
    let law = draw(&mut figure.surface, &table)?;
    println!(
        "Slope: {}, Intercept: {}, R-squared: {}",
        law.fit.slope,
        law.fit.intercept,
        law.fit.r_squared()
    );
    save(config, &figure, "iterations.svg")
}

/// Plots iteration counts against matrix size with a power law fitted to
/// every point but the last.
pub(crate) fn draw(surface: &mut Surface, table: &Table) -> Result<PowerLaw, SimvizErrors> {
    let (n, iterations) = table.xy(0, 1)?;
    let fitted = n.len().saturating_sub(1);
    let law = PowerLaw::fit(&n[..fitted], &iterations[..fitted])?;

    surface.add_line(
        Line::new(Series::from_xy("data", &n, &iterations)?, Color::BLACK).with_label("Data Points"),
    );
    for (x, y) in n.iter().zip(&iterations) {
        surface.scatter((*x, *y), MarkerShape::Circle, Color::BLACK);
    }

    let fit: Vec<f64> = n.iter().map(|n| law.eval(*n)).collect();
    surface.add_line(
        Line::new(Series::from_xy("fit", &n, &fit)?, Color::RED)
            .with_label(format!("y = {:.2} N^{:.2}", law.prefactor, law.exponent))
            .with_style(LineStyle::Dashed),
    );

    let nmax = n.iter().copied().fold(0.0, f64::max);
    let imax = iterations.iter().copied().fold(0.0, f64::max);
    surface.set_xlim(0.0, nmax);
    surface.set_ylim(0.0, imax);
    surface.set_xlabel("Matrix Size N");
    surface.set_ylabel("Number of transformations");
    surface.legend(LegendPosition::UpperLeft);
    Ok(law)
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::assert_equal_reltol;

    #[test]
    fn test_fit_skips_last_point() {
        // quadratic growth, last point off the curve
        let text = "10,150\n20,600\n40,2400\n80,9600\n160,1\n";
        let table = Table::from_reader(text.as_bytes(), Delimiter::Comma).unwrap();
        let mut surface = Surface::new();
        let law = draw(&mut surface, &table).unwrap();

        assert_equal_reltol(law.exponent, 2.0, 1e-9);
        assert_equal_reltol(law.prefactor, 1.5, 1e-9);
        assert_eq!(surface.markers().count(), 5);
        assert_eq!(surface.legend_labels(), vec!["Data Points", "y = 1.50 N^2.00"]);
        assert_eq!(surface.xlim, Some((0.0, 160.0)));
    }
}
