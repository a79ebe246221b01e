use std::fmt;

const HEADERS: [&str; 2] = ["log10(n_steps)", "max(eps)"];

/// Maximum relative error against the step count, one row per resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvergenceTable {
    rows: Vec<(f64, f64)>,
}

impl ConvergenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, log10_steps: f64, max_error: f64) {
        self.rows.push((log10_steps, max_error));
    }

    pub fn rows(&self) -> &[(f64, f64)] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cells(&self) -> Vec<[String; 2]> {
        self.rows
            .iter()
            .map(|(p, e)| [utilities::format_number(*p), format!("{:.6e}", e)])
            .collect()
    }

    pub fn to_latex(&self) -> String {
        let mut out = String::from("\\begin{tabular}{rr}\n\\hline\n");
        out.push_str(&format!("{} & {} \\\\\n", HEADERS[0], HEADERS[1]));
        out.push_str("\\hline\n");
        for [p, e] in self.cells() {
            out.push_str(&format!("{p} & {e} \\\\\n"));
        }
        out.push_str("\\hline\n\\end{tabular}");
        out
    }
}

impl fmt::Display for ConvergenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells();
        let mut widths = HEADERS.map(str::len);
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }
        writeln!(f, "{:>w0$}  {:>w1$}", HEADERS[0], HEADERS[1], w0 = widths[0], w1 = widths[1])?;
        writeln!(f, "{}  {}", "-".repeat(widths[0]), "-".repeat(widths[1]))?;
        for [p, e] in cells {
            writeln!(f, "{:>w0$}  {:>w1$}", p, e, w0 = widths[0], w1 = widths[1])?;
        }
        Ok(())
    }
}
