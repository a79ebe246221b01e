use std::path::PathBuf;

use datafile::{Delimiter, Table};
use plotting::{PlotRequest, Series, plot_trajectories};
use tracing::warn;

use super::{load_table, save, stem};
use crate::SimvizErrors;
use crate::config::SimvizConfig;

pub fn run(
    config: &SimvizConfig,
    files: &[PathBuf],
    columns: (usize, usize),
    labels: &[String],
    xlabel: Option<&str>,
    ylabel: Option<&str>,
    output: &str,
) -> Result<(), SimvizErrors> {
    if !labels.is_empty() && labels.len() != files.len() {
        warn!(
            "{} labels for {} files, falling back to file names",
            labels.len(),
            files.len()
        );
    }
    let named = files
        .iter()
        .enumerate()
        .map(|(i, path)| -> Result<_, SimvizErrors> {
            let name = match labels.get(i) {
                Some(label) if labels.len() == files.len() => label.clone(),
                _ => stem(path),
            };
            Ok((name, load_table(config, path, Delimiter::Auto)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut figure = config.figure();
    plot_trajectories(
        figure.surface_mut(),
        &request(&named, columns, xlabel, ylabel)?,
    );
    save(config, &figure, output)
}

pub(crate) fn request(
    tables: &[(String, Table)],
    (xcol, ycol): (usize, usize),
    xlabel: Option<&str>,
    ylabel: Option<&str>,
) -> Result<PlotRequest, SimvizErrors> {
    let mut request = PlotRequest::new();
    if let Some(xlabel) = xlabel {
        request = request.xlabel(xlabel);
    }
    if let Some(ylabel) = ylabel {
        request = request.ylabel(ylabel);
    }
    for (name, table) in tables {
        let (x, y) = table.xy(xcol, ycol)?;
        request = request.push(Series::from_xy(name.clone(), &x, &y)?);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> Table {
        Table::from_reader(text.as_bytes(), Delimiter::Auto).unwrap()
    }

    #[test]
    fn test_request_selects_columns() {
        let tables = vec![
            ("run_a".to_string(), table("0 1 2\n1 3 4\n")),
            ("run_b".to_string(), table("0,5,6\n1,7,8\n")),
        ];
        let request = request(&tables, (0, 2), Some("t"), None).unwrap();
        assert_eq!(request.series.len(), 2);
        assert_eq!(request.series[0].y(), vec![2.0, 4.0]);
        assert_eq!(request.series[1].label(), "run b");
        assert_eq!(request.xlabel.as_deref(), Some("t"));
        assert!(request.ylabel.is_none());
    }

    #[test]
    fn test_request_bad_column() {
        let tables = vec![("a".to_string(), table("0 1\n"))];
        assert!(request(&tables, (0, 3), None, None).is_err());
    }
}
