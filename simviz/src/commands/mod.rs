use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use datafile::{Delimiter, NpzContainer, Table, read_table};
use plotting::Figure;

use crate::SimvizErrors;
use crate::config::SimvizConfig;

pub mod eigen;
pub mod errors;
pub mod iterations;
pub mod overlay;
pub mod solutions;
pub mod timings;
pub mod trajectories;
pub mod trap;

/// A command line value of the form `LABEL=PATH`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledPath<L> {
    pub label: L,
    pub path: PathBuf,
}

impl<L> FromStr for LabelledPath<L>
where
    L: FromStr,
    L::Err: Display,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, path) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=PATH, got '{s}'"))?;
        if path.is_empty() {
            return Err(format!("missing path in '{s}'"));
        }
        let label = label
            .trim()
            .parse::<L>()
            .map_err(|e| format!("bad label '{label}': {e}"))?;
        Ok(Self {
            label,
            path: PathBuf::from(path),
        })
    }
}

pub(crate) fn load_table(
    config: &SimvizConfig,
    path: &Path,
    delimiter: Delimiter,
) -> Result<Table, SimvizErrors> {
    Ok(read_table(&config.resolve(path), delimiter)?)
}

pub(crate) fn open_npz(config: &SimvizConfig, path: &Path) -> Result<NpzContainer, SimvizErrors> {
    Ok(NpzContainer::open(&config.resolve(path))?)
}

pub(crate) fn save(config: &SimvizConfig, figure: &Figure, name: &str) -> Result<(), SimvizErrors> {
    figure.save_svg(&config.figure_path(name))?;
    Ok(())
}

/// File name without directories or extension.
pub(crate) fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labelled_path() {
        let p: LabelledPath<usize> = "100=data/thomas_n-1e2.csv".parse().unwrap();
        assert_eq!(p.label, 100);
        assert_eq!(p.path, PathBuf::from("data/thomas_n-1e2.csv"));

        let p: LabelledPath<String> = "0.4=out/escape.npz".parse().unwrap();
        assert_eq!(p.label, "0.4");
    }

    #[test]
    fn test_parse_labelled_path_errors() {
        assert!("thomas.csv".parse::<LabelledPath<usize>>().is_err());
        assert!("ten=thomas.csv".parse::<LabelledPath<usize>>().is_err());
        assert!("10=".parse::<LabelledPath<usize>>().is_err());
    }

    #[test]
    fn test_stem() {
        assert_eq!(stem(Path::new("out/p2-RK4-int-n4000.npz")), "p2-RK4-int-n4000");
    }
}
