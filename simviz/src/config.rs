use std::fs::File;
use std::path::{Path, PathBuf};

use analysis::PenningTrap;
use plotting::{Figure, PlotThemes};
use ron::de::from_reader;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::SimvizErrors;

/// Settings shared by every subcommand. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimvizConfig {
    /// Directory relative input paths are resolved against
    pub data_dir: PathBuf,
    /// Directory figures are written to
    pub fig_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub theme: PlotThemes,
    /// Trap parameters used for analytical solutions
    pub trap: PenningTrap,
}

impl Default for SimvizConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("build/data"),
            fig_dir: PathBuf::from("build/figs"),
            width: 800,
            height: 400,
            theme: PlotThemes::default(),
            trap: PenningTrap::default(),
        }
    }
}

impl SimvizConfig {
    pub fn load(path: &Path) -> Result<Self, SimvizErrors> {
        let file = File::open(path)?;
        let config: Self = from_reader(file)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Relative paths are taken to live in `data_dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path.exists() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn figure_path(&self, name: &str) -> PathBuf {
        self.fig_dir.join(name)
    }

    pub fn figure(&self) -> Figure {
        Figure::with_theme(self.width, self.height, self.theme)
    }

    pub fn square_figure(&self) -> Figure {
        let side = self.width.max(self.height);
        Figure::with_theme(side, side, self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimvizConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("build/data"));
        assert_eq!(config.fig_dir, PathBuf::from("build/figs"));
        assert_eq!((config.width, config.height), (800, 400));
        assert_eq!(config.theme, PlotThemes::Ggplot);
    }

    #[test]
    fn test_partial_ron() {
        let config: SimvizConfig =
            ron::from_str("(fig_dir: \"out/figs\", width: 600, theme: Dark)").unwrap();
        assert_eq!(config.fig_dir, PathBuf::from("out/figs"));
        assert_eq!(config.width, 600);
        assert_eq!(config.height, 400);
        assert_eq!(config.theme, PlotThemes::Dark);
        assert_eq!(config.trap, PenningTrap::default());
    }

    #[test]
    fn test_resolve_paths() {
        let config = SimvizConfig::default();
        assert_eq!(
            config.resolve(Path::new("no_such_file.csv")),
            PathBuf::from("build/data/no_such_file.csv")
        );
        assert_eq!(
            config.resolve(Path::new("/tmp/abs.csv")),
            PathBuf::from("/tmp/abs.csv")
        );
        assert_eq!(
            config.figure_path("abs_err.svg"),
            PathBuf::from("build/figs/abs_err.svg")
        );
    }

    #[test]
    fn test_figure_sizes() {
        let config = SimvizConfig::default();
        assert_eq!(config.figure().size(), (800, 400));
        assert_eq!(config.square_figure().size(), (800, 800));
    }
}
