use thiserror::Error;

pub mod artist;
pub mod figure;
pub mod legend;
pub mod overlay;
pub mod series;
pub mod surface;
pub mod theme;

pub use artist::{Artist, Line, LineStyle, Marker, MarkerShape};
pub use figure::Figure;
pub use legend::{Legend, LegendEntry, LegendPosition};
pub use overlay::{PlotRequest, plot_trajectories};
pub use series::Series;
pub use surface::{Scale, Surface};
pub use theme::{PlotTheme, PlotThemes};

#[derive(Debug, Error)]
pub enum PlotErrors {
    #[error("x and y data must be the same length, got {0} and {1}")]
    DataSizeMismatch(usize, usize),
    #[error("drawing failed: {0}")]
    Drawing(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
