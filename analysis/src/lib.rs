use thiserror::Error;

pub mod convergence;
pub mod eigen;
pub mod interpolate;
pub mod metrics;
pub mod penning;
pub mod regression;
pub mod statistics;

pub use convergence::ConvergenceTable;
pub use eigen::{EigenDecomposition, Mode, analytical_mode};
pub use interpolate::LinearInterpolator;
pub use metrics::{
    ZeroReference, absolute_error, interior, log10_values, max_finite, relative_error,
    vector_relative_error,
};
pub use penning::{PenningTrap, fraction_inside};
pub use regression::{LinearFit, PowerLaw, linear_regression};
pub use statistics::{TimingSummary, mean, normalize_timings, std_dev};

#[derive(Debug, Error)]
pub enum AnalysisErrors {
    #[error("length mismatch: {0} != {1}")]
    LengthMismatch(usize, usize),
    #[error("need at least {needed} points, got {found}")]
    TooFewPoints { needed: usize, found: usize },
    #[error("x values must be strictly increasing (index {0})")]
    NotIncreasing(usize),
    #[error("x values are all equal")]
    ConstantX,
    #[error("value must be positive, got {0}")]
    NonPositive(f64),
    #[error("eigen data: {0}")]
    EigenLayout(String),
    #[error("mode {0} out of range for {1} eigenpairs")]
    ModeOutOfRange(usize, usize),
    #[error("trap is not confining: omega_0^2 = {omega_0_sq} < 2 omega_z^2 = {two_omega_z_sq}")]
    UnboundTrap {
        omega_0_sq: f64,
        two_omega_z_sq: f64,
    },
}
