use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use analysis::{AnalysisErrors, ZeroReference};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use datafile::DataFileErrors;
use plotting::PlotErrors;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::LabelledPath;
use config::SimvizConfig;

#[derive(Debug, Error)]
pub enum SimvizErrors {
    #[error("{0}")]
    Analysis(#[from] AnalysisErrors),
    #[error("config: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("{0}")]
    DataFile(#[from] DataFileErrors),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Plot(#[from] PlotErrors),
    #[error("{0}")]
    InvalidArgument(String),
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// RON file with directories, figure size and theme
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Plot numerical solutions against the exact solution
    Solutions {
        exact: PathBuf,
        /// Numerical solutions as N=PATH, N being the step count
        #[arg(short, long)]
        numerical: Vec<LabelledPath<usize>>,
    },
    /// Absolute and relative errors plus the convergence table
    Errors {
        exact: PathBuf,
        /// Numerical solutions as N=PATH, N being the step count
        #[arg(short, long, required = true)]
        numerical: Vec<LabelledPath<usize>>,
        /// What to do where the exact solution is zero
        #[arg(long, value_enum, default_value_t = ZeroPolicy::Propagate)]
        zero: ZeroPolicy,
        /// Print the convergence table as LaTeX
        #[arg(long)]
        latex: bool,
    },
    /// Mean run times of the general and special solvers
    Timings {
        /// General solver timing files as N=PATH
        #[arg(short, long, required = true)]
        general: Vec<LabelledPath<usize>>,
        /// Special solver timing files as N=PATH
        #[arg(short, long)]
        special: Vec<LabelledPath<usize>>,
        /// Column holding the timings
        #[arg(long, default_value_t = 2)]
        column: usize,
    },
    /// Compare computed eigenvectors with the analytical modes
    Eigen {
        /// Eigen files as N=PATH
        #[arg(required = true)]
        files: Vec<LabelledPath<usize>>,
        /// Number of lowest modes to draw
        #[arg(long, default_value_t = 3)]
        modes: usize,
    },
    /// Fit a power law to iteration counts
    Iterations { data: PathBuf },
    /// Overlay particle trajectories from trap runs
    Trajectories {
        /// Single particle run drawn as z against t
        #[arg(long)]
        single: Option<PathBuf>,
        /// Multi particle runs drawn in the xy plane and in phase space
        runs: Vec<PathBuf>,
    },
    /// Relative error of single particle runs against the exact solution
    TrapError {
        /// Runs as N=PATH, N being the step count
        #[arg(required = true)]
        runs: Vec<LabelledPath<usize>>,
        /// Integrator name used in the title and file name
        #[arg(long, default_value = "RK4")]
        method: String,
        #[arg(long, value_delimiter = ',', default_values_t = [20.0, 0.0, 20.0])]
        r0: Vec<f64>,
        #[arg(long, value_delimiter = ',', default_values_t = [0.0, 25.0, 0.0])]
        v0: Vec<f64>,
    },
    /// Fraction of particles left in the trap against driving frequency
    Trapped {
        /// Escape files as AMPLITUDE=PATH
        #[arg(required = true)]
        files: Vec<LabelledPath<String>>,
        /// Escape files of runs without particle interactions, drawn dashed
        #[arg(long)]
        reference: Vec<LabelledPath<String>>,
        #[arg(long, default_value_t = 100)]
        particles: usize,
        /// Frequency range as MIN,MAX
        #[arg(long, value_delimiter = ',')]
        xlim: Option<Vec<f64>>,
    },
    /// Overlay columns of arbitrary delimited files
    Overlay {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, default_value_t = 0)]
        x: usize,
        #[arg(short, default_value_t = 1)]
        y: usize,
        /// Legend labels, one per file; file stems by default
        #[arg(long)]
        label: Vec<String>,
        #[arg(long)]
        xlabel: Option<String>,
        #[arg(long)]
        ylabel: Option<String>,
        #[arg(short, long, default_value = "overlay.svg")]
        output: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ZeroPolicy {
    Propagate,
    Mask,
}

impl From<ZeroPolicy> for ZeroReference {
    fn from(policy: ZeroPolicy) -> Self {
        match policy {
            ZeroPolicy::Propagate => ZeroReference::Propagate,
            ZeroPolicy::Mask => ZeroReference::Mask,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SimvizErrors> {
    let config = match &cli.config {
        Some(path) => SimvizConfig::load(path)?,
        None => SimvizConfig::default(),
    };
    debug!(?config);

    let start = Instant::now();
    match cli.command {
        Commands::Solutions { exact, numerical } => {
            commands::solutions::run(&config, &exact, &numerical)?
        }
        Commands::Errors {
            exact,
            numerical,
            zero,
            latex,
        } => commands::errors::run(&config, &exact, &numerical, zero.into(), latex)?,
        Commands::Timings {
            general,
            special,
            column,
        } => commands::timings::run(&config, &general, &special, column)?,
        Commands::Eigen { files, modes } => commands::eigen::run(&config, &files, modes)?,
        Commands::Iterations { data } => commands::iterations::run(&config, &data)?,
        Commands::Trajectories { single, runs } => {
            commands::trajectories::run(&config, single.as_deref(), &runs)?
        }
        Commands::TrapError {
            runs,
            method,
            r0,
            v0,
        } => commands::trap::run_error(&config, &runs, &method, &r0, &v0)?,
        Commands::Trapped {
            files,
            reference,
            particles,
            xlim,
        } => commands::trap::run_trapped(&config, &files, &reference, particles, xlim.as_deref())?,
        Commands::Overlay {
            files,
            x,
            y,
            label,
            xlabel,
            ylabel,
            output,
        } => commands::overlay::run(
            &config,
            &files,
            (x, y),
            &label,
            xlabel.as_deref(),
            ylabel.as_deref(),
            &output,
        )?,
    }
    info!("done in {}", utilities::format_duration(start.elapsed()));
    Ok(())
}
