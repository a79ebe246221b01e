use thiserror::Error;

pub mod container;
pub mod table;
pub mod trap;

pub use container::{DatasetContainer, MemoryContainer, NpzContainer};
pub use table::{Delimiter, Table, read_table};
pub use trap::{Component, EscapeData, TrapRun};

#[derive(Debug, Error)]
pub enum DataFileErrors {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Npz(#[from] ndarray_npy::ReadNpzError),
    #[error("line {line}: could not parse '{field}' as a number")]
    Parse { line: usize, field: String },
    #[error("line {line}: expected {expected} columns, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("table has no data rows")]
    Empty,
    #[error("column {0} out of range for a table with {1} columns")]
    ColumnOutOfRange(usize, usize),
    #[error("dataset '{0}' not found")]
    MissingDataset(String),
    #[error("dataset '{name}' has shape {found:?}, expected {expected}")]
    Shape {
        name: String,
        expected: String,
        found: Vec<usize>,
    },
    #[error("particle {0} out of range, run has {1} particles")]
    ParticleOutOfRange(usize, usize),
}
