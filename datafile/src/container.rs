use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use ndarray::ArrayD;
use ndarray_npy::NpzReader;
use tracing::debug;

use crate::DataFileErrors;

/// A file holding named n-dimensional float arrays.
pub trait DatasetContainer {
    fn dataset(&mut self, name: &str) -> Result<ArrayD<f64>, DataFileErrors>;
    fn names(&mut self) -> Result<Vec<String>, DataFileErrors>;
}

/// Arrays stored in a numpy `.npz` archive.
pub struct NpzContainer {
    reader: NpzReader<File>,
}

impl NpzContainer {
    pub fn open(path: &Path) -> Result<Self, DataFileErrors> {
        let file = File::open(path)?;
        let reader = NpzReader::new(file)?;
        debug!("opened {}", path.display());
        Ok(Self { reader })
    }
}

impl DatasetContainer for NpzContainer {
    fn dataset(&mut self, name: &str) -> Result<ArrayD<f64>, DataFileErrors> {
        // numpy stores entries with a .npy suffix
        let stored = self.reader.names()?;
        let with_suffix = format!("{name}.npy");
        let key = stored
            .into_iter()
            .find(|n| n == name || *n == with_suffix)
            .ok_or_else(|| DataFileErrors::MissingDataset(name.to_string()))?;
        Ok(self.reader.by_name(&key)?)
    }

    fn names(&mut self) -> Result<Vec<String>, DataFileErrors> {
        Ok(self
            .reader
            .names()?
            .into_iter()
            .map(|n| n.trim_end_matches(".npy").to_string())
            .collect())
    }
}

/// Arrays held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    datasets: BTreeMap<String, ArrayD<f64>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: ArrayD<f64>) {
        self.datasets.insert(name.into(), data);
    }

    pub fn with(mut self, name: impl Into<String>, data: ArrayD<f64>) -> Self {
        self.insert(name, data);
        self
    }
}

impl DatasetContainer for MemoryContainer {
    fn dataset(&mut self, name: &str) -> Result<ArrayD<f64>, DataFileErrors> {
        self.datasets
            .get(name)
            .cloned()
            .ok_or_else(|| DataFileErrors::MissingDataset(name.to_string()))
    }

    fn names(&mut self) -> Result<Vec<String>, DataFileErrors> {
        Ok(self.datasets.keys().cloned().collect())
    }
}
