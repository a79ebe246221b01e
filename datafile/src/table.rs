use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::DataFileErrors;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Whitespace,
    /// Comma if the first data line has one, whitespace otherwise.
    #[default]
    Auto,
}

/// A rectangular block of numbers read from a delimited text file.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: Vec<Vec<f64>>,
    ncols: usize,
}

pub fn read_table(path: &Path, delimiter: Delimiter) -> Result<Table, DataFileErrors> {
    let file = File::open(path)?;
    let table = Table::from_reader(file, delimiter)?;
    debug!(
        "read {} x {} table from {}",
        table.nrows(),
        table.ncols(),
        path.display()
    );
    Ok(table)
}

impl Table {
    pub fn from_reader<R: Read>(mut reader: R, delimiter: Delimiter) -> Result<Self, DataFileErrors> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let delimiter = match delimiter {
            Delimiter::Auto => {
                let first = text.lines().find(|l| is_data_line(l));
                if first.is_some_and(|l| l.contains(',')) {
                    Delimiter::Comma
                } else {
                    Delimiter::Whitespace
                }
            }
            d => d,
        };

        let mut table = Self {
            rows: Vec::new(),
            ncols: 0,
        };
        match delimiter {
            Delimiter::Comma => {
                let mut csv = ReaderBuilder::new()
                    .has_headers(false)
                    .comment(Some(b'#'))
                    .trim(Trim::All)
                    .flexible(true)
                    .from_reader(text.as_bytes());
                for result in csv.records() {
                    let record = result?;
                    if record.iter().all(|f| f.is_empty()) {
                        continue;
                    }
                    let line = record.position().map_or(0, |p| p.line() as usize);
                    table.push_fields(line, record.iter())?;
                }
            }
            _ => {
                for (i, line) in text.lines().enumerate() {
                    if is_data_line(line) {
                        table.push_fields(i + 1, line.split_whitespace())?;
                    }
                }
            }
        }

        if table.rows.is_empty() {
            return Err(DataFileErrors::Empty);
        }
        Ok(table)
    }

    fn push_fields<'a>(
        &mut self,
        line: usize,
        fields: impl Iterator<Item = &'a str>,
    ) -> Result<(), DataFileErrors> {
        let row = fields
            .map(|field| {
                field.parse::<f64>().map_err(|_| DataFileErrors::Parse {
                    line,
                    field: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if self.rows.is_empty() {
            self.ncols = row.len();
        } else if row.len() != self.ncols {
            return Err(DataFileErrors::Ragged {
                line,
                expected: self.ncols,
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.rows.get(i).map(|r| r.as_slice())
    }

    pub fn column(&self, j: usize) -> Result<Vec<f64>, DataFileErrors> {
        if j >= self.ncols {
            return Err(DataFileErrors::ColumnOutOfRange(j, self.ncols));
        }
        Ok(self.rows.iter().map(|r| r[j]).collect())
    }

    pub fn xy(&self, xcol: usize, ycol: usize) -> Result<(Vec<f64>, Vec<f64>), DataFileErrors> {
        Ok((self.column(xcol)?, self.column(ycol)?))
    }
}

fn is_data_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}
