//! Tabular dataset model and the CSV loader.

use std::{
    collections::HashSet,
    fs::File,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, info};
use thiserror::Error;

use crate::io_utils;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The named source does not exist. Terminal: the caller reports it and
    /// stops. There is no retry and no partial load.
    #[error("source file {} not found; check the file name and location", .0.display())]
    SourceNotFound(PathBuf),
    #[error("source file {} has no columns", .0.display())]
    NoColumns(PathBuf),
}

/// An ordered set of named columns over rows of raw text cells.
///
/// Cells stay untyped here. Role-driven coercion happens in the cleaning
/// pass, which derives its own view; a loaded dataset is never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: dedupe_headers(headers),
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// Renames duplicate headers (`Sales`, `Sales_2`, ...) so lookups by name
/// stay deterministic. Column names are unique within one dataset.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(headers.len());
    for header in headers {
        if taken.insert(header.clone()) {
            unique.push(header);
            continue;
        }
        let mut suffix = 2usize;
        let mut candidate = format!("{header}_{suffix}");
        while !taken.insert(candidate.clone()) {
            suffix += 1;
            candidate = format!("{header}_{suffix}");
        }
        debug!("Renamed duplicate column '{header}' to '{candidate}'");
        unique.push(candidate);
    }
    unique
}

/// Reads the whole source into memory. The dataset is loaded once per run
/// and every view recomputes from it.
pub fn load(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Dataset> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(LoadError::SourceNotFound(path.to_path_buf()).into());
        }
        Err(err) => {
            return Err(
                anyhow::Error::new(err).context(format!("Opening input file {path:?}"))
            );
        }
    };

    let mut reader = io_utils::csv_reader(file, delimiter);
    let header_record = reader
        .byte_headers()
        .with_context(|| format!("Reading headers from {path:?}"))?
        .clone();
    let headers = io_utils::decode_record(&header_record, encoding)?;
    if headers.is_empty() {
        return Err(LoadError::NoColumns(path.to_path_buf()).into());
    }

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        rows.push(io_utils::decode_record(&record, encoding)?);
    }

    info!(
        "Loaded {} row(s) across {} column(s) from {:?}",
        rows.len(),
        headers.len(),
        path
    );
    Ok(Dataset::new(headers, rows))
}
