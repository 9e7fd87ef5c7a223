//! Input File Loaders
//!
//! Parses the two JSON input shapes (reference file: array of
//! `ReferenceRecord`; mutation file: array of `MutationRecord`) into the
//! in-memory measurement store. Schema violations are fatal and name the
//! offending file and record.

use enermut_core::{MutationRecord, ReferenceRecord, ResultSample};
use std::path::{Path, PathBuf};

/// Errors from loading input files
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The file violated the input schema
    #[error("malformed input in {path}: {message}")]
    Malformed {
        /// Offending file
        path: PathBuf,
        /// What was wrong, identifying the record where possible
        message: String,
    },
}

fn malformed(path: &Path, message: impl Into<String>) -> LoadError {
    LoadError::Malformed {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| malformed(path, e.to_string()))
}

fn check_samples(samples: &[ResultSample], path: &Path, context: &str) -> Result<(), LoadError> {
    if samples.is_empty() {
        return Err(malformed(path, format!("{context}: empty result group")));
    }
    for sample in samples {
        for (component, &value) in &sample.0 {
            if !value.is_finite() || value < 0.0 {
                return Err(malformed(
                    path,
                    format!("{context}: component '{component}' has invalid energy {value}"),
                ));
            }
        }
    }
    Ok(())
}

/// Load and validate a reference file.
///
/// Validates that the array is non-empty, every result group is non-empty
/// with non-negative finite energies, and mileage values strictly
/// increase.
pub fn load_reference_file(path: &Path) -> Result<Vec<ReferenceRecord>, LoadError> {
    let records: Vec<ReferenceRecord> = read_json(path)?;
    if records.is_empty() {
        return Err(malformed(path, "reference file holds no records"));
    }
    for (i, record) in records.iter().enumerate() {
        check_samples(&record.results, path, &format!("reference record {i}"))?;
        if i > 0 && records[i - 1].mileage >= record.mileage {
            return Err(malformed(
                path,
                format!(
                    "reference record {i}: mileage {} does not increase past {}",
                    record.mileage,
                    records[i - 1].mileage
                ),
            ));
        }
    }
    Ok(records)
}

/// Load and validate a mutation file.
///
/// Attempts without results are legal (crashed runs); attempts with
/// results must carry a non-empty group of non-negative finite energies.
pub fn load_mutation_file(path: &Path) -> Result<Vec<MutationRecord>, LoadError> {
    let records: Vec<MutationRecord> = read_json(path)?;
    for (i, record) in records.iter().enumerate() {
        if record.paths.is_empty() {
            return Err(malformed(path, format!("mutation record {i}: no paths")));
        }
        for attempt in &record.mutations {
            if let Some(samples) = &attempt.results {
                check_samples(samples, path, &format!("mutation record {i}"))?;
            }
        }
    }
    Ok(records)
}
