//! CSV and JSON table loaders

use super::{BenchmarkTable, LoadError};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load every row of a CSV table at `path`
pub fn load_instruments<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let rows = read_instruments(file, &path.display().to_string())?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Loaded instrument table");
    Ok(rows)
}

/// Parse a CSV table from any reader
///
/// `origin` only labels errors.
pub fn read_instruments<T: DeserializeOwned, R: Read>(
    reader: R,
    origin: &str,
) -> Result<Vec<T>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| LoadError::Csv {
            path: origin.to_string(),
            source,
        })
}

/// Load the sector benchmark table from a JSON file
pub fn load_benchmarks(path: impl AsRef<Path>) -> Result<BenchmarkTable, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let table: BenchmarkTable =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
            LoadError::Json {
                path: path.display().to_string(),
                source,
            }
        })?;

    tracing::info!(path = %path.display(), sectors = table.len(), "Loaded sector benchmarks");
    Ok(table)
}
