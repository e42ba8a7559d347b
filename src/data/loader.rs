// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Reads the crop dataset from a CSV file with a header row.
//
// The header must contain at least: temp, rainfall, soil_ph, crop.
// Column order in the file does not matter, the csv crate maps
// headers onto TrainingRecord fields by name. Extra columns are
// ignored.
//
// No range or completeness checks are applied: a row that parses
// is used as-is. A row that does not parse (e.g. an empty numeric
// cell) aborts the load, naming the offending line.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::record::TrainingRecord;
use crate::domain::traits::RecordSource;

/// Loads TrainingRecords from a single CSV file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    /// Create a new CsvLoader pointed at a file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<TrainingRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<TrainingRecord>().enumerate() {
            // +2: one for the header, one for 1-based line numbers
            let record = row.with_context(|| {
                format!("Invalid row at line {} of '{}'", idx + 2, self.path.display())
            })?;
            records.push(record);
        }

        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_loads_rows_by_header_name() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("crops.csv");
        fs::write(
            &path,
            "crop,soil_ph,rainfall,temp,notes\n\
             rice,6.5,100,25,wet\n\
             maize, 6.0 ,60,22,dry\n",
        )
        .unwrap();

        let records = CsvLoader::new(&path).load_all().unwrap();
        assert_eq!(
            records,
            vec![
                TrainingRecord::new(25.0, 100.0, 6.5, "rice"),
                TrainingRecord::new(22.0, 60.0, 6.0, "maize"),
            ]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvLoader::new(dir.path().join("nope.csv")).load_all().unwrap_err();
        assert!(err.to_string().contains("Cannot open dataset"));
    }

    #[test]
    fn test_unparseable_row_names_the_line() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "temp,rainfall,soil_ph,crop\n25,100,6.5,rice\n,100,6.5,rice\n").unwrap();

        let err = CsvLoader::new(&path).load_all().unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_header_only_gives_no_rows() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "temp,rainfall,soil_ph,crop\n").unwrap();

        assert!(CsvLoader::new(&path).load_all().unwrap().is_empty());
    }
}
