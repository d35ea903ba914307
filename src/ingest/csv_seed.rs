//! CSV Seeding
//!
//! Loads per-sensor sample files into the reading store. Each sensor in
//! the catalog gets its data from `<sample_dir>/<sensor>.csv` with the
//! columns `timestamp,unit,value`; a missing file just skips that sensor.

use super::IngestError;
use crate::sensors::SensorCatalog;
use crate::storage::{NewReading, ReadingStore};
use crate::timeparse;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Seeds the reading store from sample CSV files
pub struct CsvSeeder {
    sample_dir: PathBuf,
}

/// Result of a seeding run
#[derive(Debug, Default)]
pub struct SeedReport {
    pub files_loaded: usize,
    pub rows_inserted: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s), {} row(s) inserted, {} failed",
            self.files_loaded, self.rows_inserted, self.rows_failed
        )
    }
}

/// One row of a sample file
#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    #[serde(default)]
    unit: Option<String>,
    value: f64,
}

impl CsvSeeder {
    /// Create a seeder reading from the given sample directory
    pub fn new(sample_dir: impl Into<PathBuf>) -> Self {
        Self {
            sample_dir: sample_dir.into(),
        }
    }

    /// Seed every cataloged sensor that has a sample file
    ///
    /// Row-level errors are collected in the report rather than aborting
    /// the run. With `fresh` set, each seeded sensor's existing readings
    /// are removed first.
    pub async fn seed(
        &self,
        store: &ReadingStore,
        catalog: &SensorCatalog,
        fresh: bool,
    ) -> Result<SeedReport, IngestError> {
        let mut report = SeedReport::default();

        for spec in catalog.iter() {
            let path = self.sample_dir.join(format!("{}.csv", spec.name));
            if !path.exists() {
                tracing::debug!(
                    sensor = %spec.name,
                    path = %path.display(),
                    "No sample file, skipping"
                );
                continue;
            }

            if fresh {
                let removed = store.clear(&spec.name).await?;
                if removed > 0 {
                    tracing::info!(sensor = %spec.name, removed, "Cleared existing readings");
                }
            }

            let (readings, errors) = self.parse_file(&path, &spec.unit)?;
            report.rows_failed += errors.len();
            report
                .errors
                .extend(errors.into_iter().map(|e| format!("{}.csv: {}", spec.name, e)));

            let inserted = store.insert_batch(&spec.name, readings).await?;
            report.rows_inserted += inserted;
            report.files_loaded += 1;

            tracing::info!(sensor = %spec.name, inserted, "Seeded sample data");
        }

        // Truncate errors if too many
        if report.errors.len() > 20 {
            let total = report.errors.len();
            report.errors.truncate(20);
            report.errors.push(format!("... and {} more errors", total - 20));
        }

        Ok(report)
    }

    /// Parse one sample file
    fn parse_file(
        &self,
        path: &Path,
        default_unit: &str,
    ) -> Result<(Vec<NewReading>, Vec<String>), IngestError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        Ok(parse_records(reader, default_unit))
    }

    /// Parse from a CSV string (useful for testing)
    pub fn parse_str(&self, csv_data: &str, default_unit: &str) -> (Vec<NewReading>, Vec<String>) {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        parse_records(reader, default_unit)
    }
}

fn parse_records<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    default_unit: &str,
) -> (Vec<NewReading>, Vec<String>) {
    let mut readings = Vec::new();
    let mut errors = Vec::new();

    for (line_num, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Header row occupies line 1
        let line = line_num + 2;

        let row = match result {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("line {}: {}", line, e));
                continue;
            }
        };

        let timestamp = match timeparse::canonicalize(&row.timestamp) {
            Ok(ts) => ts,
            Err(e) => {
                errors.push(format!("line {}: {}", line, e));
                continue;
            }
        };

        if !row.value.is_finite() {
            errors.push(format!("line {}: value must be a finite number", line));
            continue;
        }

        let unit = match row.unit {
            Some(u) if !u.is_empty() => u,
            _ => default_unit.to_string(),
        };

        readings.push(NewReading::new(timestamp, unit, row.value));
    }

    (readings, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreConfig;
    use tempfile::tempdir;

    #[test]
    fn test_parse_valid_csv() {
        let csv_data = "timestamp,unit,value
2024-01-01 00:00:00,C,21.5
2024-01-01T01:00:00,,22.0
2024-01-02,C,20.8";

        let seeder = CsvSeeder::new("unused");
        let (readings, errors) = seeder.parse_str(csv_data, "C");

        assert!(errors.is_empty());
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].timestamp, "2024-01-01 00:00:00");
        // ISO form canonicalized, empty unit replaced by the default
        assert_eq!(readings[1].timestamp, "2024-01-01 01:00:00");
        assert_eq!(readings[1].unit, "C");
        // Date-only rows land at midnight
        assert_eq!(readings[2].timestamp, "2024-01-02 00:00:00");
    }

    #[test]
    fn test_parse_collects_row_errors() {
        let csv_data = "timestamp,unit,value
2024-01-01 00:00:00,C,21.5
not-a-time,C,22.0
2024-01-01 02:00:00,C,warm";

        let seeder = CsvSeeder::new("unused");
        let (readings, errors) = seeder.parse_str(csv_data, "C");

        assert_eq!(readings.len(), 1);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("line 3:"));
        assert!(errors[1].starts_with("line 4:"));
    }

    #[tokio::test]
    async fn test_seed_inserts_into_store() {
        let data_dir = tempdir().unwrap();
        let sample_dir = tempdir().unwrap();

        std::fs::write(
            sample_dir.path().join("temperature.csv"),
            "timestamp,unit,value\n2024-01-01 00:00:00,C,21.5\n2024-01-01 01:00:00,C,22.0\n",
        )
        .unwrap();
        std::fs::write(
            sample_dir.path().join("humidity.csv"),
            "timestamp,unit,value\n2024-01-01 00:00:00,%,55.0\n",
        )
        .unwrap();

        let store = ReadingStore::open(StoreConfig::new(data_dir.path()))
            .await
            .unwrap();
        let seeder = CsvSeeder::new(sample_dir.path());

        let report = seeder
            .seed(&store, &SensorCatalog::default(), false)
            .await
            .unwrap();

        assert_eq!(report.files_loaded, 2);
        assert_eq!(report.rows_inserted, 3);
        assert_eq!(report.rows_failed, 0);
        assert_eq!(store.count("temperature").await.unwrap(), 2);
        assert_eq!(store.count("humidity").await.unwrap(), 1);
        assert_eq!(store.count("light").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_fresh_replaces_existing() {
        let data_dir = tempdir().unwrap();
        let sample_dir = tempdir().unwrap();

        std::fs::write(
            sample_dir.path().join("temperature.csv"),
            "timestamp,unit,value\n2024-01-01 00:00:00,C,21.5\n",
        )
        .unwrap();

        let store = ReadingStore::open(StoreConfig::new(data_dir.path()))
            .await
            .unwrap();
        let seeder = CsvSeeder::new(sample_dir.path());
        let catalog = SensorCatalog::default();

        seeder.seed(&store, &catalog, false).await.unwrap();
        seeder.seed(&store, &catalog, false).await.unwrap();
        assert_eq!(store.count("temperature").await.unwrap(), 2);

        seeder.seed(&store, &catalog, true).await.unwrap();
        assert_eq!(store.count("temperature").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_skips_missing_files() {
        let data_dir = tempdir().unwrap();
        let sample_dir = tempdir().unwrap();

        let store = ReadingStore::open(StoreConfig::new(data_dir.path()))
            .await
            .unwrap();
        let seeder = CsvSeeder::new(sample_dir.path());

        let report = seeder
            .seed(&store, &SensorCatalog::default(), false)
            .await
            .unwrap();

        assert_eq!(report.files_loaded, 0);
        assert_eq!(report.rows_inserted, 0);
    }
}
