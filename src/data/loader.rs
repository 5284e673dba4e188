//! Dataset Manager Module
//! Loads, appends and rewrites the persisted car-sales table using Polars.

use super::processor::DataProcessor;
use super::record::{CarSale, SaleField};
use crate::charts::{ChartProjection, ChartSpec};
use crate::stats::{Aggregate, AggregateCalculator, StatsError};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("No dataset found at {}", .0.display())]
    MissingDataset(PathBuf),
    #[error("No records to save")]
    EmptyEntry,
    #[error("Failed to process CSV: {0}")]
    Polars(#[from] PolarsError),
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// The ordered collection of persisted records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<CarSale>,
}

impl Dataset {
    pub fn new(records: Vec<CarSale>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CarSale] {
        &self.records
    }
}

/// Owns the location of the persisted table and performs every read and
/// write against it. Single writer only; there is no cross-process locking.
pub struct DatasetManager {
    file_path: PathBuf,
}

impl DatasetManager {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Read the persisted table as a DataFrame.
    pub fn load_frame(&self) -> Result<DataFrame, DatasetError> {
        if !self.file_path.exists() {
            return Err(DatasetError::MissingDataset(self.file_path.clone()));
        }

        let df = LazyCsvReader::new(&self.file_path)
            .with_has_header(true)
            .with_schema(Some(DataProcessor::schema()))
            .finish()?
            .collect()?;

        debug!(path = %self.file_path.display(), rows = df.height(), "loaded dataset");
        Ok(df)
    }

    /// Read the persisted table as records.
    pub fn load(&self) -> Result<Dataset, DatasetError> {
        let df = self.load_frame()?;
        let records = DataProcessor::to_records(&df)?;
        if records.len() < df.height() {
            debug!(skipped = df.height() - records.len(), "dropped incomplete rows");
        }
        Ok(Dataset::new(records))
    }

    /// Append records after the existing rows and rewrite the whole file.
    ///
    /// Returns the total number of rows now persisted.
    pub fn append(&self, records: &[CarSale]) -> Result<usize, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::EmptyEntry);
        }

        let new_df = DataProcessor::to_frame(records)?;
        let mut combined = match self.load_frame() {
            Ok(existing) => existing.vstack(&new_df)?,
            Err(DatasetError::MissingDataset(_)) => new_df,
            Err(e) => return Err(e),
        };

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = File::create(&self.file_path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut combined)?;

        debug!(
            path = %self.file_path.display(),
            appended = records.len(),
            total = combined.height(),
            "rewrote dataset"
        );
        Ok(combined.height())
    }

    /// Sum `field_to_sum` per distinct value of `group_by`.
    pub fn aggregate_sum(
        &self,
        field_to_sum: SaleField,
        group_by: SaleField,
    ) -> Result<Aggregate, DatasetError> {
        let dataset = self.load()?;
        Ok(AggregateCalculator::sum(dataset.records(), field_to_sum, group_by)?)
    }

    /// Average `field_to_average` per distinct value of `group_by`.
    pub fn aggregate_mean(
        &self,
        field_to_average: SaleField,
        group_by: SaleField,
    ) -> Result<Aggregate, DatasetError> {
        let dataset = self.load()?;
        Ok(AggregateCalculator::mean(
            dataset.records(),
            field_to_average,
            group_by,
        )?)
    }

    /// Compute the points of one chart from the current dataset.
    pub fn project(&self, spec: ChartSpec) -> Result<ChartProjection, DatasetError> {
        let dataset = self.load()?;
        Ok(ChartProjection::project(dataset.records(), spec)?)
    }
}
