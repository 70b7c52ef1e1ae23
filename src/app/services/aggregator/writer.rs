//! Parquet output for the accumulated dataset

use crate::app::interfaces::DatasetWriter;
use crate::app::services::aggregator::Dataset;
use crate::config::CompressionAlgorithm;
use crate::{Error, Result};

use polars::prelude::{ParquetWriter as PolarsParquetWriter, StatisticsOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes the dataset as a single Parquet file
#[derive(Debug, Clone)]
pub struct ParquetDatasetWriter {
    output_path: PathBuf,
    compression: CompressionAlgorithm,
}

impl ParquetDatasetWriter {
    pub fn new(output_path: impl Into<PathBuf>, compression: CompressionAlgorithm) -> Self {
        Self {
            output_path: output_path.into(),
            compression,
        }
    }

    /// Get the output file path
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl DatasetWriter for ParquetDatasetWriter {
    fn write(&self, dataset: &Dataset) -> Result<u64> {
        let mut df = dataset.to_dataframe()?;
        debug!(
            "Writing {} profiles ({} rows) to {}",
            dataset.len(),
            df.height(),
            self.output_path.display()
        );

        if let Some(parent) = self
            .output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create output directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = std::fs::File::create(&self.output_path).map_err(|e| {
            Error::io(
                format!("Failed to create '{}'", self.output_path.display()),
                e,
            )
        })?;

        PolarsParquetWriter::new(file)
            .with_compression(self.compression.to_polars_compression())
            .with_statistics(StatisticsOptions::full())
            .finish(&mut df)
            .map_err(|e| {
                Error::dataset_write(
                    format!("Failed to write '{}'", self.output_path.display()),
                    Some(e),
                )
            })?;

        let bytes_written = std::fs::metadata(&self.output_path)
            .map(|m| m.len())
            .unwrap_or(0);
        info!(
            "Wrote {} bytes to {}",
            bytes_written,
            self.output_path.display()
        );
        Ok(bytes_written)
    }
}
