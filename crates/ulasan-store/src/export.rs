//! Write labeled reviews to disk.
//!
//! JSON is the array the dashboard consumes directly. CSV and Parquet go
//! through the Arrow schema in `ulasan_core::schema`, so all three formats
//! share one header.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::info;
use ulasan_core::{LabeledReview, to_record_batch};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Parquet,
}

impl ExportFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            other => Err(StoreError::UnknownFormat(other.to_string())),
        }
    }
}

/// Write reviews in the given format.
pub fn export(path: &Path, format: ExportFormat, reviews: &[LabeledReview]) -> Result<(), StoreError> {
    match format {
        ExportFormat::Json => write_json(path, reviews)?,
        ExportFormat::Csv => write_csv(path, reviews)?,
        ExportFormat::Parquet => write_parquet(path, reviews)?,
    }
    info!(path = %path.display(), format = format.as_str(), rows = reviews.len(), "exported reviews");
    Ok(())
}

/// Pretty-printed JSON array with the contract field names.
pub fn write_json(path: &Path, reviews: &[LabeledReview]) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, reviews)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Vec<LabeledReview>, StoreError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// CSV with a header row. Missing image URLs are empty cells.
pub fn write_csv(path: &Path, reviews: &[LabeledReview]) -> Result<(), StoreError> {
    let batch = to_record_batch(reviews)?;
    let mut writer = arrow::csv::WriterBuilder::new()
        .with_header(true)
        .build(BufWriter::new(File::create(path)?));
    writer.write(&batch)?;
    writer.into_inner().flush()?;
    Ok(())
}

pub fn write_parquet(path: &Path, reviews: &[LabeledReview]) -> Result<(), StoreError> {
    let batch = to_record_batch(reviews)?;
    let mut writer = ArrowWriter::try_new(File::create(path)?, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}
