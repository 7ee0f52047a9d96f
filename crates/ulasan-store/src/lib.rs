//! Export layer: labeled reviews to JSON (dashboard), CSV and Parquet (analysis).

mod error;
pub use error::StoreError;

mod export;
pub use export::{ExportFormat, export, read_json, read_parquet, write_csv, write_json, write_parquet};
