//! Classification pipeline: read a scrape job, run the cascade, write results.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::warn;
use ulasan_ai::{BatchClassifier, BatchReport, ModelError, ReviewModel};
use ulasan_core::{Label, ScrapeJob};
use ulasan_store::ExportFormat;

#[derive(Debug)]
pub struct ClassifyStats {
    pub started_at: DateTime<Utc>,
    pub elapsed_secs: f64,
}

/// Read a scrape job document written by the scraper.
pub fn read_job(path: &Path) -> anyhow::Result<ScrapeJob> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let job: ScrapeJob = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing scrape job {}", path.display()))?;
    Ok(job)
}

/// Run the batch driver over a job and write the labeled reviews.
///
/// If the model fails partway, whatever was labeled before the failure is
/// still written before the error is returned.
pub fn run_classify_pipeline<M: ReviewModel>(
    batch: &mut BatchClassifier<M>,
    job: ScrapeJob,
    output: Option<&Path>,
    format: Option<ExportFormat>,
) -> anyhow::Result<(BatchReport, ClassifyStats)> {
    let started_at = Utc::now();
    let start = Instant::now();

    let report = match batch.run_job(job) {
        Ok(report) => report,
        Err(e) => {
            if let Some(partial) = e.partial() {
                warn!(labeled = partial.reviews.len(), "writing partial results");
                write_output(partial, output, format)?;
            }
            return Err(e).context("classifying reviews");
        }
    };
    write_output(&report, output, format)?;

    Ok((
        report,
        ClassifyStats {
            started_at,
            elapsed_secs: start.elapsed().as_secs_f64(),
        },
    ))
}

/// Export to `output` (format from `--format`, else the extension, else JSON),
/// or print JSON to stdout when no output path is given.
pub fn write_output(
    report: &BatchReport,
    output: Option<&Path>,
    format: Option<ExportFormat>,
) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let format = format
                .or_else(|| ExportFormat::from_path(path))
                .unwrap_or(ExportFormat::Json);
            ulasan_store::export(path, format, &report.reviews)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &report.reviews)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

/// Loads the ONNX model on first use, for one-off checks that usually never
/// reach it.
pub struct LazyModel {
    dir: PathBuf,
    inner: Option<ulasan_ai::OnnxReviewModel>,
}

impl LazyModel {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir, inner: None }
    }
}

impl ReviewModel for LazyModel {
    fn predict(&mut self, text: &str) -> Result<Label, ModelError> {
        let mut model = match self.inner.take() {
            Some(m) => m,
            None => ulasan_ai::OnnxReviewModel::load(&self.dir)?,
        };
        let label = model.predict(text);
        self.inner = Some(model);
        label
    }

    fn name(&self) -> &str {
        self.inner.as_ref().map_or("onnx (not loaded)", |m| m.name())
    }
}
