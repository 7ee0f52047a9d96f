mod display;
mod pipeline;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ulasan_ai::batch::MAX_REVIEWS;
use ulasan_ai::{BatchClassifier, BatchOptions, Cascade, OnnxReviewModel, ProbeReport};
use ulasan_store::ExportFormat;

#[derive(Parser)]
#[command(name = "ulasan", version, about = "Flag fake product reviews", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every review in a scrape job
    Classify {
        /// Scrape job JSON: {"url": ..., "reviews": [...]}
        input: PathBuf,
        /// Output file; JSON on stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Output format (json, csv, parquet); defaults to the output extension
        #[arg(long, value_parser = parse_format)]
        format: Option<ExportFormat>,
        /// Directory holding model.onnx and tokenizer.json
        #[arg(long, env = "ULASAN_MODEL_DIR", default_value = "models/review-classifier")]
        model_dir: PathBuf,
        /// Stop after this many labeled reviews
        #[arg(long, env = "ULASAN_MAX_REVIEWS", default_value_t = MAX_REVIEWS)]
        max_reviews: usize,
    },
    /// Show every probe signal and the decision for one review
    Check {
        text: String,
        /// URL of a photo attached to the review
        #[arg(long)]
        image_url: Option<String>,
        /// Directory holding model.onnx and tokenizer.json
        #[arg(long, env = "ULASAN_MODEL_DIR", default_value = "models/review-classifier")]
        model_dir: PathBuf,
    },
    /// Print the compiled-in phrase lists
    Lexicon,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: ulasan_store::StoreError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Classify {
            input,
            output,
            format,
            model_dir,
            max_reviews,
        } => {
            tracing::info!("ulasan v{}", env!("CARGO_PKG_VERSION"));

            let job = pipeline::read_job(&input)?;
            // Reject before paying for the model load.
            job.validate().context("invalid scrape job")?;

            let model = OnnxReviewModel::load(&model_dir)
                .with_context(|| format!("loading model from {}", model_dir.display()))?;
            let mut batch = BatchClassifier::new(model, BatchOptions { max_reviews });

            let (report, stats) =
                pipeline::run_classify_pipeline(&mut batch, job, output.as_deref(), format)?;

            if output.is_some() {
                display::print_batch_summary(&report, &stats);
            } else {
                tracing::info!(
                    labeled = report.reviews.len(),
                    skipped = report.skipped.len(),
                    elapsed_secs = stats.elapsed_secs,
                    "done"
                );
            }
        }
        Commands::Check {
            text,
            image_url,
            model_dir,
        } => {
            let probes = ProbeReport::inspect(&text, image_url.as_deref());
            let mut cascade = Cascade::new(pipeline::LazyModel::new(model_dir));
            let classification = cascade
                .classify(&text, image_url.as_deref())
                .context("model fallback failed")?;
            display::print_probe_card(&text, image_url.as_deref(), &probes, &classification);
        }
        Commands::Lexicon => display::print_lexicon(),
    }

    Ok(())
}
