//! Batch driver: classify scraped reviews in page order.
//!
//! Malformed records and review-specific model failures are logged and
//! skipped so one bad item never loses the rest of the batch. A model that
//! cannot run at all aborts the batch: there is no heuristics-only mode.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{info, warn};
use ulasan_core::{Label, LabeledReview, RawReview, RecordError, RequestError, ScrapeJob};

use crate::cascade::Cascade;
use crate::model::{ModelError, ReviewModel};

/// Upper bound on labeled reviews per scrape.
pub const MAX_REVIEWS: usize = 300;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid scrape request: {0}")]
    Request(#[from] RequestError),

    /// `partial` holds everything labeled before review `index`.
    #[error("model failed on review {index}: {source}")]
    Model {
        index: usize,
        #[source]
        source: ModelError,
        partial: Box<BatchReport>,
    },
}

impl BatchError {
    /// Reviews labeled before the batch aborted, if it got that far.
    pub fn partial(&self) -> Option<&BatchReport> {
        match self {
            Self::Model { partial, .. } => Some(partial.as_ref()),
            Self::Request(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Stop once this many reviews are labeled.
    pub max_reviews: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_reviews: MAX_REVIEWS,
        }
    }
}

/// A raw record that did not make it into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedReview {
    /// Position in the scraped sequence.
    pub index: usize,
    pub reason: String,
}

/// Labeled reviews in encounter order plus what was skipped.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub source_url: String,
    pub reviews: Vec<LabeledReview>,
    pub skipped: Vec<SkippedReview>,
}

/// Counts over a [`BatchReport`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub labeled: usize,
    pub real: usize,
    pub fake: usize,
    pub skipped: usize,
    /// Decider key → number of reviews it decided.
    pub by_decider: BTreeMap<String, usize>,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            labeled: self.reviews.len(),
            skipped: self.skipped.len(),
            ..Default::default()
        };
        for review in &self.reviews {
            match review.category {
                Label::Real => summary.real += 1,
                Label::Fake => summary.fake += 1,
            }
            *summary
                .by_decider
                .entry(review.decided_by.clone())
                .or_default() += 1;
        }
        summary
    }
}

/// Applies the cascade to each scraped review.
pub struct BatchClassifier<M> {
    cascade: Cascade<M>,
    options: BatchOptions,
}

impl<M: ReviewModel> BatchClassifier<M> {
    pub fn new(model: M, options: BatchOptions) -> Self {
        Self {
            cascade: Cascade::new(model),
            options,
        }
    }

    pub fn cascade_mut(&mut self) -> &mut Cascade<M> {
        &mut self.cascade
    }

    /// Validate a scrape job and classify its reviews.
    ///
    /// A job without a target URL is rejected before any review is looked at.
    pub fn run_job(&mut self, job: ScrapeJob) -> Result<BatchReport, BatchError> {
        let url = job.validate()?.to_string();
        self.run_records(&url, job.records())
    }

    /// Classify raw reviews from `source_url` in encounter order.
    pub fn run(
        &mut self,
        source_url: &str,
        raw_reviews: impl IntoIterator<Item = RawReview>,
    ) -> Result<BatchReport, BatchError> {
        self.run_records(source_url, raw_reviews.into_iter().map(Ok))
    }

    /// Like [`run`](Self::run), for records that may have failed to parse.
    /// Unreadable records are skipped at their position.
    pub fn run_records(
        &mut self,
        source_url: &str,
        records: impl IntoIterator<Item = Result<RawReview, RecordError>>,
    ) -> Result<BatchReport, BatchError> {
        let mut report = BatchReport {
            source_url: source_url.to_string(),
            ..Default::default()
        };

        for (index, record) in records.into_iter().enumerate() {
            if report.reviews.len() >= self.options.max_reviews {
                info!(max = self.options.max_reviews, "review cap reached");
                break;
            }

            let review = match record.and_then(RawReview::into_review) {
                Ok(r) => r,
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed review");
                    report.skipped.push(SkippedReview {
                        index,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let classification = match self
                .cascade
                .classify(&review.text, review.image_url.as_deref())
            {
                Ok(c) => c,
                Err(e) if !e.is_fatal() => {
                    warn!(index, error = %e, "skipping review the model could not read");
                    report.skipped.push(SkippedReview {
                        index,
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(source) => {
                    warn!(
                        index,
                        labeled = report.reviews.len(),
                        error = %source,
                        "model failed, aborting batch"
                    );
                    return Err(BatchError::Model {
                        index,
                        source,
                        partial: Box::new(report),
                    });
                }
            };

            report.reviews.push(LabeledReview::new(
                review,
                classification.label,
                classification.reason,
                classification.decided_by.as_str(),
                source_url,
            ));
        }

        let summary = report.summary();
        info!(
            source = %source_url,
            labeled = summary.labeled,
            real = summary.real,
            fake = summary.fake,
            skipped = summary.skipped,
            "batch classified"
        );
        Ok(report)
    }
}
