//! Review classification: cheap lexical probes first, a sequence-classification
//! model only when no probe is conclusive.

pub mod batch;
pub mod cascade;
pub mod lexicon;
pub mod model;
pub mod probes;

#[cfg(feature = "onnx")]
mod onnx_model;
#[cfg(feature = "onnx")]
pub use onnx_model::OnnxReviewModel;

pub use batch::{BatchClassifier, BatchError, BatchOptions, BatchReport, BatchSummary, SkippedReview};
pub use cascade::{Cascade, Classification, Decider, Rule};
pub use model::{ModelError, ReviewModel};
pub use probes::ProbeReport;
