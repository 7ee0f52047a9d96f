//! Fallback model capability: text in, label out.

use thiserror::Error;
use ulasan_core::Label;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to load model: {0}")]
    Load(String),

    #[error("failed to tokenize review: {0}")]
    Tokenize(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("unexpected model output: {0}")]
    UnexpectedOutput(String),
}

impl ModelError {
    /// Whether the error disables the model for every later review.
    ///
    /// Only tokenization is specific to one review text.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Tokenize(_))
    }
}

/// A binary sequence classifier used when no cascade rule is conclusive.
pub trait ReviewModel {
    /// Predict the label of one (trimmed) review.
    fn predict(&mut self, text: &str) -> Result<Label, ModelError>;

    /// Model name for logs.
    fn name(&self) -> &str;
}

impl<M: ReviewModel + ?Sized> ReviewModel for &mut M {
    fn predict(&mut self, text: &str) -> Result<Label, ModelError> {
        (**self).predict(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: ReviewModel + ?Sized> ReviewModel for Box<M> {
    fn predict(&mut self, text: &str) -> Result<Label, ModelError> {
        (**self).predict(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Map an output class index to its label: 0 is Fake, 1 is Real.
pub fn label_for_class(index: usize) -> Result<Label, ModelError> {
    match index {
        0 => Ok(Label::Fake),
        1 => Ok(Label::Real),
        other => Err(ModelError::UnexpectedOutput(format!(
            "class index {other} outside the binary label space"
        ))),
    }
}

/// Index of the largest logit. Ties resolve to the lowest index.
pub fn argmax(logits: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in logits.iter().enumerate() {
        if v.is_nan() {
            return None;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Label from a pair of logits `[fake, real]`.
pub fn label_from_logits(logits: &[f32]) -> Result<Label, ModelError> {
    if logits.len() != 2 {
        return Err(ModelError::UnexpectedOutput(format!(
            "expected 2 logits, got {}",
            logits.len()
        )));
    }
    let index = argmax(logits)
        .ok_or_else(|| ModelError::UnexpectedOutput(format!("non-finite logits {logits:?}")))?;
    label_for_class(index)
}
