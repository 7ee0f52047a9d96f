//! Heuristic cascade: fixed-order rules that short-circuit before the model.
//!
//! Rules are evaluated in [`Rule::CASCADE`] order and the first one that fires
//! decides. Only when none fires is the [`ReviewModel`] consulted. The order
//! is part of the contract: an emoji-only review is Fake however long it is,
//! and a short informative sentence never reaches the word-count or photo
//! rules.

use std::fmt;

use tracing::debug;
use ulasan_core::Label;

use crate::model::{ModelError, ReviewModel};
use crate::probes::{
    is_emoji_only, is_generic_phrase, length_informativeness, looks_natural, word_count,
};

/// Reviews with more words than this are considered genuine.
pub const LONG_REVIEW_WORDS: usize = 10;

/// A conclusive heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    EmojiOnly,
    Informative,
    LongReview,
    PhotoEvidence,
    NaturalPhrasing,
    GenericPhrase,
}

impl Rule {
    /// Evaluation order.
    pub const CASCADE: [Rule; 6] = [
        Rule::EmojiOnly,
        Rule::Informative,
        Rule::LongReview,
        Rule::PhotoEvidence,
        Rule::NaturalPhrasing,
        Rule::GenericPhrase,
    ];

    /// Whether this rule is conclusive for a trimmed review.
    pub fn fires(self, text: &str, image_url: Option<&str>) -> bool {
        match self {
            Self::EmojiOnly => is_emoji_only(text),
            Self::Informative => length_informativeness(text),
            Self::LongReview => word_count(text) > LONG_REVIEW_WORDS,
            Self::PhotoEvidence => image_url.is_some_and(|u| !u.trim().is_empty()),
            Self::NaturalPhrasing => looks_natural(text),
            Self::GenericPhrase => is_generic_phrase(text),
        }
    }

    pub fn label(self) -> Label {
        match self {
            Self::EmojiOnly | Self::GenericPhrase => Label::Fake,
            Self::Informative | Self::LongReview | Self::PhotoEvidence | Self::NaturalPhrasing => {
                Label::Real
            }
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::EmojiOnly => "emoji only",
            Self::Informative => "long and informative sentences",
            Self::LongReview => "review length exceeds 10 words",
            Self::PhotoEvidence => "contains photographic evidence",
            Self::NaturalPhrasing => "contains natural phrasing with appropriate punctuation",
            Self::GenericPhrase => "generic phrase only",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmojiOnly => "emoji_only",
            Self::Informative => "informative",
            Self::LongReview => "long_review",
            Self::PhotoEvidence => "photo_evidence",
            Self::NaturalPhrasing => "natural_phrasing",
            Self::GenericPhrase => "generic_phrase",
        }
    }
}

/// First rule in cascade order that fires, if any.
pub fn first_conclusive_rule(text: &str, image_url: Option<&str>) -> Option<Rule> {
    Rule::CASCADE
        .into_iter()
        .find(|rule| rule.fires(text, image_url))
}

/// Which stage produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decider {
    Rule(Rule),
    Model,
}

impl Decider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rule(rule) => rule.as_str(),
            Self::Model => "model",
        }
    }
}

impl fmt::Display for Decider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for one review. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: Label,
    /// Human-readable justification naming the rule or the model.
    pub reason: String,
    pub decided_by: Decider,
}

impl Classification {
    fn from_rule(rule: Rule) -> Self {
        Self {
            label: rule.label(),
            reason: rule.reason().to_string(),
            decided_by: Decider::Rule(rule),
        }
    }

    fn from_model(label: Label) -> Self {
        let reason = match label {
            Label::Real => "model prediction: Real",
            Label::Fake => "model prediction: Fake",
        };
        Self {
            label,
            reason: reason.to_string(),
            decided_by: Decider::Model,
        }
    }
}

/// The full decision pipeline around an injected fallback model.
pub struct Cascade<M> {
    model: M,
}

impl<M: ReviewModel> Cascade<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Classify one review. Model errors propagate unchanged.
    pub fn classify(
        &mut self,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<Classification, ModelError> {
        let text = text.trim();
        if let Some(rule) = first_conclusive_rule(text, image_url) {
            debug!(rule = rule.as_str(), "cascade rule fired");
            return Ok(Classification::from_rule(rule));
        }

        let label = self.model.predict(text)?;
        debug!(model = self.model.name(), %label, "model decided");
        Ok(Classification::from_model(label))
    }

    pub fn into_model(self) -> M {
        self.model
    }
}
