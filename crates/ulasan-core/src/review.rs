//! Review records exchanged with the scraper and the export/dashboard side.
//!
//! The scraper hands over [`RawReview`]s inside a [`ScrapeJob`]; only records
//! that pass [`RawReview::into_review`] reach classification. Classified
//! records leave as [`LabeledReview`], whose serialized field names are the
//! stable contract the dashboard renders.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "Real",
            Self::Fake => "Fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a raw record was rejected before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has no reviewer name")]
    MissingUser,
    #[error("record has no review text")]
    MissingText,
    #[error("malformed record: {0}")]
    Invalid(String),
}

/// Rejection of a scrape job before any work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("no target URL given")]
    MissingUrl,
}

/// A review record as emitted by the scraper. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReview {
    pub user: Option<String>,
    pub review: Option<String>,
    pub rating: Option<u8>,
    pub image_url: Option<String>,
}

/// A validated review. Immutable once scraped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub username: String,
    pub text: String,
    /// Number of filled rating stars.
    pub rating: u8,
    pub image_url: Option<String>,
}

impl RawReview {
    /// Read one scraped record. A wrong-typed field rejects only this record.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RecordError> {
        serde_json::from_value(value).map_err(|e| RecordError::Invalid(e.to_string()))
    }

    /// Validate into a [`Review`], trimming user and text.
    ///
    /// A blank image URL counts as no image.
    pub fn into_review(self) -> Result<Review, RecordError> {
        let username = non_blank(self.user).ok_or(RecordError::MissingUser)?;
        let text = non_blank(self.review).ok_or(RecordError::MissingText)?;
        Ok(Review {
            username,
            text,
            rating: self.rating.unwrap_or(0),
            image_url: non_blank(self.image_url),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Input document handed over by the scraper: the product page it visited
/// and the reviews harvested from it, in page order.
///
/// Reviews stay untyped until [`ScrapeJob::records`] so that one bad record
/// does not fail the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeJob {
    pub url: Option<String>,
    #[serde(default)]
    pub reviews: Vec<serde_json::Value>,
}

impl ScrapeJob {
    /// Reject a job without a target URL. Returns the trimmed URL.
    pub fn validate(&self) -> Result<&str, RequestError> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(RequestError::MissingUrl)
    }

    /// Each scraped review read as a [`RawReview`], in page order.
    pub fn records(self) -> impl Iterator<Item = Result<RawReview, RecordError>> {
        self.reviews.into_iter().map(RawReview::from_value)
    }
}

/// A review enriched with its classification and where it came from.
///
/// Field names and the `Real`/`Fake` vocabulary are rendered directly by the
/// dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledReview {
    #[serde(rename = "User")]
    pub user: String,
    #[serde(rename = "Review")]
    pub review: String,
    #[serde(rename = "Rating")]
    pub rating: u8,
    #[serde(rename = "Category")]
    pub category: Label,
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "Image URL")]
    pub image_url: Option<String>,
    /// Key of the cascade rule or model that produced the label.
    #[serde(rename = "Decided By")]
    pub decided_by: String,
    #[serde(rename = "Source URL")]
    pub source_url: String,
}

impl LabeledReview {
    pub fn new(
        review: Review,
        category: Label,
        reason: impl Into<String>,
        decided_by: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            user: review.username,
            review: review.text,
            rating: review.rating,
            category,
            reason: reason.into(),
            image_url: review.image_url,
            decided_by: decided_by.into(),
            source_url: source_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(user: Option<&str>, review: Option<&str>, image: Option<&str>) -> RawReview {
        RawReview {
            user: user.map(Into::into),
            review: review.map(Into::into),
            rating: Some(5),
            image_url: image.map(Into::into),
        }
    }

    #[test]
    fn into_review_trims_fields() {
        let review = raw(Some("  budi "), Some(" barang bagus  "), None)
            .into_review()
            .unwrap();
        assert_eq!(review.username, "budi");
        assert_eq!(review.text, "barang bagus");
        assert_eq!(review.rating, 5);
        assert!(review.image_url.is_none());
    }

    #[test]
    fn into_review_rejects_missing_user() {
        let err = raw(None, Some("bagus"), None).into_review().unwrap_err();
        assert_eq!(err, RecordError::MissingUser);

        let err = raw(Some("   "), Some("bagus"), None).into_review().unwrap_err();
        assert_eq!(err, RecordError::MissingUser);
    }

    #[test]
    fn into_review_rejects_missing_text() {
        let err = raw(Some("budi"), None, None).into_review().unwrap_err();
        assert_eq!(err, RecordError::MissingText);

        let err = raw(Some("budi"), Some(""), None).into_review().unwrap_err();
        assert_eq!(err, RecordError::MissingText);
    }

    #[test]
    fn blank_image_url_is_no_image() {
        let review = raw(Some("budi"), Some("ok"), Some("  "))
            .into_review()
            .unwrap();
        assert!(review.image_url.is_none());

        let review = raw(Some("budi"), Some("ok"), Some("https://img.example/1.jpg"))
            .into_review()
            .unwrap();
        assert_eq!(
            review.image_url.as_deref(),
            Some("https://img.example/1.jpg")
        );
    }

    #[test]
    fn missing_rating_defaults_to_zero() {
        let mut r = raw(Some("budi"), Some("ok"), None);
        r.rating = None;
        assert_eq!(r.into_review().unwrap().rating, 0);
    }

    #[test]
    fn scrape_job_requires_url() {
        let job = ScrapeJob::default();
        assert_eq!(job.validate(), Err(RequestError::MissingUrl));

        let job = ScrapeJob {
            url: Some("   ".into()),
            reviews: vec![],
        };
        assert_eq!(job.validate(), Err(RequestError::MissingUrl));

        let job = ScrapeJob {
            url: Some(" https://shop.example/p/1 ".into()),
            reviews: vec![],
        };
        assert_eq!(job.validate(), Ok("https://shop.example/p/1"));
    }

    #[test]
    fn scrape_job_parses_scraper_json() {
        let json = r#"{
            "url": "https://shop.example/p/1",
            "reviews": [
                {"user": "budi", "review": "mantap", "rating": 5, "image_url": null},
                {"user": "sari", "review": null}
            ]
        }"#;
        let job: ScrapeJob = serde_json::from_str(json).unwrap();
        let records: Vec<RawReview> = job.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rating, Some(5));
        assert!(records[1].review.is_none());
    }

    #[test]
    fn wrong_typed_field_rejects_only_its_record() {
        let json = r#"{
            "url": "https://shop.example/p/1",
            "reviews": [
                {"user": "budi", "review": "mantap", "rating": 5},
                {"user": "sari", "review": "bagus", "rating": "5"},
                {"user": "dewi", "review": 42},
                {"user": "rina", "review": "lumayan", "rating": -1},
                "not a record",
                {"user": "tono", "review": "sesuai"}
            ]
        }"#;
        let job: ScrapeJob = serde_json::from_str(json).unwrap();
        let records: Vec<Result<RawReview, RecordError>> = job.records().collect();
        assert_eq!(records.len(), 6);

        assert_eq!(records[0].as_ref().unwrap().user.as_deref(), Some("budi"));
        for bad in &records[1..5] {
            assert!(matches!(bad, Err(RecordError::Invalid(_))), "{bad:?}");
        }
        assert_eq!(records[5].as_ref().unwrap().user.as_deref(), Some("tono"));
    }

    #[test]
    fn labeled_review_uses_contract_field_names() {
        let review = raw(Some("budi"), Some("ok"), None).into_review().unwrap();
        let labeled = LabeledReview::new(
            review,
            Label::Fake,
            "generic phrase only",
            "generic_phrase",
            "https://shop.example/p/1",
        );
        let value = serde_json::to_value(&labeled).unwrap();
        assert_eq!(value["User"], "budi");
        assert_eq!(value["Review"], "ok");
        assert_eq!(value["Rating"], 5);
        assert_eq!(value["Category"], "Fake");
        assert_eq!(value["Reason"], "generic phrase only");
        assert!(value["Image URL"].is_null());
        assert_eq!(value["Decided By"], "generic_phrase");
    }

    #[test]
    fn label_display_matches_vocabulary() {
        assert_eq!(Label::Real.to_string(), "Real");
        assert_eq!(Label::Fake.to_string(), "Fake");
    }
}
