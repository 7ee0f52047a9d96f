//! Arrow schema for labeled reviews, used by the CSV and Parquet exporters.
//!
//! Column names match the serialized [`LabeledReview`] field names so every
//! export format carries the same header.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder, UInt8Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::review::LabeledReview;

/// Schema for labeled review tables.
pub fn labeled_review_schema() -> Schema {
    Schema::new(vec![
        Field::new("User", DataType::Utf8, false),
        Field::new("Review", DataType::Utf8, false),
        Field::new("Rating", DataType::UInt8, false),
        Field::new("Category", DataType::Utf8, false),
        Field::new("Reason", DataType::Utf8, false),
        Field::new("Image URL", DataType::Utf8, true),
        Field::new("Decided By", DataType::Utf8, false),
        Field::new("Source URL", DataType::Utf8, false),
    ])
}

/// Build a single RecordBatch from labeled reviews, preserving order.
pub fn to_record_batch(reviews: &[LabeledReview]) -> Result<RecordBatch, ArrowError> {
    let n = reviews.len();
    let mut user = StringBuilder::with_capacity(n, n * 16);
    let mut review = StringBuilder::with_capacity(n, n * 64);
    let mut rating = UInt8Builder::with_capacity(n);
    let mut category = StringBuilder::with_capacity(n, n * 4);
    let mut reason = StringBuilder::with_capacity(n, n * 32);
    let mut image_url = StringBuilder::with_capacity(n, n * 64);
    let mut decided_by = StringBuilder::with_capacity(n, n * 16);
    let mut source_url = StringBuilder::with_capacity(n, n * 64);

    for r in reviews {
        user.append_value(&r.user);
        review.append_value(&r.review);
        rating.append_value(r.rating);
        category.append_value(r.category.as_str());
        reason.append_value(&r.reason);
        image_url.append_option(r.image_url.as_deref());
        decided_by.append_value(&r.decided_by);
        source_url.append_value(&r.source_url);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(user.finish()),
        Arc::new(review.finish()),
        Arc::new(rating.finish()),
        Arc::new(category.finish()),
        Arc::new(reason.finish()),
        Arc::new(image_url.finish()),
        Arc::new(decided_by.finish()),
        Arc::new(source_url.finish()),
    ];

    RecordBatch::try_new(Arc::new(labeled_review_schema()), columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{Label, RawReview};
    use arrow::array::{Array, StringArray, UInt8Array};

    fn labeled(user: &str, text: &str, label: Label, image: Option<&str>) -> LabeledReview {
        let review = RawReview {
            user: Some(user.into()),
            review: Some(text.into()),
            rating: Some(4),
            image_url: image.map(Into::into),
        }
        .into_review()
        .unwrap();
        LabeledReview::new(review, label, "emoji only", "emoji_only", "https://shop.example/p/1")
    }

    #[test]
    fn schema_has_contract_columns() {
        let schema = labeled_review_schema();
        assert_eq!(schema.fields().len(), 8);
        for name in ["User", "Review", "Rating", "Category", "Reason", "Image URL"] {
            assert!(schema.field_with_name(name).is_ok(), "missing {name}");
        }
        assert!(schema.field_with_name("Image URL").unwrap().is_nullable());
    }

    #[test]
    fn record_batch_preserves_order_and_nulls() {
        let rows = vec![
            labeled("budi", "😀😀", Label::Fake, None),
            labeled("sari", "bagus", Label::Real, Some("https://img.example/1.jpg")),
        ];
        let batch = to_record_batch(&rows).unwrap();
        assert_eq!(batch.num_rows(), 2);

        let users = batch
            .column_by_name("User")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(users.value(0), "budi");
        assert_eq!(users.value(1), "sari");

        let categories = batch
            .column_by_name("Category")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(categories.value(0), "Fake");
        assert_eq!(categories.value(1), "Real");

        let images = batch.column_by_name("Image URL").unwrap();
        assert!(images.is_null(0));
        assert!(!images.is_null(1));

        let ratings = batch
            .column_by_name("Rating")
            .unwrap()
            .as_any()
            .downcast_ref::<UInt8Array>()
            .unwrap();
        assert_eq!(ratings.value(1), 4);
    }

    #[test]
    fn record_batch_from_empty_slice() {
        let batch = to_record_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 8);
    }
}
