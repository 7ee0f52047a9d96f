pub mod review;
pub mod schema;

pub use review::{
    Label, LabeledReview, RawReview, RecordError, RequestError, Review, ScrapeJob,
};
pub use schema::{labeled_review_schema, to_record_batch};
