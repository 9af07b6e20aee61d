//! Product composite document model and the request payload builder.
//!
//! Pure data: this crate knows the JSON shape the composite service accepts
//! and returns, nothing about HTTP.

pub mod builder;
pub mod composite;

pub use builder::{SUMMARY_COUNT, build_product, build_request_body, extract_product_id};
pub use composite::{ProductAggregate, RecommendationSummary, ReviewSummary, ServiceAddresses};
