//! Request payload builder.
//!
//! `name` and `weight` are derived from the seed; children are always the same
//! three recommendations and three reviews.

use composite_smoke_core::{ProductId, SmokeError, SmokeResult};

use crate::composite::{ProductAggregate, RecommendationSummary, ReviewSummary};

/// Number of recommendations and of reviews attached to every built product.
pub const SUMMARY_COUNT: u32 = 3;

/// Build the product aggregate for seed `id`.
pub fn build_product(id: ProductId) -> ProductAggregate {
    let n = id.get();

    let recommendations = (1..=SUMMARY_COUNT)
        .map(|i| RecommendationSummary {
            recommendation_id: i,
            author: format!("author {i}"),
            rate: i,
            content: format!("content {i}"),
        })
        .collect();

    let reviews = (1..=SUMMARY_COUNT)
        .map(|i| ReviewSummary {
            review_id: i,
            author: format!("author {i}"),
            subject: format!("subject {i}"),
            content: format!("content {i}"),
        })
        .collect();

    ProductAggregate {
        product_id: id,
        name: format!("product {n}"),
        weight: n,
        recommendations,
        reviews,
        service_addresses: None,
    }
}

/// Serialized JSON body for `POST /product-composite`.
pub fn build_request_body(id: ProductId) -> String {
    serde_json::to_string(&build_product(id))
        .expect("product aggregate holds only strings and integers, serialization cannot fail")
}

/// Read `productId` back out of a serialized product document.
pub fn extract_product_id(body: &str) -> SmokeResult<ProductId> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct IdOnly {
        product_id: ProductId,
    }

    serde_json::from_str::<IdOnly>(body)
        .map(|doc| doc.product_id)
        .map_err(|e| SmokeError::malformed(format!("no productId in payload: {e}")))
}
