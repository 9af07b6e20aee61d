use serde::{Deserialize, Deserializer, Serialize};

use composite_smoke_core::ProductId;

/// Product aggregate as accepted by `POST /product-composite` and returned by
/// `GET /product-composite/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub product_id: ProductId,
    pub name: String,
    pub weight: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<RecommendationSummary>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reviews: Vec<ReviewSummary>,
    /// Only set on documents the service returns; never sent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_addresses: Option<ServiceAddresses>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub recommendation_id: u32,
    pub author: String,
    pub rate: u32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review_id: u32,
    pub author: String,
    pub subject: String,
    pub content: String,
}

/// Which instances served each part of a composite read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceAddresses {
    #[serde(default)]
    pub cmp: String,
    #[serde(default)]
    pub pro: String,
    #[serde(default)]
    pub rev: String,
    #[serde(default)]
    pub rec: String,
}

// The service writes `null` rather than `[]` when a product has no children.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
