//! HTTP client wrapper for the product-composite service.
//!
//! One method per endpoint the smoke run touches. Every method hands back the
//! raw status and body; deciding whether that status is acceptable is the
//! caller's job.

pub mod client;
pub mod config;

pub use client::{CompositeClient, Exchange};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use reqwest::StatusCode;

/// Paths of the endpoints under the configured base URL.
pub mod paths {
    pub const PRODUCT_COMPOSITE: &str = "/product-composite";
    pub const OPENAPI_DOCS: &str = "/openapi/swagger-ui.html";
}
