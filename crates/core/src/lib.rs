//! `composite-smoke-core` — shared building blocks for the smoke harness.
//!
//! This crate holds the product identifier and the failure taxonomy used by
//! every other crate (no IO, no HTTP).

pub mod error;
pub mod id;

pub use error::{SmokeError, SmokeResult};
pub use id::{MAX_GENERATED_PRODUCT_ID, ProductId};
