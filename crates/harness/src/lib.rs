//! Smoke harness for the product-composite API.
//!
//! Layout:
//! - `config.rs`: environment-backed run configuration
//! - `check.rs`: the individual checks and their accepted status codes
//! - `report.rs`: human-readable report + run summary
//! - `runner.rs`: the ordered create / delete / docs flow

pub mod check;
pub mod config;
pub mod report;
pub mod runner;

pub use check::{CheckKind, CheckResult, Expectation};
pub use config::{SmokeConfig, SmokeEnv};
pub use report::{Reporter, RunSummary};
pub use runner::SmokeRunner;

/// Process exit status when the harness could not run at all.
pub const EXIT_HARNESS_ERROR: u8 = 2;
