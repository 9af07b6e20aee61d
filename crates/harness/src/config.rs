//! Environment-backed run configuration.
//!
//! Every variable is optional; with none set the run targets
//! `http://localhost:8080` with a 10 second request timeout and a random
//! product id. Empty or unparsable values are rejected rather than ignored.

use std::env::{self, VarError};
use std::time::Duration;

use composite_smoke_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use composite_smoke_core::{ProductId, SmokeError, SmokeResult};

/// Environment keys read by [`SmokeConfig::from_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeEnv {
    BaseUrl,
    TimeoutSeconds,
    ProductId,
    VerifyRead,
    RepeatDelete,
}

impl SmokeEnv {
    pub const ALL: [SmokeEnv; 5] = [
        SmokeEnv::BaseUrl,
        SmokeEnv::TimeoutSeconds,
        SmokeEnv::ProductId,
        SmokeEnv::VerifyRead,
        SmokeEnv::RepeatDelete,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SmokeEnv::BaseUrl => "COMPOSITE_SMOKE_BASE_URL",
            SmokeEnv::TimeoutSeconds => "COMPOSITE_SMOKE_TIMEOUT_SECS",
            SmokeEnv::ProductId => "COMPOSITE_SMOKE_PRODUCT_ID",
            SmokeEnv::VerifyRead => "COMPOSITE_SMOKE_VERIFY_READ",
            SmokeEnv::RepeatDelete => "COMPOSITE_SMOKE_REPEAT_DELETE",
        }
    }
}

/// Everything a run needs besides the output sink.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SmokeConfig {
    pub client: ClientConfig,
    /// Pinned id; `None` draws a random one per run.
    pub product_id: Option<ProductId>,
    /// GET the product back between create and delete.
    pub verify_read: bool,
    /// DELETE a second time and accept 200 or 404.
    pub repeat_delete: bool,
}

impl SmokeConfig {
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client,
            ..Self::default()
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> SmokeResult<Self> {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(SmokeError::invalid_config(format!(
                "{key} is not valid UTF-8"
            ))),
        })
    }

    /// Load through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> SmokeResult<Self>
    where
        F: Fn(&str) -> SmokeResult<Option<String>>,
    {
        let read = |key: SmokeEnv| -> SmokeResult<Option<String>> {
            match lookup(key.as_str())? {
                Some(value) if value.trim().is_empty() => Err(SmokeError::invalid_config(format!(
                    "{} is set but empty",
                    key.as_str()
                ))),
                other => Ok(other),
            }
        };

        let base_url = read(SmokeEnv::BaseUrl)?;
        let timeout = match read(SmokeEnv::TimeoutSeconds)? {
            Some(raw) => parse_timeout_secs(SmokeEnv::TimeoutSeconds, &raw)?,
            None => DEFAULT_TIMEOUT,
        };
        let client = ClientConfig::new(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL), timeout)?;

        let product_id = read(SmokeEnv::ProductId)?
            .map(|raw| raw.parse::<ProductId>())
            .transpose()?;

        let verify_read = match read(SmokeEnv::VerifyRead)? {
            Some(raw) => parse_flag(SmokeEnv::VerifyRead, &raw)?,
            None => false,
        };
        let repeat_delete = match read(SmokeEnv::RepeatDelete)? {
            Some(raw) => parse_flag(SmokeEnv::RepeatDelete, &raw)?,
            None => false,
        };

        Ok(Self {
            client,
            product_id,
            verify_read,
            repeat_delete,
        })
    }
}

fn parse_timeout_secs(key: SmokeEnv, raw: &str) -> SmokeResult<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        SmokeError::invalid_config(format!(
            "{} must be a positive integer number of seconds",
            key.as_str()
        ))
    })?;
    if secs == 0 {
        return Err(SmokeError::invalid_config(format!(
            "{} must be greater than zero",
            key.as_str()
        )));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_flag(key: SmokeEnv, raw: &str) -> SmokeResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SmokeError::invalid_config(format!(
            "{} must be one of true, false, 1, 0",
            key.as_str()
        ))),
    }
}
