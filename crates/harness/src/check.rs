//! Checks: one HTTP call, the statuses it may answer with, and what happened.

use composite_smoke_client::{Exchange, StatusCode};
use composite_smoke_core::{SmokeError, SmokeResult};

/// The checks a run can perform, in the order the runner performs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Create,
    ReadBack,
    Delete,
    RepeatDelete,
    Docs,
}

impl CheckKind {
    /// Stable name used in logs and the summary.
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Create => "create",
            CheckKind::ReadBack => "read_back",
            CheckKind::Delete => "delete",
            CheckKind::RepeatDelete => "repeat_delete",
            CheckKind::Docs => "docs",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            CheckKind::Create => "Create Product Composite",
            CheckKind::ReadBack => "Reading back the created product",
            CheckKind::Delete => "Deleting the previous product",
            CheckKind::RepeatDelete => "Deleting the product again",
            CheckKind::Docs => "Open API documentation page",
        }
    }

    pub fn success_line(self) -> &'static str {
        match self {
            CheckKind::Create => "Post Successful",
            CheckKind::ReadBack => "Read Successful",
            CheckKind::Delete => "Delete Successful",
            CheckKind::RepeatDelete => "Repeat Delete Accepted",
            CheckKind::Docs => "API documentation page opened successfully",
        }
    }

    pub fn failure_prefix(self) -> &'static str {
        match self {
            CheckKind::Create => "Post not successful",
            CheckKind::ReadBack => "Read not successful",
            CheckKind::Delete => "Delete not successful",
            CheckKind::RepeatDelete => "Repeat Delete not accepted",
            CheckKind::Docs => "Error opening documentation page",
        }
    }

    pub fn expectation(self) -> Expectation {
        match self {
            CheckKind::Create | CheckKind::ReadBack | CheckKind::Delete => {
                Expectation::status(StatusCode::OK)
            }
            // The resource is already gone; 404 is as good as 200 here.
            CheckKind::RepeatDelete => Expectation {
                accepted: vec![StatusCode::OK, StatusCode::NOT_FOUND],
            },
            CheckKind::Docs => Expectation::status(StatusCode::FOUND),
        }
    }
}

/// Non-empty set of accepted status codes.
///
/// Built only through [`Expectation::status`] and the [`CheckKind::expectation`]
/// table, so the set can never be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    accepted: Vec<StatusCode>,
}

impl Expectation {
    pub fn status(code: StatusCode) -> Self {
        Self {
            accepted: vec![code],
        }
    }

    pub fn accepts(&self, status: StatusCode) -> bool {
        self.accepted.contains(&status)
    }

    pub fn verify(&self, exchange: &Exchange) -> SmokeResult<()> {
        if self.accepts(exchange.status) {
            return Ok(());
        }
        Err(SmokeError::UnexpectedStatus {
            expected: self.to_string(),
            actual: exchange.status.as_u16(),
        })
    }
}

impl core::fmt::Display for Expectation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, code) in self.accepted.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{}", code.as_u16())?;
        }
        Ok(())
    }
}

/// Outcome of a single check.
///
/// `exchange` is present whenever the service answered, even on failure, so
/// the report can still show the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub exchange: Option<Exchange>,
    pub failure: Option<SmokeError>,
}

impl CheckResult {
    /// Judge a client call against the check's expectation.
    pub fn evaluate(kind: CheckKind, outcome: SmokeResult<Exchange>) -> Self {
        match outcome {
            Ok(exchange) => {
                let failure = kind.expectation().verify(&exchange).err();
                Self {
                    kind,
                    exchange: Some(exchange),
                    failure,
                }
            }
            Err(err) => Self::failed(kind, err),
        }
    }

    /// A check that failed before (or without) any response.
    pub fn failed(kind: CheckKind, err: SmokeError) -> Self {
        Self {
            kind,
            exchange: None,
            failure: Some(err),
        }
    }

    /// Run an extra content check, only if the status check passed.
    pub fn and_verify<F>(mut self, verify: F) -> Self
    where
        F: FnOnce(&Exchange) -> SmokeResult<()>,
    {
        if self.failure.is_none() {
            if let Some(exchange) = &self.exchange {
                self.failure = verify(exchange).err();
            }
        }
        self
    }

    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.exchange.as_ref().map(|e| e.status)
    }
}
