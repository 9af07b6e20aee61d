//! Human-readable report and run summary.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use composite_smoke_core::SmokeError;

use crate::check::{CheckKind, CheckResult};

/// Writes the report for one run and collects the results.
pub struct Reporter<W: Write> {
    out: W,
    run_id: Uuid,
    started_at: DateTime<Utc>,
    results: Vec<CheckResult>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, run_id: Uuid) -> Self {
        Self {
            out,
            run_id,
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    /// Announce the next check. Headings after the first are set off by a blank line.
    pub fn begin(&mut self, kind: CheckKind) -> io::Result<()> {
        if !self.results.is_empty() {
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}", kind.heading())
    }

    /// Echo the request payload (create only).
    pub fn request_body(&mut self, body: &str) -> io::Result<()> {
        writeln!(self.out, "{body}")?;
        writeln!(self.out)
    }

    /// Print the pass/fail line and response body, then keep the result.
    pub fn record(&mut self, result: CheckResult) -> io::Result<()> {
        let kind = result.kind;
        match &result.failure {
            None => {
                writeln!(self.out, "{}", kind.success_line())?;
                tracing::info!(check = kind.name(), status = ?result.status().map(|s| s.as_u16()), "check passed");
            }
            Some(err) => {
                writeln!(self.out, "{}", failure_line(kind, err))?;
                tracing::warn!(check = kind.name(), kind = err.kind(), error = %err, "check failed");
            }
        }

        if let Some(exchange) = &result.exchange {
            writeln!(self.out, "{}", exchange.body)?;
        }

        self.results.push(result);
        Ok(())
    }

    /// Print the summary and hand back the collected results.
    pub fn finish(mut self) -> io::Result<RunSummary> {
        let summary = RunSummary {
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            results: self.results,
        };

        writeln!(self.out)?;
        let failures = summary.failures().count();
        if failures == 0 {
            writeln!(self.out, "All {} checks passed", summary.results.len())?;
        } else {
            writeln!(self.out, "{} of {} checks failed", failures, summary.results.len())?;
            for result in summary.failures() {
                if let Some(err) = &result.failure {
                    writeln!(self.out, "  - {}: {}", result.kind.name(), err)?;
                }
            }
        }
        self.out.flush()?;

        Ok(summary)
    }
}

fn failure_line(kind: CheckKind, err: &SmokeError) -> String {
    match err {
        SmokeError::UnexpectedStatus { actual, .. } => {
            format!("{}: Response Code -> {}", kind.failure_prefix(), actual)
        }
        other => format!("{}: {}", kind.failure_prefix(), other),
    }
}

/// Results of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<CheckResult>,
}

impl RunSummary {
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn result(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.kind == kind)
    }

    /// 0 when every check passed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }
}
