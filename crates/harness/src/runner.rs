//! The smoke flow: create, (read back), delete, (delete again), docs.
//!
//! Steps run strictly in order and every step runs even if an earlier one
//! failed. Only the request body carries over: the delete id is read back
//! out of it.

use std::io::{self, Write};

use tracing::Instrument;
use uuid::Uuid;

use composite_smoke_client::{CompositeClient, Exchange};
use composite_smoke_core::{ProductId, SmokeError, SmokeResult};
use composite_smoke_products::{ProductAggregate, build_request_body, extract_product_id};

use crate::check::{CheckKind, CheckResult};
use crate::config::SmokeConfig;
use crate::report::{Reporter, RunSummary};

pub struct SmokeRunner {
    client: CompositeClient,
    config: SmokeConfig,
}

impl SmokeRunner {
    pub fn new(config: SmokeConfig) -> SmokeResult<Self> {
        let client = CompositeClient::new(config.client.clone())?;
        Ok(Self { client, config })
    }

    /// Run every configured check, writing the report to `out`.
    ///
    /// Check failures end up in the summary; only a failure to write the
    /// report is returned as an error.
    pub async fn run<W: Write>(&self, out: W) -> io::Result<RunSummary> {
        let run_id = Uuid::now_v7();
        let span = tracing::info_span!(
            "smoke_run",
            %run_id,
            base_url = self.config.client.base_url(),
        );

        async move {
            let product_id = self.config.product_id.unwrap_or_else(ProductId::random);
            tracing::info!(%product_id, "starting smoke run");

            let mut reporter = Reporter::new(out, run_id);
            self.run_checks(&mut reporter, product_id).await?;
            let summary = reporter.finish()?;

            let elapsed = summary.finished_at - summary.started_at;
            tracing::info!(
                checks = summary.results.len(),
                failures = summary.failures().count(),
                elapsed_ms = elapsed.num_milliseconds(),
                "smoke run finished"
            );
            Ok::<_, io::Error>(summary)
        }
        .instrument(span)
        .await
    }

    async fn run_checks<W: Write>(
        &self,
        reporter: &mut Reporter<W>,
        product_id: ProductId,
    ) -> io::Result<()> {
        let body = build_request_body(product_id);

        reporter.begin(CheckKind::Create)?;
        reporter.request_body(&body)?;
        let created = self.client.create_composite(body.as_str()).await;
        reporter.record(CheckResult::evaluate(CheckKind::Create, created))?;

        let delete_id = extract_product_id(&body);

        if self.config.verify_read {
            reporter.begin(CheckKind::ReadBack)?;
            let result = match &delete_id {
                Ok(id) => {
                    let id = *id;
                    CheckResult::evaluate(CheckKind::ReadBack, self.client.fetch_composite(id).await)
                        .and_verify(|exchange| verify_read_back(exchange, id))
                }
                Err(err) => CheckResult::failed(CheckKind::ReadBack, err.clone()),
            };
            reporter.record(result)?;
        }

        reporter.begin(CheckKind::Delete)?;
        let result = match &delete_id {
            Ok(id) => CheckResult::evaluate(CheckKind::Delete, self.client.delete_composite(*id).await),
            Err(err) => CheckResult::failed(CheckKind::Delete, err.clone()),
        };
        reporter.record(result)?;

        if self.config.repeat_delete {
            reporter.begin(CheckKind::RepeatDelete)?;
            let result = match &delete_id {
                Ok(id) => CheckResult::evaluate(
                    CheckKind::RepeatDelete,
                    self.client.delete_composite(*id).await,
                ),
                Err(err) => CheckResult::failed(CheckKind::RepeatDelete, err.clone()),
            };
            reporter.record(result)?;
        }

        reporter.begin(CheckKind::Docs)?;
        let docs = self.client.fetch_docs().await;
        reporter.record(CheckResult::evaluate(CheckKind::Docs, docs))?;

        Ok(())
    }
}

/// The read endpoint must return the aggregate we just created.
fn verify_read_back(exchange: &Exchange, expected: ProductId) -> SmokeResult<()> {
    let aggregate: ProductAggregate = serde_json::from_str(&exchange.body)
        .map_err(|e| SmokeError::malformed(format!("not a product aggregate: {e}")))?;

    if aggregate.product_id != expected {
        return Err(SmokeError::malformed(format!(
            "productId {} does not match created product {}",
            aggregate.product_id, expected
        )));
    }
    Ok(())
}
