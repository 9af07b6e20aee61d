use std::error::Error as StdError;
use std::io;

use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode, redirect};

use composite_smoke_core::{ProductId, SmokeError, SmokeResult};

use crate::config::ClientConfig;
use crate::paths;

/// What the service answered: any status, plus the body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub status: StatusCode,
    pub body: String,
}

impl Exchange {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Client for the product-composite endpoints.
///
/// Redirects are not followed: the docs page answers 302 and that is the
/// status we want to see.
#[derive(Debug, Clone)]
pub struct CompositeClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CompositeClient {
    pub fn new(config: ClientConfig) -> SmokeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| SmokeError::request(format!("failed to build http client: {e}")))?;

        Ok(Self { http, config })
    }

    /// `POST /product-composite` with a JSON body.
    pub async fn create_composite(&self, body: impl Into<String>) -> SmokeResult<Exchange> {
        let req = self
            .http
            .post(self.config.url(paths::PRODUCT_COMPOSITE))
            .header(CONTENT_TYPE, "application/json")
            .body(body.into());

        self.send("create_composite", req).await
    }

    /// `DELETE /product-composite/{productId}`.
    pub async fn delete_composite(&self, product_id: ProductId) -> SmokeResult<Exchange> {
        let req = self.http.delete(self.composite_url(product_id));
        self.send("delete_composite", req).await
    }

    /// `GET /product-composite/{productId}`.
    pub async fn fetch_composite(&self, product_id: ProductId) -> SmokeResult<Exchange> {
        let req = self.http.get(self.composite_url(product_id));
        self.send("fetch_composite", req).await
    }

    /// `GET /openapi/swagger-ui.html`; a healthy service redirects (302).
    pub async fn fetch_docs(&self) -> SmokeResult<Exchange> {
        let req = self.http.get(self.config.url(paths::OPENAPI_DOCS));
        self.send("fetch_docs", req).await
    }

    fn composite_url(&self, product_id: ProductId) -> String {
        self.config
            .url(&format!("{}/{}", paths::PRODUCT_COMPOSITE, product_id))
    }

    async fn send(&self, op: &'static str, req: RequestBuilder) -> SmokeResult<Exchange> {
        let resp = req.send().await.map_err(|e| self.classify(op, e, false))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.classify(op, e, true))?;

        tracing::debug!(op, status = status.as_u16(), body_len = body.len(), "response received");
        Ok(Exchange { status, body })
    }

    /// `answered` is true once a status line arrived; a dropped connection
    /// after that point is a broken body, not an unreachable service.
    fn classify(&self, op: &'static str, err: reqwest::Error, answered: bool) -> SmokeError {
        let err = if err.is_timeout() {
            SmokeError::Timeout(self.config.timeout())
        } else if err.is_connect() || (!answered && closed_before_response(&err)) {
            SmokeError::connection(error_chain(&err))
        } else {
            SmokeError::request(error_chain(&err))
        };

        tracing::warn!(op, kind = err.kind(), error = %err, "request failed");
        err
    }
}

// The peer accepted the connection and hung up without answering.
fn closed_before_response(err: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(cause) = source {
        if let Some(hyper_err) = cause.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() || hyper_err.is_canceled() {
                return true;
            }
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

// reqwest's top-level message hides the cause (e.g. "connection refused").
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
