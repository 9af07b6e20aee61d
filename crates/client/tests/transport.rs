use std::time::Duration;

use axum::{
    Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect},
    routing::{delete, get, post},
};
use composite_smoke_client::{ClientConfig, CompositeClient};
use composite_smoke_core::{ProductId, SmokeError};

struct StubServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client_for(base_url: &str, timeout: Duration) -> CompositeClient {
    CompositeClient::new(ClientConfig::new(base_url, timeout).unwrap()).unwrap()
}

/// Base URL of a port that was just released, so connecting to it is refused.
async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn echo_content_type(headers: HeaderMap, body: String) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("<none>")
        .to_string();
    (StatusCode::OK, format!("{content_type}|{body}"))
}

#[tokio::test]
async fn post_sends_json_content_type_and_body() {
    let app = Router::new().route("/product-composite", post(echo_content_type));
    let srv = StubServer::spawn(app).await;
    let client = client_for(&srv.base_url, Duration::from_secs(5));

    let exchange = client.create_composite(r#"{"productId":1}"#).await.unwrap();

    assert_eq!(exchange.status, StatusCode::OK);
    assert_eq!(exchange.body, r#"application/json|{"productId":1}"#);
}

#[tokio::test]
async fn delete_addresses_resource_by_product_id() {
    let app = Router::new().route(
        "/product-composite/:id",
        delete(|Path(id): Path<u32>| async move { format!("deleted {id}") }),
    );
    let srv = StubServer::spawn(app).await;
    let client = client_for(&srv.base_url, Duration::from_secs(5));

    let exchange = client.delete_composite(ProductId::new(321)).await.unwrap();

    assert_eq!(exchange.status, StatusCode::OK);
    assert_eq!(exchange.body, "deleted 321");
}

#[tokio::test]
async fn docs_redirect_is_reported_not_followed() {
    let app = Router::new()
        .route(
            "/openapi/swagger-ui.html",
            get(|| async { Redirect::temporary("/openapi/webjars/swagger-ui/index.html") }),
        )
        .route(
            "/openapi/webjars/swagger-ui/index.html",
            get(|| async { "followed" }),
        );
    let srv = StubServer::spawn(app).await;
    let client = client_for(&srv.base_url, Duration::from_secs(5));

    let exchange = client.fetch_docs().await.unwrap();

    // axum's temporary redirect is 307; the point is we observe it at all.
    assert!(exchange.status.is_redirection(), "got {}", exchange.status);
    assert_ne!(exchange.body, "followed");
}

#[tokio::test]
async fn non_success_status_is_still_an_exchange() {
    let app = Router::new().route(
        "/product-composite/:id",
        get(|| async { (StatusCode::NOT_FOUND, "no product") }),
    );
    let srv = StubServer::spawn(app).await;
    let client = client_for(&srv.base_url, Duration::from_secs(5));

    let exchange = client.fetch_composite(ProductId::new(9)).await.unwrap();

    assert_eq!(exchange.status, StatusCode::NOT_FOUND);
    assert_eq!(exchange.body, "no product");
}

#[tokio::test]
async fn unreachable_service_is_a_connection_error() {
    let client = client_for(&closed_port_url().await, Duration::from_secs(5));

    let err = client.create_composite("{}").await.unwrap_err();

    assert!(matches!(err, SmokeError::Connection(_)), "got {err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn service_hanging_up_before_answering_is_a_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let acceptor = tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            drop(socket);
        }
    });
    let client = client_for(&base_url, Duration::from_secs(5));

    let err = client.create_composite("{}").await.unwrap_err();
    acceptor.abort();

    assert!(matches!(err, SmokeError::Connection(_)), "got {err:?}");
    assert_eq!(err.kind(), "connection_error");
}

#[tokio::test]
async fn slow_service_is_a_timeout() {
    let app = Router::new().route(
        "/openapi/swagger-ui.html",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::FOUND
        }),
    );
    let srv = StubServer::spawn(app).await;
    let timeout = Duration::from_millis(200);
    let client = client_for(&srv.base_url, timeout);

    let err = client.fetch_docs().await.unwrap_err();

    assert_eq!(err, SmokeError::Timeout(timeout));
}
