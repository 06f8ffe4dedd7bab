//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use autos_api::config::{Environment, ServerConfig};
use autos_api::db::{DatabaseManager, MongoConnector};
use autos_api::http::{AppError, AppState, HttpServer};
use autos_api::resilience::RetryPolicy;
use autos_api::routing::RouteGroups;
use autos_api::Shutdown;
use axum::body::{Body, Bytes};
use axum::extract::Path;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::{any, get};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Default configuration in the given deployment mode.
pub fn config(environment: Environment) -> ServerConfig {
    ServerConfig {
        environment,
        ..ServerConfig::default()
    }
}

/// A manager with no connection string. It never connects unless a test
/// runs its campaign.
pub fn idle_database() -> Arc<DatabaseManager> {
    Arc::new(DatabaseManager::new(
        MongoConnector::new(ServerConfig::default().database),
        RetryPolicy::default(),
    ))
}

/// Route groups that answer with their own name, plus failing routes.
pub fn probe_groups() -> RouteGroups {
    let users: Router<AppState> = Router::new()
        .route("/boom", get(|| async { Err::<&str, _>(AppError::Internal("disk quota exceeded".into())) }))
        .route("/panic", get(panicking))
        .route("/{segment}", any(|Path(segment): Path<String>| async move { format!("users:{segment}") }))
        .route("/usuarios/{id}", any(|Path(id): Path<String>| async move { format!("users:usuarios/{id}") }));

    let licenses: Router<AppState> = Router::new()
        .route("/", any(|| async { "licenses" }))
        .route("/{id}", any(|Path(id): Path<String>| async move { format!("licenses:{id}") }));

    RouteGroups::new(users, licenses)
}

async fn panicking() -> &'static str {
    panic!("license cache corrupted")
}

/// Fully layered in-process router.
#[allow(dead_code)]
pub fn app(groups: RouteGroups, environment: Environment) -> Router {
    HttpServer::new(Arc::new(config(environment)), idle_database(), groups).router()
}

/// Drive one request through `router`.
#[allow(dead_code)]
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body)
}

#[allow(dead_code)]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Bind a real listener on an ephemeral port and serve `server` on it.
#[allow(dead_code)]
pub async fn start_server(server: HttpServer, shutdown: &Shutdown) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        server.run(listener, server_shutdown).await.unwrap();
    });

    (addr, handle)
}
