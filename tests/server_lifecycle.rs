//! End-to-end tests over a real socket.

use std::sync::Arc;
use std::time::Duration;

use autos_api::config::{Environment, ServerConfig};
use autos_api::db::{ConnectOutcome, DatabaseManager, MongoConnector};
use autos_api::resilience::RetryPolicy;
use autos_api::{HttpServer, Shutdown};
use reqwest::StatusCode;

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_serves_while_database_is_unreachable() {
    let config = Arc::new(common::config(Environment::Development));
    let database = Arc::new(DatabaseManager::new(
        MongoConnector::new(ServerConfig::default().database),
        RetryPolicy::unbounded(Duration::from_millis(20)),
    ));
    let shutdown = Shutdown::new();
    let campaign = database.spawn(shutdown.subscribe());

    let server = HttpServer::new(config, database.clone(), common::probe_groups());
    let (addr, server_task) = common::start_server(server, &shutdown).await;
    let client = client();

    let response = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.text().await.unwrap(), "API Autos funcionando");

    let response = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/api/licencias"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-methods"], "GET,PUT,POST,DELETE");
    assert!(response.bytes().await.unwrap().is_empty());

    // Give the campaign time for a few failed attempts.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let response = client.get(format!("http://{addr}/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["database"], "failed");
    assert!(body["attempts"].as_u64().unwrap() >= 2);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(campaign.await.unwrap(), ConnectOutcome::Cancelled);
}

#[tokio::test]
async fn test_error_envelope_over_the_wire() {
    let server = HttpServer::new(
        Arc::new(common::config(Environment::Production)),
        common::idle_database(),
        common::probe_groups(),
    );
    assert!(server.config().environment.is_production());

    let shutdown = Shutdown::new();
    let (addr, server_task) = common::start_server(server, &shutdown).await;

    let response = client().get(format!("http://{addr}/api/boom")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "error": "Error interno del servidor", "message": "Algo salió mal" })
    );

    shutdown.trigger();
    server_task.await.unwrap();
}
