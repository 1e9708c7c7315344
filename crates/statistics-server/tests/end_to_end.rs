//! Storage and statistics services wired together over real sockets.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use statistics_server::{create_router, AppState, FetchError, HttpReportSource, ReportSource};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use storage::MemoryRepository;
use tower::ServiceExt;

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_storage() -> SocketAddr {
    let state = storage_server::AppState::new(Arc::new(MemoryRepository::new()));
    spawn(storage_server::create_router(Arc::new(state))).await
}

#[tokio::test]
async fn test_report_list_graph() {
    let addr = spawn_storage().await;
    let base_url = format!("http://{}", addr);
    let client = reqwest::Client::new();

    for pressure in [101300, 101400, 101500] {
        let response = client
            .post(format!("{}/report", base_url))
            .json(&json!({
                "sensorId": "a",
                "temperature": 21.5,
                "pressure": pressure,
                "humidity": 40
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let listed: Vec<Value> = client
        .get(format!("{}/list", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 3);
    let ids: Vec<i64> = listed.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let source = HttpReportSource::new(&base_url, Duration::from_secs(5)).unwrap();
    let app = create_router(Arc::new(AppState::new(Arc::new(source))));

    let response = app
        .oneshot(Request::builder().uri("/graph/data").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let series: Value = serde_json::from_slice(&bytes).unwrap();

    let labels: Vec<i64> = series["labels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[0], 0);
    assert!(labels.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(series["pressure"], json!([1.013, 1.014, 1.015]));
}

#[tokio::test]
async fn test_empty_storage_gives_empty_series() {
    let addr = spawn_storage().await;
    let source = HttpReportSource::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

    assert!(source.fetch_reports().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_array_body() {
    let app = Router::new().route("/list", get(|| async { Json(json!({ "status": true })) }));
    let addr = spawn(app).await;
    let source = HttpReportSource::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

    assert!(matches!(
        source.fetch_reports().await,
        Err(FetchError::NotAnArray)
    ));
}

#[tokio::test]
async fn test_error_status() {
    let app = Router::new().route(
        "/list",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn(app).await;
    let source = HttpReportSource::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

    assert!(matches!(
        source.fetch_reports().await,
        Err(FetchError::Status(500))
    ));
}

#[tokio::test]
async fn test_unresponsive_storage_times_out() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let source = HttpReportSource::new(&format!("http://{}", addr), Duration::from_millis(200)).unwrap();
    assert!(matches!(
        source.fetch_reports().await,
        Err(FetchError::Timeout(200))
    ));
}

#[tokio::test]
async fn test_unreachable_storage() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpReportSource::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    assert!(matches!(
        source.fetch_reports().await,
        Err(FetchError::Transport(_))
    ));
}
