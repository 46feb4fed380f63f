// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for transient-failure retries
//!
//! These tests validate that the retry policy in the configuration is applied
//! to real HTTP exchanges.

mod helpers;

use std::time::Duration;

use gapi_sheets::{
    Backoff, DriveError, GapiConfig, GapiConfigBuilder, RequestError, RetryPolicy,
};
use helpers::{api_for, api_with_config, file, SPREADSHEET_MIME};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

/// Test that 503, 503, 200 settles on the 200 after two retries
#[tokio::test]
async fn test_transient_statuses_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "files": [file("1", "Budget", SPREADSHEET_MIME)] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let files = api.files().await.unwrap();

    assert_eq!(files, vec!["Budget"]);
    assert_eq!(request_count(&server).await, 3);
}

/// Test that every transient status is retried
#[tokio::test]
async fn test_each_retryable_status() {
    for status in [500u16, 503, 504, 429, 408] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [] })))
            .mount(&server)
            .await;

        let api = api_for(&server);
        api.files().await.unwrap();

        assert_eq!(request_count(&server).await, 2, "status {status} should be retried");
    }
}

/// Test that a 404 is returned after a single attempt
#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such drive"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.files().await.unwrap_err();

    match err {
        DriveError::Request(RequestError::Status { status, body, .. }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "no such drive");
        }
        other => panic!("expected a 404 status error, got {other:?}"),
    }
}

/// Test that a bounded policy gives up and surfaces the last response
#[tokio::test]
async fn test_bounded_policy_exhaustion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .mount(&server)
        .await;

    let config = GapiConfigBuilder::new()
        .base_url(&server.uri())
        .retry_policy(RetryPolicy::bounded(2).with_fixed_delay(Duration::from_millis(5)))
        .build();
    let api = api_with_config(config);
    let err = api.files().await.unwrap_err();

    assert!(matches!(
        err,
        DriveError::Request(RequestError::Status { status, .. }) if status == StatusCode::SERVICE_UNAVAILABLE
    ));
    assert_eq!(request_count(&server).await, 3, "1 attempt + 2 retries");
}

/// Test that retries back off exponentially between attempts
#[tokio::test]
async fn test_exponential_backoff_timing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [] })))
        .mount(&server)
        .await;

    let config = GapiConfigBuilder::new()
        .base_url(&server.uri())
        .retry_policy(RetryPolicy::bounded(5).with_backoff(Backoff::Exponential {
            base: Duration::from_millis(20),
            max: Duration::from_secs(1),
        }))
        .build();
    let api = api_with_config(config);

    let start = std::time::Instant::now();
    api.files().await.unwrap();

    // 20 ms + 40 ms of backoff
    assert!(start.elapsed() >= Duration::from_millis(60));
}

/// Test that connection failures are retried and then surfaced
#[tokio::test]
async fn test_connection_refused_surfaces_transport_error() {
    let config = GapiConfig::minimal().with_base_url("http://127.0.0.1:1");
    let api = api_with_config(config);

    let err = api.files().await.unwrap_err();

    match err {
        DriveError::Request(RequestError::Transport(transport)) => {
            assert!(transport.is_retryable(), "connect errors are transient");
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
}

/// Serves one connection per entry of `responses`, reading the request
/// head before writing the raw response and closing the socket.
async fn serve_raw(responses: Vec<&'static str>) -> (String, tokio::task::JoinHandle<usize>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let mut served = 0;
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            served += 1;
        }
        served
    });
    (uri, handle)
}

/// Test that a connection lost while reading the body is retried
#[tokio::test]
async fn test_truncated_body_is_retried() {
    let truncated = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                     content-length: 100\r\n\r\n{\"files\":";
    let complete = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                    content-length: 12\r\nconnection: close\r\n\r\n{\"files\":[]}";
    let (uri, server) = serve_raw(vec![truncated, complete]).await;

    let config = GapiConfigBuilder::new()
        .base_url(&uri)
        .retry_policy(RetryPolicy::bounded(2).with_fixed_delay(Duration::from_millis(5)))
        .build();
    let api = api_with_config(config);

    let files = api.files().await.unwrap();

    assert!(files.is_empty());
    assert_eq!(server.await.unwrap(), 2, "truncated response + retry");
}
