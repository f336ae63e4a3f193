use std::fs;
use std::time::{Duration, Instant};

use gmh_cli::batch::run_batch;
use gmh_cli::client::GmhClient;
use gmh_cli::config::{AuthConfig, GmhConfig};
use httpmock::prelude::*;
use tempfile::TempDir;

fn client_for(server: &MockServer) -> GmhClient {
    let cfg = GmhConfig {
        url: server.base_url(),
        auth: AuthConfig::None,
    };
    GmhClient::new(&cfg).unwrap()
}

fn write_csv(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("records.csv");
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_batch_issues_one_create_per_row() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/nbn");
        then.status(201);
    });

    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "NBN,LOCATION\n\
         urn:nbn:nl:ui:13-aaa,http://a\n\
         urn:nbn:nl:ui:13-bbb,http://b;http://c\n",
    );

    let api = client_for(&server);
    let code = run_batch(&api, &csv, Duration::ZERO, false, true).await;

    assert_eq!(code, 0);
    create_mock.assert_hits(2);
}

#[tokio::test]
async fn test_batch_row_payload_carries_split_locations() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/nbn").json_body(serde_json::json!({
            "identifier": "urn:nbn:nl:ui:13-bbb",
            "locations": ["http://a", "http://b", "http://c"]
        }));
        then.status(201);
    });

    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "NBN,LOCATION\nurn:nbn:nl:ui:13-bbb,http://a;http://b,http://c\n");

    let api = client_for(&server);
    let code = run_batch(&api, &csv, Duration::ZERO, false, true).await;

    assert_eq!(code, 0);
    create_mock.assert();
}

#[tokio::test]
async fn test_failing_row_does_not_abort_the_batch() {
    let server = MockServer::start();
    let conflict_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/nbn")
            .body_contains("urn:nbn:nl:ui:13-dup");
        then.status(409).body("NBN already registered");
    });
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/nbn")
            .body_contains("urn:nbn:nl:ui:13-ok");
        then.status(201);
    });

    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "NBN,LOCATION\n\
         urn:nbn:nl:ui:13-dup,http://a\n\
         urn:nbn:nl:ui:13-ok,http://b\n",
    );

    let api = client_for(&server);
    let code = run_batch(&api, &csv, Duration::ZERO, false, true).await;

    // the conflicting row is reported but the batch still succeeds
    assert_eq!(code, 0);
    conflict_mock.assert_hits(1);
    create_mock.assert_hits(1);
}

#[tokio::test]
async fn test_force_uses_upsert_instead_of_create() {
    let server = MockServer::start();
    let update_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/nbn/urn:nbn:nl:ui:13-dup")
            .json_body(serde_json::json!(["http://a"]));
        then.status(200);
    });

    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "NBN,LOCATION\nurn:nbn:nl:ui:13-dup,http://a\n");

    let api = client_for(&server);
    let code = run_batch(&api, &csv, Duration::ZERO, true, true).await;

    assert_eq!(code, 0);
    update_mock.assert();
}

#[tokio::test]
async fn test_missing_location_header_fails_before_any_call() {
    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.any_request();
        then.status(201);
    });

    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "NBN,URL\nurn:nbn:nl:ui:13-aaa,http://a\n");

    let api = client_for(&server);
    let code = run_batch(&api, &csv, Duration::ZERO, false, true).await;

    assert_eq!(code, 2);
    any_mock.assert_hits(0);
}

#[tokio::test]
async fn test_unreadable_input_file_is_a_caller_error() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.csv");

    let api = client_for(&server);
    let code = run_batch(&api, &missing, Duration::ZERO, false, true).await;

    assert_eq!(code, 2);
}

#[tokio::test]
async fn test_extra_columns_are_ignored() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/nbn").json_body(serde_json::json!({
            "identifier": "urn:nbn:nl:ui:13-aaa",
            "locations": ["http://a"]
        }));
        then.status(201);
    });

    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "TITLE,NBN,LOCATION\nsome deposit,urn:nbn:nl:ui:13-aaa,http://a\n");

    let api = client_for(&server);
    let code = run_batch(&api, &csv, Duration::ZERO, false, true).await;

    assert_eq!(code, 0);
    create_mock.assert();
}

#[tokio::test]
async fn test_wait_paces_the_rows() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/nbn");
        then.status(201);
    });

    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "NBN,LOCATION\n\
         urn:nbn:nl:ui:13-aaa,http://a\n\
         urn:nbn:nl:ui:13-bbb,http://b\n",
    );

    let api = client_for(&server);
    let started = Instant::now();
    let code = run_batch(&api, &csv, Duration::from_millis(100), false, true).await;

    assert_eq!(code, 0);
    // one pause after each of the two rows
    assert!(started.elapsed() >= Duration::from_millis(200));
}
