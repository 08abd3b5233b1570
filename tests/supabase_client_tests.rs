//! Supabase client and diagnostic runner tests against a mock project
//!
//! wiremock stands in for the Auth, PostgREST and Storage endpoints so the
//! whole check sequence runs without network access.

use mylifepictures::diagnostics::{CheckStatus, ReadinessStatus};
use mylifepictures::environment::{EnvironmentSnapshot, VITE_KEY_VAR, VITE_URL_VAR};
use mylifepictures::supabase::{BackendError, BackendOperations, SupabaseClient};
use mylifepictures::{DiagnosticRunner, RunOutcome, RunnerSettings};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test-anon-key";

fn snapshot_for(server: &MockServer, key: Option<&str>) -> EnvironmentSnapshot {
    let url = server.uri();
    let key = key.map(str::to_string);
    EnvironmentSnapshot::resolve(
        |name| match name {
            VITE_URL_VAR => Some(url.clone()),
            VITE_KEY_VAR => key.clone(),
            _ => None,
        },
        "https://default.supabase.co",
    )
}

fn client_for(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&snapshot_for(server, Some(ANON_KEY)), None, Duration::from_secs(5))
        .unwrap()
}

async fn mount_json(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// A project with two tables, one bucket and nobody signed in
async fn mount_partial_project(server: &MockServer) {
    mount_json(server, "/auth/v1/health", 200, json!({"name": "GoTrue"})).await;
    mount_json(
        server,
        "/auth/v1/user",
        403,
        json!({"code": 403, "error_code": "bad_jwt", "msg": "invalid claim: missing sub claim"}),
    )
    .await;
    mount_json(server, "/rest/v1/profiles", 200, json!([{"count": 1}])).await;
    mount_json(server, "/rest/v1/photos", 200, json!([{"count": 12}])).await;
    mount_json(
        server,
        "/rest/v1/photo_folders",
        404,
        json!({"code": "PGRST205", "message": "Could not find the table 'public.photo_folders' in the schema cache"}),
    )
    .await;
    mount_json(
        server,
        "/rest/v1/audio_recordings",
        404,
        json!({"code": "42P01", "message": "relation \"public.audio_recordings\" does not exist"}),
    )
    .await;
    mount_json(
        server,
        "/storage/v1/bucket",
        200,
        json!([{"id": "photos", "name": "photos", "public": true}]),
    )
    .await;
}

#[tokio::test]
async fn test_connection_sends_project_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {ANON_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let probe = client_for(&server).test_connection().await;

    assert!(probe.configured);
    assert!(probe.connected);
    assert!(probe.error.is_none());
}

#[tokio::test]
async fn test_connection_reports_rejected_key() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/auth/v1/health",
        401,
        json!({"message": "Invalid API key"}),
    )
    .await;

    let probe = client_for(&server).test_connection().await;

    assert!(probe.configured);
    assert!(!probe.connected);
    assert_eq!(probe.error.as_deref(), Some("Invalid API key"));
}

#[tokio::test]
async fn test_unconfigured_client_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        SupabaseClient::new(&snapshot_for(&server, None), None, Duration::from_secs(5)).unwrap();

    let probe = client.test_connection().await;
    assert!(!probe.configured);
    assert!(!probe.connected);

    let err = client.list_buckets().await.unwrap_err();
    assert!(matches!(err, BackendError::NotConfigured { .. }));
}

#[tokio::test]
async fn test_current_user_with_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5d9f0a52-7f8e-4a34-8a0e-1f2a3b4c5d6e",
            "email": "grandma@example.com",
            "aud": "authenticated"
        })))
        .mount(&server)
        .await;

    let client = SupabaseClient::new(
        &snapshot_for(&server, Some(ANON_KEY)),
        Some("session-token".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();

    let user = client.current_user().await.unwrap().unwrap();
    assert_eq!(user.display_identity(), "grandma@example.com");
}

#[tokio::test]
async fn test_current_user_without_session_is_invalid_token() {
    let server = MockServer::start().await;
    mount_partial_project(&server).await;

    let err = client_for(&server).current_user().await.unwrap_err();

    assert_eq!(err.code(), Some("bad_jwt"));
    assert!(err.is_invalid_token());
}

#[tokio::test]
async fn test_probe_table_uses_minimal_select() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("select", "count"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).probe_table("profiles").await.unwrap();
}

#[tokio::test]
async fn test_probe_missing_table_is_classified() {
    let server = MockServer::start().await;
    mount_partial_project(&server).await;
    let client = client_for(&server);

    let undefined = client.probe_table("audio_recordings").await.unwrap_err();
    assert_eq!(undefined.code(), Some("42P01"));
    assert!(undefined.is_missing_object());

    let uncached = client.probe_table("photo_folders").await.unwrap_err();
    assert!(uncached.is_missing_object());
}

#[tokio::test]
async fn test_list_buckets_parses_storage_listing() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/storage/v1/bucket",
        200,
        json!([
            {"id": "photos", "name": "photos", "public": true, "owner": ""},
            {"id": "audio", "name": "audio", "public": false}
        ]),
    )
    .await;

    let buckets = client_for(&server).list_buckets().await.unwrap();

    let names: Vec<&str> = buckets.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["photos", "audio"]);
    assert!(!buckets[1].public);
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/bucket"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = SupabaseClient::new(
        &snapshot_for(&server, Some(ANON_KEY)),
        None,
        Duration::from_millis(200),
    )
    .unwrap();

    let err = client.list_buckets().await.unwrap_err();
    assert!(matches!(err, BackendError::Timeout { timeout_ms: 200 }));
}

#[tokio::test]
async fn test_runner_against_partially_provisioned_project() {
    let server = MockServer::start().await;
    mount_partial_project(&server).await;

    let snapshot = Arc::new(snapshot_for(&server, Some(ANON_KEY)));
    let backend = Arc::new(client_for(&server));
    let runner = DiagnosticRunner::new(snapshot, backend, RunnerSettings::default());

    let report = match runner.run().await {
        RunOutcome::Completed(report) => report,
        RunOutcome::AlreadyRunning => panic!("runner should have been idle"),
    };

    let rows: Vec<(&str, CheckStatus)> = report
        .results
        .iter()
        .map(|r| (r.name.as_str(), r.status))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Environment Variables", CheckStatus::Success),
            ("Connection Test", CheckStatus::Success),
            ("Authentication Service", CheckStatus::Success),
            ("Email Configuration", CheckStatus::Warning),
            ("Database Schema", CheckStatus::Warning),
            ("Storage Buckets", CheckStatus::Warning),
        ]
    );

    assert_eq!(
        report.results[2].details.as_deref(),
        Some("Not signed in (this is normal)")
    );
    assert_eq!(report.results[4].message, "2/4 tables exist");
    assert!(report.results[4]
        .details
        .as_deref()
        .unwrap()
        .ends_with("Missing: photo_folders, audio_recordings"));
    assert_eq!(
        report.results[5].details.as_deref(),
        Some("Found 1 buckets. Missing: audio")
    );

    assert_eq!(report.summary.passed, 3);
    assert_eq!(report.summary.warnings, 3);
    assert_eq!(report.readiness, ReadinessStatus::PartiallyReady);
    assert!(!report.halted_early);
    assert!(!runner.is_running());
}

#[tokio::test]
async fn test_runner_reports_unreachable_project() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/auth/v1/health",
        503,
        json!({"message": "Service Unavailable"}),
    )
    .await;

    let snapshot = Arc::new(snapshot_for(&server, Some(ANON_KEY)));
    let backend = Arc::new(client_for(&server));
    let runner = DiagnosticRunner::new(snapshot, backend, RunnerSettings::default());

    let RunOutcome::Completed(report) = runner.run().await else {
        panic!("runner should have been idle");
    };

    let connection = &report.results[1];
    assert_eq!(connection.status, CheckStatus::Error);
    assert_eq!(connection.message, "Connection failed");
    assert_eq!(connection.details.as_deref(), Some("Service Unavailable"));
    // Only the environment check halts the sequence
    assert_eq!(report.results.len(), 6);
    assert!(report.has_failures());
}
