//! Tests for fire-and-forget stream reporting from a playback session.

use cr8te_core::TrackId;
use cr8te_playback::{PlaybackConfig, PlaybackSession, QueueEntry};
use cr8te_server_client::{Cr8teClient, ServerConfig, StreamReporter};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry(id: &str) -> QueueEntry {
    QueueEntry {
        id: TrackId::new(id),
        title: format!("Track {}", id),
        attribution: "Nova".to_string(),
        audio_url: format!("https://gateway.example/ipfs/{}", id),
        artwork_url: String::new(),
        duration_secs: Some(120.0),
    }
}

fn session_for(server: &MockServer) -> (PlaybackSession, Arc<StreamReporter>) {
    let client = Arc::new(Cr8teClient::new(ServerConfig::new(server.uri())).unwrap());
    let reporter = Arc::new(StreamReporter::on_current_runtime(client).unwrap());
    let session = PlaybackSession::new(PlaybackConfig::default(), reporter.clone());
    (session, reporter)
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_counted_listen_is_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/music/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let (mut session, reporter) = session_for(&server);
    session.play_single(entry("a"));
    session.on_time_update(29.0, Some(120.0));
    session.on_time_update(31.0, Some(120.0));
    session.on_time_update(45.0, Some(120.0));

    reporter.flush().await;
    assert_eq!(reporter.pending(), 0);
    assert_eq!(request_bodies(&server).await, vec![json!({ "trackId": "a" })]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_keeps_id_after_moving_on() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/music/stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true }))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let (mut session, reporter) = session_for(&server);
    session
        .play_collection(vec![entry("a"), entry("b")], 0)
        .unwrap();
    session.on_time_update(31.0, None);

    // Skip before the request completes
    session.next();
    assert_eq!(session.current_entry().unwrap().id.as_str(), "b");

    reporter.flush().await;
    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["trackId"], "a");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_report_does_not_affect_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/music/stream"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed" })))
        .mount(&server)
        .await;

    let (mut session, reporter) = session_for(&server);
    session.play_single(entry("a"));
    session.on_time_update(31.0, None);

    reporter.flush().await;

    // No retry, and the session keeps going
    assert_eq!(request_bodies(&server).await.len(), 1);
    assert!(session.is_counted());
    assert!(session.is_playing());
}

#[test]
fn test_reporter_requires_runtime() {
    let client = Arc::new(Cr8teClient::new(ServerConfig::new("http://localhost:3000")).unwrap());
    assert!(StreamReporter::on_current_runtime(client).is_none());
}
