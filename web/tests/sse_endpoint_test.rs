//! Endpoint tests that read the relay stream over real sockets, so header
//! and wire-framing behavior is asserted on actual bytes.

use anyhow::Result;
use clap::Parser as _;
use futures::{Stream, StreamExt};
use service::{config::Config, AppState};
use sse::Manager;
use std::sync::Arc;
use std::time::Duration;

async fn spawn_relay() -> (Arc<Manager>, String) {
    let manager = Arc::new(Manager::new());
    let config = Config::try_parse_from(["sse_relay"]).unwrap();
    let app_state = AppState::new(config, &manager);

    let routes = web::router::define_routes(app_state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, routes).await.unwrap();
    });

    (manager, format!("http://{addr}"))
}

/// Accumulate stream chunks into `buffer` until `done` is satisfied or a
/// 5 second deadline passes. Returns whether the predicate was met.
async fn read_until<S, B, E>(body: &mut S, buffer: &mut String, done: impl Fn(&str) -> bool) -> bool
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !done(buffer) {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match tokio::time::timeout(remaining, body.next()).await {
            Ok(Some(Ok(chunk))) => buffer.push_str(&String::from_utf8_lossy(chunk.as_ref())),
            _ => return false,
        }
    }
    true
}

fn data_frames(buffer: &str) -> Vec<&str> {
    buffer
        .split("\n\n")
        .filter_map(|frame| frame.strip_prefix("data: "))
        .collect()
}

#[tokio::test]
async fn health_check_responds_ok() -> Result<()> {
    let (_manager, base) = spawn_relay().await;

    let response = reqwest::get(format!("{base}/health")).await?;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await?, "healthy");
    Ok(())
}

#[tokio::test]
async fn stream_opens_with_sse_headers_and_ack_comment() -> Result<()> {
    let (_manager, base) = spawn_relay().await;

    let response = reqwest::get(format!("{base}/events")).await?;
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "text/event-stream");
    assert_eq!(response.headers()["cache-control"], "no-cache");

    let mut body = response.bytes_stream();
    let mut buffer = String::new();
    assert!(read_until(&mut body, &mut buffer, |b| b.contains("\n\n")).await);
    assert!(
        buffer.starts_with(": connected\n\n"),
        "ack must be the first frame, got {buffer:?}"
    );
    Ok(())
}

#[tokio::test]
async fn events_fan_out_in_order_and_late_subscribers_miss_history() -> Result<()> {
    let (manager, base) = spawn_relay().await;

    let first = reqwest::get(format!("{base}/events")).await?;
    let mut first_body = first.bytes_stream();
    let mut first_buffer = String::new();
    assert!(
        read_until(&mut first_body, &mut first_buffer, |b| {
            b.starts_with(": connected\n\n")
        })
        .await
    );

    manager.broadcast("a");
    assert!(read_until(&mut first_body, &mut first_buffer, |b| data_frames(b).len() == 1).await);

    // Second subscriber arrives after "a" was broadcast; no replay for it.
    let second = reqwest::get(format!("{base}/events")).await?;
    let mut second_body = second.bytes_stream();
    let mut second_buffer = String::new();
    assert!(
        read_until(&mut second_body, &mut second_buffer, |b| {
            b.starts_with(": connected\n\n")
        })
        .await
    );

    manager.broadcast("b");

    assert!(read_until(&mut first_body, &mut first_buffer, |b| data_frames(b).len() == 2).await);
    assert_eq!(data_frames(&first_buffer), ["a", "b"]);

    assert!(read_until(&mut second_body, &mut second_buffer, |b| !data_frames(b).is_empty()).await);
    assert_eq!(data_frames(&second_buffer), ["b"]);
    Ok(())
}

#[tokio::test]
async fn client_disconnect_deregisters_the_subscriber() -> Result<()> {
    let (manager, base) = spawn_relay().await;

    let response = reqwest::get(format!("{base}/events")).await?;
    let mut body = response.bytes_stream();
    let mut buffer = String::new();
    assert!(read_until(&mut body, &mut buffer, |b| b.starts_with(": connected\n\n")).await);
    assert_eq!(manager.subscriber_count(), 1);

    drop(body);

    // The dropped client is pruned within a broadcast cycle or two.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while manager.subscriber_count() > 0 && tokio::time::Instant::now() < deadline {
        manager.broadcast("are you still there");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(manager.subscriber_count(), 0);
    Ok(())
}
