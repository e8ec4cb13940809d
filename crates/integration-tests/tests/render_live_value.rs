//! Integration tests for live badge values.
//!
//! A throwaway axum server on `127.0.0.1` plays the value source.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use maintained_core::{Badge, BadgeAppearance, BadgeColor, BadgeId, BadgeStyle};
use maintained_integration_tests::{TestContext, body_text, spawn_server};
use maintained_server::render::{BadgeRenderer, render_with_value};

/// Start a value source and return its base URL plus a hit counter.
async fn value_source() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));

    let router = Router::new()
        .route("/version", get(|| async { "  v1.2.3\n" }))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/blank", get(|| async { "   " }))
        .route("/long", get(|| async { "x".repeat(100) }))
        .route(
            "/binary",
            get(|| async { ([(header::CONTENT_TYPE, "application/octet-stream")], "v9.9.9") }),
        )
        .route(
            "/endless",
            get(|| async {
                let chunk = Bytes::from(vec![b'7'; 64 * 1024]);
                let chunks = futures::stream::repeat_with(move || {
                    Ok::<_, std::convert::Infallible>(chunk.clone())
                });
                Body::from_stream(chunks)
            }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        )
        .route(
            "/counted",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "counted"
            }),
        )
        .with_state(hits.clone());

    let addr = spawn_server(router).await;
    (format!("http://{addr}"), hits)
}

fn badge_with_source(source: &str) -> Badge {
    let mut badge = Badge::new(BadgeId::new(1), "version", 60.0, "stored", 70.0);
    badge.apply_appearance(BadgeAppearance {
        title_color: BadgeColor::Slate,
        value_color: BadgeColor::Savannah,
        style: BadgeStyle::Plastic,
        value_source: Some(source.to_string()),
        is_mono: false,
    });
    badge
}

fn renderer() -> BadgeRenderer {
    BadgeRenderer::new(Duration::from_millis(300)).unwrap()
}

// =============================================================================
// Successful Fetches
// =============================================================================

#[tokio::test]
async fn test_live_value_replaces_stored_value() {
    let (base, _) = value_source().await;
    let badge = badge_with_source(&format!("{base}/version"));

    let svg = renderer().render(&badge).await.unwrap();

    assert_eq!(svg, render_with_value(&badge, Some("v1.2.3")).unwrap());
    assert!(svg.contains("v1.2.3"));
    assert!(!svg.contains("stored"));
}

#[tokio::test]
async fn test_live_value_is_truncated() {
    let (base, _) = value_source().await;
    let badge = badge_with_source(&format!("{base}/long"));

    let svg = renderer().render(&badge).await.unwrap();

    assert_eq!(svg, render_with_value(&badge, Some(&"x".repeat(64))).unwrap());
}

#[tokio::test]
async fn test_endless_body_reads_only_a_prefix() {
    let (base, _) = value_source().await;
    let badge = badge_with_source(&format!("{base}/endless"));

    // A body that never ends can only render if reading stops early
    let svg = renderer().render(&badge).await.unwrap();

    assert_eq!(svg, render_with_value(&badge, Some(&"7".repeat(64))).unwrap());
    assert!(!svg.contains("stored"));
}

// =============================================================================
// Fallbacks
// =============================================================================

#[tokio::test]
async fn test_failed_fetches_fall_back_to_stored_value() {
    let (base, _) = value_source().await;
    let renderer = renderer();

    for path in ["/missing", "/blank", "/slow", "/binary"] {
        let badge = badge_with_source(&format!("{base}{path}"));
        let svg = renderer.render(&badge).await.unwrap();
        assert_eq!(svg, render_with_value(&badge, None).unwrap(), "{path}");
        assert!(svg.contains("stored"), "{path}");
    }
}

#[tokio::test]
async fn test_unreachable_source_falls_back() {
    // Bind then drop a listener so the port is closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let badge = badge_with_source(&format!("http://{addr}/version"));
    let svg = renderer().render(&badge).await.unwrap();

    assert!(svg.contains("stored"));
}

#[tokio::test]
async fn test_mono_badge_never_fetches() {
    let (base, hits) = value_source().await;
    let mut badge = badge_with_source(&format!("{base}/counted"));
    badge.is_mono = true;

    let svg = renderer().render(&badge).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(!svg.contains("counted"));
    assert!(svg.contains("width=\"60\""));
}

// =============================================================================
// Through The Image Route
// =============================================================================

#[tokio::test]
async fn test_image_route_fetches_each_time() {
    let (base, hits) = value_source().await;
    let ctx = TestContext::new("alice").await;
    ctx.state.store().ensure_user("alice").await;
    ctx.state
        .store()
        .configure_badge(
            "alice",
            "alice",
            BadgeId::new(0),
            BadgeAppearance {
                title_color: BadgeColor::Seabed,
                value_color: BadgeColor::Sahara,
                style: BadgeStyle::Flat,
                value_source: Some(format!("{base}/counted")),
                is_mono: false,
            },
        )
        .await
        .unwrap();

    for _ in 0..2 {
        let request = axum::http::Request::builder()
            .uri("/badge/alice/alice/0")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = ctx.send(request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("counted"));
    }

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
