// HTTP API tests — drive the router directly with tower's oneshot.
//
// No network involved: the geocoder is a fixed stub and live-data tests
// point the spool at temp files.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use ember::config::Config;
use ember::geo::Geocoder;
use ember::model::Analyzer;
use ember::web::{build_router, AppState};

/// Geocoder stub that always resolves to the same point.
struct FixedGeocoder;

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn locate(&self, _place: &str) -> Option<(f64, f64)> {
        Some((19.076, 72.8777))
    }
}

fn test_state(spool_path: PathBuf) -> AppState {
    AppState {
        analyzer: Arc::new(Analyzer::default()),
        config: Arc::new(Config {
            bearer_token: String::new(),
            feed_api_url: "http://127.0.0.1:9".to_string(),
            nominatim_url: "http://127.0.0.1:9".to_string(),
            spool_path,
        }),
        geocoder: Arc::new(FixedGeocoder),
    }
}

fn temp_spool(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ember-web-{name}-{}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

async fn post_analyze(
    state: AppState,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = build_router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/analyze")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn health_returns_ok() {
    let state = test_state(temp_spool("health"));
    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn analyze_direct_posts_returns_dashboard_shape() {
    let body = serde_json::json!({
        "posts": [
            { "text": "Massive flood warning, evacuate now", "timestamp": 3_600_000 },
            { "text": "Good morning everyone", "timestamp": 3_700_000 },
            { "text": "Earthquake felt downtown", "timestamp": 7_300_000 },
        ]
    });
    let (status, json) = post_analyze(test_state(temp_spool("direct")), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["posts"].as_array().unwrap().len(), 3);

    let neg = json["neg"].as_u64().unwrap();
    let neu = json["neu"].as_u64().unwrap();
    let pos = json["pos"].as_u64().unwrap();
    assert_eq!(neg + neu + pos, 3);

    assert_eq!(json["keywordFreq"]["flood"], 1);
    assert_eq!(json["keywordFreq"]["earthquake"], 1);
    // Two distinct hours -> two time buckets, ascending.
    let times = json["times"].as_array().unwrap();
    assert_eq!(times.len(), 2);
    assert!(times[0]["time"].as_i64().unwrap() < times[1]["time"].as_i64().unwrap());
}

#[tokio::test]
async fn analyze_empty_body_uses_defaults() {
    let (status, json) = post_analyze(test_state(temp_spool("defaults")), serde_json::json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["score"], 0);
    assert_eq!(json["posts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn analyze_degrades_malformed_posts() {
    // No text, no coordinates, unparseable timestamp: still scored.
    let body = serde_json::json!({
        "posts": [ { "timestamp": "definitely not a date" } ]
    });
    let (status, json) = post_analyze(test_state(temp_spool("malformed")), body).await;

    assert_eq!(status, StatusCode::OK);
    let post = &json["posts"][0];
    assert_eq!(post["severity"], 0.0);
    assert_eq!(post["disaster_type"], "Unknown");
    assert_eq!(post["confidence"], 0.4);
    assert!(post["lat"].is_null());
}

#[tokio::test]
async fn live_mode_without_any_source_is_404() {
    // No bearer token and the spool file doesn't exist.
    let body = serde_json::json!({ "real": true });
    let (status, json) = post_analyze(test_state(temp_spool("nosource")), body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "no live data found");
}

#[tokio::test]
async fn live_mode_drains_the_spool() {
    let path = temp_spool("spooled");
    std::fs::write(
        &path,
        "{\"text\": \"flood water rising\"}\n{\"text\": \"all safe here\"}\n",
    )
    .unwrap();

    let body = serde_json::json!({ "real": true, "region": "india" });
    let (status, json) = post_analyze(test_state(path.clone()), body).await;

    assert_eq!(status, StatusCode::OK);
    let posts = json["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    for post in posts {
        // Spooled posts are coordinate-filled from the india box.
        let lat = post["lat"].as_f64().unwrap();
        let lon = post["lon"].as_f64().unwrap();
        assert!((8.0..=28.0).contains(&lat));
        assert!((68.0..=97.0).contains(&lon));
    }

    let _ = std::fs::remove_file(&path);
}
