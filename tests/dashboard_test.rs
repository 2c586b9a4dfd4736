//! Dashboard API tests that never reach a real engine.

mod common;

use common::{client, config_with_engine, spawn_dashboard, spawn_dashboard_with_cache};
use dashboard::cache::AnalysisCache;
use serde_json::Value;

const MISSING_ENGINE: &str = "/nonexistent/uci-engine";

#[tokio::test]
async fn test_health() {
    let base = spawn_dashboard(config_with_engine(MISSING_ENGINE)).await;
    let resp = client().get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_empty_upload_is_empty_table() {
    let cache = AnalysisCache::default();
    let base = spawn_dashboard_with_cache(config_with_engine(MISSING_ENGINE), cache.clone()).await;
    let c = client();

    // No games means no engine start, so the missing binary never matters
    let resp = c
        .post(format!("{base}/api/analyses"))
        .body("")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["games"], serde_json::json!([]));
    assert_eq!(body["depth"], 10);

    // Empty results are not kept
    let id = body["analysisId"].as_str().unwrap().to_string();
    let resp = c.get(format!("{base}/api/analyses/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_garbage_upload_is_empty_table() {
    let cache = AnalysisCache::default();
    let base = spawn_dashboard_with_cache(config_with_engine(MISSING_ENGINE), cache.clone()).await;
    let c = client();

    for garbage in ["hello world this is not pgn", "%%%% ;;; garbage {", "1. zz9 qq *"] {
        let resp = c
            .post(format!("{base}/api/analyses"))
            .body(garbage)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "{garbage:?}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["games"], serde_json::json!([]), "{garbage:?}");
    }
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_depth_out_of_range() {
    let base = spawn_dashboard(config_with_engine(MISSING_ENGINE)).await;
    for depth in [0, 7, 25] {
        let resp = client()
            .post(format!("{base}/api/analyses?depth={depth}"))
            .body("1. e4 *")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "depth={depth}");
        let body: Value = resp.json().await.unwrap();
        assert!(body["detail"].as_str().unwrap().contains("depth"));
    }
}

#[tokio::test]
async fn test_unknown_analysis() {
    let base = spawn_dashboard(config_with_engine(MISSING_ENGINE)).await;
    let resp = client()
        .get(format!("{base}/api/analyses/0123456789abcdef/games/0/csv"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_missing_engine_is_bad_gateway() {
    let base = spawn_dashboard(config_with_engine(MISSING_ENGINE)).await;
    let resp = client()
        .post(format!("{base}/api/analyses"))
        .body("1. d4 d5 *")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains(MISSING_ENGINE));
}

#[tokio::test]
async fn test_upload_over_limit() {
    let base = spawn_dashboard(config_with_engine(MISSING_ENGINE)).await;
    let resp = client()
        .post(format!("{base}/api/analyses"))
        .body(" ".repeat(32 * 1024))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 413);
}
