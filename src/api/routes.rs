use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    reports::{create_report, delete_report, get_report, list_reports, report_summary, search_reports, update_report},
    stats::{archive, export_csv, keywords, member_detail, member_stats, overview_stats, recent_reports, top_performers},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/reports", get(list_reports).post(create_report))
        .route("/api/reports/:date", get(get_report).put(update_report).delete(delete_report))
        .route("/api/reports/:date/summary", get(report_summary))
        .route("/api/search", get(search_reports))
        .route("/api/archive", get(archive))
        .route("/api/members/:name/history", get(member_detail))
        .route("/api/stats/overview", get(overview_stats))
        .route("/api/stats/members", get(member_stats))
        .route("/api/stats/top", get(top_performers))
        .route("/api/stats/keywords", get(keywords))
        .route("/api/stats/recent", get(recent_reports))
        .route("/api/export/csv", get(export_csv))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::AppConfig;
    use crate::store::ReportStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        _dir: TempDir,
        store: ReportStore,
        router: Router,
    }

    fn test_app() -> TestApp {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports.json"));
        let state = Arc::new(AppState::new(store.clone(), AppConfig::default()));
        TestApp {
            _dir: dir,
            store,
            router: create_router(state),
        }
    }

    async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn scenario_report() -> Value {
        json!({"date": "2025-01-01", "members": {"A": {"rating": 4}, "B": {"rating": 0}, "C": {"rating": 2}}})
    }

    #[tokio::test]
    async fn test_get_reports_on_fresh_store_is_empty() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/api/reports", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_post_upserts_by_date() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/api/reports", Some(scenario_report())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["report"], scenario_report());

        let replacement = json!({"date": "2025-01-01", "members": {"Z": 5}});
        send(&app, "POST", "/api/reports", Some(replacement.clone())).await;

        let (_, all) = send(&app, "GET", "/api/reports", None).await;
        assert_eq!(all, json!([replacement]));
    }

    #[tokio::test]
    async fn test_put_missing_date_is_not_found_and_store_unchanged() {
        let app = test_app();
        send(&app, "POST", "/api/reports", Some(scenario_report())).await;
        let before = app.store.load_all().unwrap();

        let body = json!({"date": "2025-06-01", "members": {"A": 1}});
        let (status, error) = send(&app, "PUT", "/api/reports/2025-06-01", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"], json!("Report not found"));
        assert_eq!(app.store.load_all().unwrap(), before);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_report() {
        let app = test_app();
        send(&app, "POST", "/api/reports", Some(scenario_report())).await;

        let body = json!({"date": "2025-01-01", "members": {"A": {"rating": 1, "description": "late"}}, "notes": "edited"});
        let (status, response) = send(&app, "PUT", "/api/reports/2025-01-01", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["report"], body);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let app = test_app();
        send(&app, "POST", "/api/reports", Some(scenario_report())).await;

        let (status, body) = send(&app, "DELETE", "/api/reports/2025-01-01", None).await;
        assert_eq!((status, body), (StatusCode::OK, json!({"success": true})));

        let (status, body) = send(&app, "DELETE", "/api/reports/2025-01-01", None).await;
        assert_eq!((status, body), (StatusCode::OK, json!({"success": true})));
        assert!(app.store.load_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_date_path_is_bad_request() {
        let app = test_app();
        let (status, _) = send(&app, "DELETE", "/api/reports/not-a-date", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_bad_request() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/api/reports", Some(json!({"members": {"A": 3}}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("date"));

        let (status, body) = send(&app, "PUT", "/api/reports/2025-01-01", Some(json!({"date": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert!(!app.store.exists());
    }

    #[tokio::test]
    async fn test_unpadded_dates_are_rejected() {
        let app = test_app();

        let body = json!({"date": "2025-1-5", "members": {"A": 3}});
        let (status, error) = send(&app, "POST", "/api/reports", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].is_string());

        let (status, _) = send(&app, "GET", "/api/reports/2025-1-5", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!app.store.exists());
    }

    #[tokio::test]
    async fn test_corrupt_store_is_server_error() {
        let app = test_app();
        std::fs::write(app.store.path(), "[{").unwrap();

        let (status, body) = send(&app, "GET", "/api/reports", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], json!("Failed to read reports"));
    }

    #[tokio::test]
    async fn test_report_summary_and_leaderboard() {
        let app = test_app();
        send(&app, "POST", "/api/reports", Some(scenario_report())).await;

        let (status, summary) = send(&app, "GET", "/api/reports/2025-01-01/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["average"], json!(3.0));
        assert_eq!(summary["best"]["member"], json!("A"));
        assert_eq!(summary["worst"]["member"], json!("C"));

        let (_, top) = send(&app, "GET", "/api/stats/top?limit=2", None).await;
        assert_eq!(top[0]["member"], json!("A"));
        assert_eq!(top[1]["member"], json!("C"));
        assert_eq!(top.as_array().unwrap().len(), 2);

        let (_, members) = send(&app, "GET", "/api/stats/members", None).await;
        assert_eq!(members["unrated"], json!(["B"]));
        assert_eq!(members["members"].as_array().unwrap().len(), 2);
        assert_eq!(members["members"][0]["stars"], json!(["full", "full", "full", "full", "empty"]));
    }

    #[tokio::test]
    async fn test_empty_collection_stats_are_well_defined() {
        let app = test_app();

        let (status, overview) = send(&app, "GET", "/api/stats/overview", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(overview["totalReports"], json!(0));
        assert_eq!(overview["averageRating"], Value::Null);

        let (_, top) = send(&app, "GET", "/api/stats/top", None).await;
        assert_eq!(top, json!([]));
        let (_, keywords) = send(&app, "GET", "/api/stats/keywords", None).await;
        assert_eq!(keywords, json!([]));
    }

    #[tokio::test]
    async fn test_member_history_and_search() {
        let app = test_app();
        send(&app, "POST", "/api/reports", Some(scenario_report())).await;
        send(&app, "POST", "/api/reports", Some(json!({"date": "2025-01-02", "members": {"A": {"rating": 5, "description": "great week"}}}))).await;

        let (status, detail) = send(&app, "GET", "/api/members/A/history", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["summary"]["average"], json!(4.5));
        assert_eq!(detail["history"][0]["date"], json!("2025-01-02"));

        let (status, _) = send(&app, "GET", "/api/members/Nobody/history", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, found) = send(&app, "GET", "/api/search?q=2025-01-02", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        let (_, by_date) = send(&app, "GET", "/api/search?date=2025-01-01", None).await;
        assert_eq!(by_date[0]["date"], json!("2025-01-01"));
    }

    #[tokio::test]
    async fn test_export_csv_endpoint() {
        let app = test_app();
        send(&app, "POST", "/api/reports", Some(scenario_report())).await;

        let request = Request::builder().uri("/api/export/csv").body(Body::empty()).unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"].to_str().unwrap().starts_with("text/csv"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "date,A,B,C\n2025-01-01,4,0,2\n");
    }
}
