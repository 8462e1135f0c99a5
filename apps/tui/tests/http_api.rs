use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use india_internship_map::api::{
    ApiError, HttpMapApi, MapApi, STATE_STATISTICS_PATH, STATISTICS_SUMMARY_PATH,
};
use india_internship_map::{Controller, Dashboard, View};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TIMEOUT: Duration = Duration::from_secs(5);

fn state_stats() -> Value {
    json!({
        "stateStats": {
            "IN-DL": {
                "companies": 5,
                "hiredInternships": 2,
                "pmInternships": 1,
                "activeInternships": 3,
                "studentsHired": 4
            },
            "IN-KA": { "name": "Karnataka", "companies": 12, "activeInternships": 7 }
        }
    })
}

fn summary() -> Value {
    json!({
        "total_companies": 17,
        "total_internships": 40,
        "active_internships": 10,
        "closed_internships": 30,
        "pm_internships": 1,
        "total_applications": 250,
        "students_hired": 4
    })
}

/// Fake backend. Responses are fixed per route; `summary_hits` counts
/// requests to the summary endpoint.
struct Backend {
    addr: SocketAddr,
    summary_hits: Arc<AtomicUsize>,
}

impl Backend {
    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn serve(
    states: (StatusCode, String),
    summary: (StatusCode, String),
) -> Result<Backend, std::io::Error> {
    let summary_hits = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&summary_hits);

    let app = Router::new()
        .route(
            STATE_STATISTICS_PATH,
            get(move || {
                let states = states.clone();
                async move { states }
            }),
        )
        .route(
            STATISTICS_SUMMARY_PATH,
            get(move || {
                hits.fetch_add(1, Ordering::SeqCst);
                let summary = summary.clone();
                async move { summary }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(Backend { addr, summary_hits })
}

fn ok(value: &Value) -> (StatusCode, String) {
    (StatusCode::OK, value.to_string())
}

#[tokio::test]
async fn decodes_both_endpoints() -> TestResult {
    let backend = serve(ok(&state_stats()), ok(&summary())).await?;
    let api = HttpMapApi::new(&backend.url(), TIMEOUT)?;

    let catalog = api.state_statistics().await?;
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("IN-DL").map(|s| s.name.as_str()), Some("Delhi"));
    assert_eq!(catalog.get("IN-KA").map(|s| s.active_internships), Some(7));

    let summary = api.statistics_summary().await?;
    assert_eq!(summary.total_applications, 250);
    Ok(())
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() -> TestResult {
    let backend = serve(ok(&state_stats()), ok(&summary())).await?;
    let api = HttpMapApi::new(&format!("{}/", backend.url()), TIMEOUT)?;

    assert_eq!(api.base_url(), backend.url());
    assert_eq!(api.state_statistics().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn happy_path_cycle_loads_dashboard() -> TestResult {
    let backend = serve(ok(&state_stats()), ok(&summary())).await?;
    let api = Arc::new(HttpMapApi::new(&backend.url(), TIMEOUT)?);
    let mut controller = Controller::new(api, Dashboard::new("IN-KA"));

    let dashboard = controller.run_once().await;

    assert_eq!(dashboard.view(), View::Loaded);
    assert!(!dashboard.is_database_empty());
    assert_eq!(dashboard.selected_stats().companies, 12);
    assert_eq!(dashboard.summary().map(|s| s.total_companies), Some(17));
    assert!(dashboard.last_updated().is_some());
    Ok(())
}

#[tokio::test]
async fn failing_state_endpoint_skips_summary() -> TestResult {
    let backend = serve(
        (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
        ok(&summary()),
    )
    .await?;
    let api = Arc::new(HttpMapApi::new(&backend.url(), TIMEOUT)?);

    let error = api.state_statistics().await.err();
    assert!(matches!(
        error,
        Some(ApiError::Status { status: 500, .. })
    ));

    let mut controller = Controller::new(api, Dashboard::new("IN-MH"));
    let dashboard = controller.run_once().await;

    assert_eq!(dashboard.view(), View::Error);
    assert_eq!(backend.summary_hits.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn summary_status_failure_is_soft() -> TestResult {
    let backend = serve(
        ok(&state_stats()),
        (StatusCode::NOT_FOUND, "missing".to_string()),
    )
    .await?;
    let api = Arc::new(HttpMapApi::new(&backend.url(), TIMEOUT)?);
    let mut controller = Controller::new(api, Dashboard::new("IN-MH"));

    let dashboard = controller.run_once().await;

    assert_eq!(dashboard.view(), View::Loaded);
    assert!(dashboard.summary().is_none());
    assert_eq!(dashboard.catalog().len(), 2);
    assert_eq!(backend.summary_hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn malformed_summary_fails_the_cycle() -> TestResult {
    let backend = serve(
        ok(&state_stats()),
        (StatusCode::OK, "<html>oops</html>".to_string()),
    )
    .await?;
    let api = Arc::new(HttpMapApi::new(&backend.url(), TIMEOUT)?);

    assert!(matches!(
        api.statistics_summary().await,
        Err(ApiError::Decode { .. })
    ));

    let mut controller = Controller::new(api, Dashboard::new("IN-MH"));
    let dashboard = controller.run_once().await;

    assert_eq!(dashboard.view(), View::Error);
    // Per-state data from the same cycle stays in place.
    assert_eq!(dashboard.catalog().len(), 2);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_request_error() -> TestResult {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let api = HttpMapApi::new(&format!("http://{addr}"), TIMEOUT)?;

    assert!(matches!(
        api.state_statistics().await,
        Err(ApiError::Request { .. })
    ));
    Ok(())
}
