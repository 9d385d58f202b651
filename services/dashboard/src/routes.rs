use crate::infra::{snapshot_footer, AppState};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use spend_watch::dashboard::markup::{region_markup, render_page};
use spend_watch::dashboard::{DashboardFlows, DashboardRegions};

pub(crate) fn dashboard_routes() -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/providers/:npi", get(provider_page))
        .route("/fragments/providers/:npi", get(provider_fragment))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

/// Fresh page: summary then provider list, detail panel left on its prompt.
pub(crate) async fn index_page(Extension(state): Extension<AppState>) -> Html<String> {
    let regions = DashboardRegions::new();
    let flows = DashboardFlows::new(state.source.clone(), &regions);
    flows.bootstrap().await;
    Html(render_page(&regions, &snapshot_footer()))
}

/// Target of a provider card's activation action.
pub(crate) async fn provider_page(
    Extension(state): Extension<AppState>,
    Path(npi): Path<String>,
) -> Html<String> {
    let regions = DashboardRegions::new();
    let flows = DashboardFlows::new(state.source.clone(), &regions);
    flows.bootstrap().await;
    flows.detail().show(&npi).await;
    Html(render_page(&regions, &snapshot_footer()))
}

/// Detail panel only, for hosts that swap the region in place.
pub(crate) async fn provider_fragment(
    Extension(state): Extension<AppState>,
    Path(npi): Path<String>,
) -> Html<String> {
    let regions = DashboardRegions::new();
    let flows = DashboardFlows::new(state.source.clone(), &regions);
    flows.detail().show(&npi).await;
    Html(region_markup(&regions.detail_view))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::state;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
    }

    fn app(healthy: bool, ready: bool) -> Router {
        dashboard_routes().layer(Extension(state(healthy, ready)))
    }

    #[tokio::test]
    async fn index_renders_summary_and_cards() {
        let (status, body) = get_body(app(true, true), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<dd id="total-spend">$1,234,567.89</dd>"#));
        assert!(body.contains(r#"<dd id="total-providers">42</dd>"#));
        assert!(body.contains(r#"href="/providers/1003000126""#));
        assert!(body.contains("RIVERVIEW &lt;TRANSPORT&gt;"));
        assert!(body.contains("No Specialty"));
        assert!(body.contains("$98,765"));
    }

    #[tokio::test]
    async fn index_degrades_per_region_when_backend_is_down() {
        let (status, body) = get_body(app(false, true), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<dd id="total-spend">--</dd>"#));
        assert!(body.contains("Error loading providers"));
    }

    #[tokio::test]
    async fn provider_page_fills_the_detail_region() {
        let (status, body) = get_body(app(true, true), "/providers/1003000126").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No Exclusions Found"));
        assert!(body.contains("VOLUME OUTLIER"));
        assert!(body.contains("Analyzed periods: 1 months"));
        assert!(body.contains("No official details found in registry."));
        assert!(body.contains("registry-search-results?number=1003000126"));
    }

    #[tokio::test]
    async fn fragment_reports_failures_with_the_npi() {
        let (status, body) = get_body(app(true, true), "/fragments/providers/1234567890").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error loading details for 1234567890"));
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn readiness_reflects_state() {
        let (status, body) = get_body(app(true, false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("initializing"));

        let (status, _) = get_body(app(true, true), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
