use metrics_exporter_prometheus::PrometheusHandle;
use spend_watch::config::SourceConfig;
use spend_watch::dashboard::{DashboardSource, HttpDashboardSource};
use spend_watch::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) source: Arc<dyn DashboardSource>,
}

pub(crate) fn apply_api_base(
    source: &mut SourceConfig,
    api_base: Option<String>,
) -> Result<(), AppError> {
    if let Some(raw) = api_base {
        source.api_base = SourceConfig::parse_base(&raw)?;
    }
    Ok(())
}

pub(crate) fn dashboard_source(
    config: &SourceConfig,
) -> Result<Arc<dyn DashboardSource>, AppError> {
    let source = HttpDashboardSource::new(config)?;
    tracing::info!(api_base = %source.api_base(), "dashboard source configured");
    Ok(Arc::new(source))
}

pub(crate) fn snapshot_footer() -> String {
    format!(
        "Snapshot rendered {}. Flags are statistical hypotheses for review, not findings.",
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    )
}
