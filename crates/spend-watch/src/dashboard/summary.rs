use std::sync::Arc;

use super::format::{format_count, format_currency};
use super::source::DashboardSource;
use super::target::RenderTarget;
use super::views::RegionContent;
use super::FlowOutcome;

/// The three headline figures, each addressable on its own.
#[derive(Clone)]
pub struct SummaryTargets {
    pub total_spend: Arc<dyn RenderTarget>,
    pub total_providers: Arc<dyn RenderTarget>,
    pub total_flags: Arc<dyn RenderTarget>,
}

/// Fills the headline figures from `/api/summary`.
///
/// Failures are logged only: figures already on screen stay untouched so the
/// header never flashes an error state.
pub struct SummaryFlow {
    source: Arc<dyn DashboardSource>,
    targets: SummaryTargets,
}

impl SummaryFlow {
    pub fn new(source: Arc<dyn DashboardSource>, targets: SummaryTargets) -> Self {
        Self { source, targets }
    }

    pub async fn run(&self) -> FlowOutcome {
        match self.source.summary().await {
            Ok(metrics) => {
                self.targets
                    .total_spend
                    .write(RegionContent::Text(format_currency(metrics.total_spend, None)));
                self.targets
                    .total_providers
                    .write(RegionContent::Text(format_count(metrics.total_providers)));
                self.targets
                    .total_flags
                    .write(RegionContent::Text(format_count(metrics.total_flags)));
                tracing::debug!(
                    total_providers = metrics.total_providers,
                    total_flags = metrics.total_flags,
                    "summary metrics rendered"
                );
                FlowOutcome::Rendered
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load summary metrics");
                FlowOutcome::Failed
            }
        }
    }
}
