use std::sync::Arc;

use super::source::DashboardSource;
use super::target::RenderTarget;
use super::views::{ProviderCardView, RegionContent};
use super::FlowOutcome;

/// Fills the flagged provider list from `/api/flagged-providers`.
pub struct ProviderListFlow {
    source: Arc<dyn DashboardSource>,
    list: Arc<dyn RenderTarget>,
}

impl ProviderListFlow {
    pub fn new(source: Arc<dyn DashboardSource>, list: Arc<dyn RenderTarget>) -> Self {
        Self { source, list }
    }

    /// Cards keep the backend's ranking and land in a single write.
    pub async fn run(&self) -> FlowOutcome {
        match self.source.flagged_providers().await {
            Ok(providers) => {
                let cards: Vec<ProviderCardView> = providers
                    .iter()
                    .map(ProviderCardView::from_summary)
                    .collect();
                tracing::debug!(cards = cards.len(), "flagged provider list rendered");
                self.list.write(RegionContent::ProviderList(cards));
                FlowOutcome::Rendered
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load flagged providers");
                self.list.write(RegionContent::provider_list_error());
                FlowOutcome::Failed
            }
        }
    }
}
