use std::sync::Arc;

use serde::Serialize;

use super::detail::ProviderDetailFlow;
use super::providers::ProviderListFlow;
use super::regions;
use super::source::DashboardSource;
use super::summary::{SummaryFlow, SummaryTargets};
use super::target::MemoryTarget;
use super::views::{Activation, RegionContent};
use super::FlowOutcome;

pub const SUMMARY_PLACEHOLDER: &str = "--";
pub const LIST_PLACEHOLDER: &str = "Loading providers...";
pub const DETAIL_PLACEHOLDER: &str = "Select a flagged provider to review the evidence.";

/// Outcome of the page-ready sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub summary: FlowOutcome,
    pub providers: FlowOutcome,
}

/// Run the summary flow to completion, then the provider list flow.
///
/// The headline figures settle before the larger list paints.
pub async fn bootstrap(summary: &SummaryFlow, providers: &ProviderListFlow) -> BootstrapReport {
    let summary = summary.run().await;
    let providers = providers.run().await;
    tracing::info!(?summary, ?providers, "dashboard bootstrap finished");
    BootstrapReport { summary, providers }
}

/// The five regions of one dashboard page, seeded with their placeholders.
#[derive(Debug, Clone)]
pub struct DashboardRegions {
    pub total_spend: MemoryTarget,
    pub total_providers: MemoryTarget,
    pub total_flags: MemoryTarget,
    pub provider_list: MemoryTarget,
    pub detail_view: MemoryTarget,
}

impl DashboardRegions {
    pub fn new() -> Self {
        let placeholder = || RegionContent::Text(SUMMARY_PLACEHOLDER.to_string());
        Self {
            total_spend: MemoryTarget::with_initial(regions::TOTAL_SPEND, placeholder()),
            total_providers: MemoryTarget::with_initial(regions::TOTAL_PROVIDERS, placeholder()),
            total_flags: MemoryTarget::with_initial(regions::TOTAL_FLAGS, placeholder()),
            provider_list: MemoryTarget::with_initial(
                regions::PROVIDER_LIST,
                RegionContent::Loading(LIST_PLACEHOLDER.to_string()),
            ),
            detail_view: MemoryTarget::with_initial(
                regions::DETAIL_VIEW,
                RegionContent::Text(DETAIL_PLACEHOLDER.to_string()),
            ),
        }
    }

    pub fn summary_targets(&self) -> SummaryTargets {
        SummaryTargets {
            total_spend: Arc::new(self.total_spend.clone()),
            total_providers: Arc::new(self.total_providers.clone()),
            total_flags: Arc::new(self.total_flags.clone()),
        }
    }
}

impl Default for DashboardRegions {
    fn default() -> Self {
        Self::new()
    }
}

/// The three flows of one dashboard page, wired to its regions.
pub struct DashboardFlows {
    summary: SummaryFlow,
    providers: ProviderListFlow,
    detail: ProviderDetailFlow,
}

impl DashboardFlows {
    pub fn new(source: Arc<dyn DashboardSource>, regions: &DashboardRegions) -> Self {
        Self {
            summary: SummaryFlow::new(source.clone(), regions.summary_targets()),
            providers: ProviderListFlow::new(
                source.clone(),
                Arc::new(regions.provider_list.clone()),
            ),
            detail: ProviderDetailFlow::new(source, Arc::new(regions.detail_view.clone())),
        }
    }

    pub async fn bootstrap(&self) -> BootstrapReport {
        bootstrap(&self.summary, &self.providers).await
    }

    pub async fn activate(&self, activation: &Activation) -> FlowOutcome {
        self.detail.activate(activation).await
    }

    pub fn summary(&self) -> &SummaryFlow {
        &self.summary
    }

    pub fn providers(&self) -> &ProviderListFlow {
        &self.providers
    }

    pub fn detail(&self) -> &ProviderDetailFlow {
        &self.detail
    }
}
