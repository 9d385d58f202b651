//! Dashboard regions and the flows that fill them.

pub mod bootstrap;
pub mod detail;
pub mod domain;
pub mod format;
pub mod markup;
pub mod providers;
pub mod source;
pub mod summary;
pub mod target;
pub mod views;

#[cfg(test)]
mod tests;

use serde::Serialize;

pub use bootstrap::{BootstrapReport, DashboardFlows, DashboardRegions};
pub use detail::ProviderDetailFlow;
pub use domain::{
    ProviderDetail, ProviderDetailResponse, ProviderSummary, RiskFlag, SpendTrendPoint,
    SummaryMetrics,
};
pub use format::{format_count, format_currency, normalize_label};
pub use providers::ProviderListFlow;
pub use source::{DashboardSource, FetchError, HttpDashboardSource};
pub use summary::{SummaryFlow, SummaryTargets};
pub use target::{MemoryTarget, RenderTarget};
pub use views::{
    Activation, ExclusionBadge, OfficialBlock, ProviderCardView, ProviderDetailView,
    RegionContent,
};

/// Region names used by the dashboard page.
pub mod regions {
    pub const TOTAL_SPEND: &str = "total-spend";
    pub const TOTAL_PROVIDERS: &str = "total-providers";
    pub const TOTAL_FLAGS: &str = "total-flags";
    pub const PROVIDER_LIST: &str = "provider-list";
    pub const DETAIL_VIEW: &str = "detail-view";
}

/// How one flow invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOutcome {
    /// The retrieved data was written to the flow's region(s).
    Rendered,
    /// Retrieval failed; the flow applied its failure rendering.
    Failed,
    /// A newer invocation of the same flow started first; nothing was written.
    Superseded,
}
