use std::sync::{Arc, Mutex, MutexGuard};

use super::source::DashboardSource;
use super::target::RenderTarget;
use super::views::{Activation, ProviderDetailView, RegionContent};
use super::FlowOutcome;

/// Fills the provider detail panel from `/api/provider/{npi}`.
///
/// Every call to [`ProviderDetailFlow::show`] takes a generation token. A call
/// only writes its result while its token is still the newest, so when two
/// selections overlap the panel ends on the provider selected last, whatever
/// order the responses arrive in. The superseded retrieval still runs to
/// completion; its result is dropped.
pub struct ProviderDetailFlow {
    source: Arc<dyn DashboardSource>,
    detail: Arc<dyn RenderTarget>,
    generation: Mutex<u64>,
}

impl ProviderDetailFlow {
    pub fn new(source: Arc<dyn DashboardSource>, detail: Arc<dyn RenderTarget>) -> Self {
        Self {
            source,
            detail,
            generation: Mutex::new(0),
        }
    }

    pub async fn activate(&self, activation: &Activation) -> FlowOutcome {
        self.show(&activation.npi).await
    }

    pub async fn show(&self, npi: &str) -> FlowOutcome {
        let token = {
            let mut generation = self.generation();
            *generation += 1;
            self.detail.write(RegionContent::loading_details());
            *generation
        };

        let result = self.source.provider_detail(npi).await;

        // Held across the check and the write so a newer call cannot slip in
        // between them.
        let generation = self.generation();
        if *generation != token {
            tracing::debug!(
                npi,
                token,
                latest = *generation,
                "discarding superseded provider detail"
            );
            return FlowOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                let view = ProviderDetailView::from_response(&response);
                tracing::debug!(
                    npi,
                    flags = view.risk_signals.entries.len(),
                    periods = view.spend.analyzed_periods,
                    "provider detail rendered"
                );
                self.detail.write(RegionContent::ProviderDetail(Box::new(view)));
                FlowOutcome::Rendered
            }
            Err(err) => {
                tracing::error!(npi, error = %err, "failed to load provider detail");
                self.detail.write(RegionContent::provider_detail_error(npi));
                FlowOutcome::Failed
            }
        }
    }

    fn generation(&self) -> MutexGuard<'_, u64> {
        self.generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
