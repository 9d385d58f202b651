use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::oneshot;

use crate::dashboard::domain::{
    ProviderDetail, ProviderDetailResponse, ProviderSummary, RiskFlag, SpendTrendPoint,
    SummaryMetrics,
};
use crate::dashboard::source::{DashboardSource, FetchError};
use crate::dashboard::target::MemoryTarget;
use crate::dashboard::views::RegionContent;

pub(super) fn unavailable(path: &str) -> FetchError {
    FetchError::Status {
        url: format!("http://backend.test{path}"),
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub(super) fn metrics() -> SummaryMetrics {
    SummaryMetrics {
        total_spend: 1_234_567.89,
        total_providers: 42,
        total_flags: 1_337,
    }
}

pub(super) fn summary(npi: &str, name: Option<&str>, taxonomy: Option<&str>) -> ProviderSummary {
    ProviderSummary {
        npi: npi.to_string(),
        name: name.map(str::to_string),
        taxonomy_desc: taxonomy.map(str::to_string),
        flag_count: 3,
        total_spend: 48_210_993.42,
    }
}

pub(super) fn detail_response(npi: &str, name: &str) -> ProviderDetailResponse {
    ProviderDetailResponse {
        details: ProviderDetail {
            npi: npi.to_string(),
            name: Some(name.to_string()),
            city: "VANCOUVER".to_string(),
            state: "WA".to_string(),
            taxonomy_desc: Some("Personal Care Attendant".to_string()),
            is_excluded: false,
            auth_official_name: None,
            auth_official_title: None,
            auth_official_phone: None,
            mailing_address: None,
            mailing_city: "VANCOUVER".to_string(),
            mailing_state: "WA".to_string(),
            mailing_zip: "98661".to_string(),
        },
        flags: vec![RiskFlag {
            flag_type: "EXTREME_CODE_CONCENTRATION".to_string(),
            reason: "96% of spend billed under a single HCPCS code".to_string(),
            flag_score: None,
        }],
        spend_trend: vec![
            SpendTrendPoint {
                period: None,
                spend: 100.0,
            },
            SpendTrendPoint {
                period: None,
                spend: 250.5,
            },
            SpendTrendPoint {
                period: None,
                spend: 0.0,
            },
        ],
    }
}

/// Source answering from fixed data; missing data fails like a 503.
#[derive(Default)]
pub(super) struct StubSource {
    pub(super) summary: Option<SummaryMetrics>,
    pub(super) providers: Option<Vec<ProviderSummary>>,
    pub(super) details: HashMap<String, ProviderDetailResponse>,
    pub(super) calls: Mutex<Vec<String>>,
}

impl StubSource {
    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: &str) {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(call.to_string());
    }
}

#[async_trait]
impl DashboardSource for StubSource {
    async fn summary(&self) -> Result<SummaryMetrics, FetchError> {
        self.record("summary");
        self.summary
            .clone()
            .ok_or_else(|| unavailable("/api/summary"))
    }

    async fn flagged_providers(&self) -> Result<Vec<ProviderSummary>, FetchError> {
        self.record("flagged-providers");
        self.providers
            .clone()
            .ok_or_else(|| unavailable("/api/flagged-providers"))
    }

    async fn provider_detail(&self, npi: &str) -> Result<ProviderDetailResponse, FetchError> {
        self.record(&format!("provider/{npi}"));
        self.details
            .get(npi)
            .cloned()
            .ok_or_else(|| unavailable(&format!("/api/provider/{npi}")))
    }
}

/// Source whose detail responses for chosen NPIs wait until released.
#[derive(Default)]
pub(super) struct GatedSource {
    pub(super) details: HashMap<String, ProviderDetailResponse>,
    pub(super) gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl GatedSource {
    pub(super) fn gate(&self, npi: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .expect("gates mutex poisoned")
            .insert(npi.to_string(), rx);
        tx
    }
}

#[async_trait]
impl DashboardSource for GatedSource {
    async fn summary(&self) -> Result<SummaryMetrics, FetchError> {
        Err(unavailable("/api/summary"))
    }

    async fn flagged_providers(&self) -> Result<Vec<ProviderSummary>, FetchError> {
        Err(unavailable("/api/flagged-providers"))
    }

    async fn provider_detail(&self, npi: &str) -> Result<ProviderDetailResponse, FetchError> {
        let gate = self
            .gates
            .lock()
            .expect("gates mutex poisoned")
            .remove(npi);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.details
            .get(npi)
            .cloned()
            .ok_or_else(|| unavailable(&format!("/api/provider/{npi}")))
    }
}

pub(super) fn handle(target: &MemoryTarget) -> Arc<MemoryTarget> {
    Arc::new(target.clone())
}

pub(super) fn current_text(target: &MemoryTarget) -> String {
    target
        .current()
        .as_ref()
        .map(RegionContent::text)
        .unwrap_or_default()
}
