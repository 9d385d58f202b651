//! Snapshots returned by the spend monitor backend.
//!
//! Records are render-only: they are deserialized, mapped into views and
//! dropped. Optional fields accept both a missing key and JSON `null`.

use serde::{Deserialize, Serialize};

/// Headline figures for the monitored population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_spend: f64,
    pub total_providers: i64,
    pub total_flags: i64,
}

/// One entry of the ranked flagged-provider list. The backend decides rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub npi: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub taxonomy_desc: Option<String>,
    pub flag_count: u64,
    pub total_spend: f64,
}

/// Registry record for a single provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDetail {
    pub npi: String,
    #[serde(default)]
    pub name: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub taxonomy_desc: Option<String>,
    pub is_excluded: bool,
    #[serde(default)]
    pub auth_official_name: Option<String>,
    #[serde(default)]
    pub auth_official_title: Option<String>,
    #[serde(default)]
    pub auth_official_phone: Option<String>,
    #[serde(default)]
    pub mailing_address: Option<String>,
    pub mailing_city: String,
    pub mailing_state: String,
    pub mailing_zip: String,
}

/// A statistical anomaly attached to a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    /// Machine token such as `OUTLIER_HIGH_SPEND`.
    pub flag_type: String,
    pub reason: String,
    #[serde(default)]
    pub flag_score: Option<f64>,
}

/// Spend for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendTrendPoint {
    /// Period key exactly as the backend sent it (date string or timestamp).
    #[serde(default)]
    pub period: Option<serde_json::Value>,
    pub spend: f64,
}

/// Everything the detail panel needs, returned by one retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDetailResponse {
    pub details: ProviderDetail,
    #[serde(default)]
    pub flags: Vec<RiskFlag>,
    #[serde(default)]
    pub spend_trend: Vec<SpendTrendPoint>,
}

impl ProviderDetailResponse {
    /// Full-precision total over every reported period.
    pub fn total_spend(&self) -> f64 {
        self.spend_trend.iter().map(|point| point.spend).sum()
    }

    pub fn analyzed_periods(&self) -> usize {
        self.spend_trend.len()
    }
}
