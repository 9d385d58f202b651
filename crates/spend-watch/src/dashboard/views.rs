use serde::Serialize;

use super::domain::{ProviderDetail, ProviderDetailResponse, ProviderSummary, RiskFlag};
use super::format::{format_currency, normalize_label};

pub const UNKNOWN_PROVIDER: &str = "Unknown Provider";
pub const NO_SPECIALTY: &str = "No Specialty";
pub const SPECIALTY_NOT_AVAILABLE: &str = "N/A";
pub const TITLE_UNKNOWN: &str = "Title Unknown";
pub const NO_OFFICIAL_DETAILS: &str = "No official details found in registry.";
pub const LOADING_DETAILS: &str = "Loading details...";
pub const PROVIDER_LIST_ERROR: &str = "Error loading providers";

pub const WA_SOS_SEARCH_URL: &str = "https://ccfs.sos.wa.gov/#/search";
pub const NPPES_RECORD_URL: &str = "https://npiregistry.cms.hhs.gov/registry-search-results";

pub const ETHICS_NOTE: &str = "These flags represent statistical deviations from peer benchmarks \
(Specialty x HCPCS Code). They are hypotheses for professional investigation, not definitive \
declarations of wrongdoing. For civic groups: use these findings to request clarification or \
specific oversight from state agencies.";

/// Content held by one dashboard region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RegionContent {
    Text(String),
    Loading(String),
    Diagnostic(String),
    ProviderList(Vec<ProviderCardView>),
    ProviderDetail(Box<ProviderDetailView>),
}

impl RegionContent {
    pub fn loading_details() -> Self {
        Self::Loading(LOADING_DETAILS.to_string())
    }

    pub fn provider_list_error() -> Self {
        Self::Diagnostic(PROVIDER_LIST_ERROR.to_string())
    }

    pub fn provider_detail_error(npi: &str) -> Self {
        Self::Diagnostic(format!("Error loading details for {npi}"))
    }

    /// Plain-text projection of the region, used for logs and assertions.
    pub fn text(&self) -> String {
        match self {
            Self::Text(value) | Self::Loading(value) | Self::Diagnostic(value) => value.clone(),
            Self::ProviderList(cards) => cards
                .iter()
                .map(ProviderCardView::text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::ProviderDetail(detail) => detail.text(),
        }
    }
}

/// Invoked by the host when a provider card is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub npi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderCardView {
    pub name: String,
    pub specialty: String,
    pub flag_count: u64,
    pub npi: String,
    pub spend_label: String,
    pub activation: Activation,
}

impl ProviderCardView {
    pub fn from_summary(summary: &ProviderSummary) -> Self {
        Self {
            name: summary
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_PROVIDER.to_string()),
            specialty: summary
                .taxonomy_desc
                .clone()
                .unwrap_or_else(|| NO_SPECIALTY.to_string()),
            flag_count: summary.flag_count,
            npi: summary.npi.clone(),
            spend_label: format_currency(summary.total_spend, Some(0)),
            activation: Activation {
                npi: summary.npi.clone(),
            },
        }
    }

    fn text(&self) -> String {
        format!(
            "{} | {} | {} flags | NPI: {} | {}",
            self.name, self.specialty, self.flag_count, self.npi, self.spend_label
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderDetailView {
    pub identity: IdentityHeaderView,
    pub exclusion: ExclusionBadge,
    pub risk_signals: RiskSignalsView,
    pub spend: SpendBackgroundView,
    pub official: OfficialBlock,
    pub research_links: ResearchLinksView,
    pub ethics_note: &'static str,
}

impl ProviderDetailView {
    pub fn from_response(response: &ProviderDetailResponse) -> Self {
        let details = &response.details;
        Self {
            identity: IdentityHeaderView::from_detail(details),
            exclusion: ExclusionBadge::from_status(details.is_excluded),
            risk_signals: RiskSignalsView::from_flags(&response.flags),
            spend: SpendBackgroundView {
                total_label: format_currency(response.total_spend(), None),
                analyzed_periods: response.analyzed_periods(),
            },
            official: OfficialBlock::from_detail(details),
            research_links: ResearchLinksView::for_npi(&details.npi),
            ethics_note: ETHICS_NOTE,
        }
    }

    fn text(&self) -> String {
        let mut lines = vec![
            self.identity.name.clone(),
            self.identity.location.clone(),
            self.identity.specialty.clone(),
            format!("NPI: {}", self.identity.npi),
            self.exclusion.label().to_string(),
        ];
        for entry in &self.risk_signals.entries {
            lines.push(format!("{}: {}", entry.label, entry.reason));
        }
        lines.push(self.spend.total_label.clone());
        lines.push(self.spend.periods_label());
        match &self.official {
            OfficialBlock::Official(official) => {
                lines.push(format!("{} ({})", official.name, official.title));
                if let Some(phone) = &official.phone {
                    lines.push(phone.clone());
                }
                if let Some(address) = &official.mailing {
                    lines.push(address.street.clone());
                    lines.push(address.locality.clone());
                }
            }
            OfficialBlock::NotFound => lines.push(NO_OFFICIAL_DETAILS.to_string()),
        }
        for link in &self.research_links.links {
            lines.push(format!("{} <{}>", link.label, link.href));
        }
        lines.push(self.ethics_note.to_string());
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityHeaderView {
    pub name: String,
    pub location: String,
    pub specialty: String,
    pub npi: String,
}

impl IdentityHeaderView {
    fn from_detail(details: &ProviderDetail) -> Self {
        Self {
            name: details
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_PROVIDER.to_string()),
            location: format!("{}, {}", details.city, details.state),
            specialty: details
                .taxonomy_desc
                .clone()
                .unwrap_or_else(|| SPECIALTY_NOT_AVAILABLE.to_string()),
            npi: details.npi.clone(),
        }
    }
}

/// OIG LEIE exclusion status. Strictly binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionBadge {
    Excluded,
    Clear,
}

impl ExclusionBadge {
    pub const fn from_status(is_excluded: bool) -> Self {
        if is_excluded {
            Self::Excluded
        } else {
            Self::Clear
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excluded => "EXCLUDED (OIG LEIE)",
            Self::Clear => "No Exclusions Found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSignalsView {
    pub entries: Vec<RiskSignalEntry>,
}

impl RiskSignalsView {
    fn from_flags(flags: &[RiskFlag]) -> Self {
        Self {
            entries: flags
                .iter()
                .map(|flag| RiskSignalEntry {
                    label: normalize_label(&flag.flag_type),
                    reason: flag.reason.clone(),
                    score: flag.flag_score.filter(|score| score.is_finite()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSignalEntry {
    pub label: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendBackgroundView {
    pub total_label: String,
    pub analyzed_periods: usize,
}

impl SpendBackgroundView {
    pub fn periods_label(&self) -> String {
        format!("Analyzed periods: {} months", self.analyzed_periods)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OfficialBlock {
    Official(OfficialView),
    NotFound,
}

impl OfficialBlock {
    fn from_detail(details: &ProviderDetail) -> Self {
        let Some(name) = details.auth_official_name.clone() else {
            return Self::NotFound;
        };

        Self::Official(OfficialView {
            name,
            title: details
                .auth_official_title
                .clone()
                .unwrap_or_else(|| TITLE_UNKNOWN.to_string()),
            phone: details.auth_official_phone.clone(),
            mailing: details
                .mailing_address
                .as_ref()
                .map(|street| MailingAddressView {
                    street: street.clone(),
                    locality: format!(
                        "{}, {} {}",
                        details.mailing_city, details.mailing_state, details.mailing_zip
                    ),
                }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficialView {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing: Option<MailingAddressView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailingAddressView {
    pub street: String,
    pub locality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchLinksView {
    pub links: Vec<ResearchLink>,
}

impl ResearchLinksView {
    pub fn for_npi(npi: &str) -> Self {
        let nppes = url::Url::parse_with_params(NPPES_RECORD_URL, &[("number", npi)])
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("{NPPES_RECORD_URL}?number={npi}"));

        Self {
            links: vec![
                ResearchLink {
                    label: "WA SOS Business Search",
                    href: WA_SOS_SEARCH_URL.to_string(),
                },
                ResearchLink {
                    label: "Full NPPES Record",
                    href: nppes,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchLink {
    pub label: &'static str,
    pub href: String,
}
