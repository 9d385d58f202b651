//! HTML serialization of dashboard regions.
//!
//! Only this module knows about markup. Every string that came from the
//! backend goes through [`escape_html`] before it is emitted.

use super::bootstrap::DashboardRegions;
use super::regions;
use super::target::MemoryTarget;
use super::views::{
    ExclusionBadge, OfficialBlock, OfficialView, ProviderCardView, ProviderDetailView,
    RegionContent, RiskSignalEntry, NO_OFFICIAL_DETAILS,
};

pub const PAGE_TITLE: &str = "Medicaid Spend Watch";

/// Route the host serves for a card's activation action.
pub fn activation_href(npi: &str) -> String {
    format!("/providers/{}", urlencoding::encode(npi))
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Serialize one region's content as an HTML fragment.
pub fn render_region(content: &RegionContent) -> String {
    match content {
        RegionContent::Text(value) => escape_html(value),
        RegionContent::Loading(message) => {
            format!(r#"<div class="region-loading">{}</div>"#, escape_html(message))
        }
        RegionContent::Diagnostic(message) => {
            format!(
                r#"<div class="region-error" role="alert">{}</div>"#,
                escape_html(message)
            )
        }
        RegionContent::ProviderList(cards) => cards.iter().map(render_card).collect(),
        RegionContent::ProviderDetail(detail) => render_detail(detail),
    }
}

fn render_card(card: &ProviderCardView) -> String {
    format!(
        concat!(
            r#"<a class="provider-card" href="{href}" data-npi="{npi}">"#,
            r#"<div class="card-head"><div class="card-name">{name}</div>"#,
            r#"<div class="card-flags">{flags} flags</div></div>"#,
            r#"<div class="card-specialty">{specialty}</div>"#,
            r#"<div class="card-foot"><span class="card-npi">NPI: {npi}</span>"#,
            r#"<span class="card-spend">{spend}</span></div>"#,
            "</a>"
        ),
        href = escape_html(&activation_href(&card.activation.npi)),
        npi = escape_html(&card.npi),
        name = escape_html(&card.name),
        flags = card.flag_count,
        specialty = escape_html(&card.specialty),
        spend = escape_html(&card.spend_label),
    )
}

fn render_detail(detail: &ProviderDetailView) -> String {
    let identity = &detail.identity;
    let mut out = String::from(r#"<div class="provider-detail">"#);

    out.push_str(&format!(
        concat!(
            r#"<header class="detail-identity"><div>"#,
            "<h2>{name}</h2>",
            r#"<div class="identity-meta"><span>{location}</span><span>{specialty}</span>"#,
            "<span>NPI: {npi}</span></div></div>",
            "{badge}</header>"
        ),
        name = escape_html(&identity.name),
        location = escape_html(&identity.location),
        specialty = escape_html(&identity.specialty),
        npi = escape_html(&identity.npi),
        badge = render_badge(detail.exclusion),
    ));

    out.push_str(r#"<section class="risk-signals"><h3>Detected Risk Signals</h3>"#);
    out.push_str(r#"<ul class="risk-signal-list">"#);
    for entry in &detail.risk_signals.entries {
        out.push_str(&render_signal(entry));
    }
    out.push_str("</ul></section>");

    out.push_str(&format!(
        concat!(
            r#"<section class="spend-background"><h3>Spend Background</h3>"#,
            "<p>Total recorded Medicaid spend for this organization within the monitor period.</p>",
            r#"<div class="spend-total">{total}</div>"#,
            r#"<div class="spend-periods">{periods}</div></section>"#
        ),
        total = escape_html(&detail.spend.total_label),
        periods = escape_html(&detail.spend.periods_label()),
    ));

    out.push_str(r#"<section class="official"><h3>Corporate Leadership &amp; Official</h3>"#);
    match &detail.official {
        OfficialBlock::Official(official) => out.push_str(&render_official(official)),
        OfficialBlock::NotFound => out.push_str(&format!(
            r#"<p class="official-missing">{}</p>"#,
            escape_html(NO_OFFICIAL_DETAILS)
        )),
    }
    out.push_str("</section>");

    out.push_str(r#"<section class="research-links"><h3>Research Links</h3>"#);
    for link in &detail.research_links.links {
        out.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_html(&link.href),
            escape_html(link.label)
        ));
    }
    out.push_str("</section>");

    out.push_str(&format!(
        r#"<section class="ethics-note"><h3>Ethics &amp; Stewardship Note</h3><p>{}</p></section>"#,
        escape_html(detail.ethics_note)
    ));

    out.push_str("</div>");
    out
}

fn render_badge(badge: ExclusionBadge) -> String {
    let class = match badge {
        ExclusionBadge::Excluded => "badge badge-excluded",
        ExclusionBadge::Clear => "badge badge-clear",
    };
    format!(
        r#"<div class="exclusion-status"><div class="exclusion-label">Exclusion Status</div><span class="{class}">{}</span></div>"#,
        escape_html(badge.label())
    )
}

fn render_signal(entry: &RiskSignalEntry) -> String {
    let score = entry
        .score
        .map(|score| format!(r#"<div class="signal-score">Score: {score:.2}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<li class="risk-signal"><div class="signal-type">{}</div><div class="signal-reason">{}</div>{score}</li>"#,
        escape_html(&entry.label),
        escape_html(&entry.reason),
    )
}

fn render_official(official: &OfficialView) -> String {
    let mut out = format!(
        concat!(
            r#"<div class="official-block"><div class="official-label">Authorized Official</div>"#,
            r#"<div class="official-name">{name}</div>"#,
            r#"<div class="official-title">{title}</div></div>"#
        ),
        name = escape_html(&official.name),
        title = escape_html(&official.title),
    );
    if let Some(phone) = &official.phone {
        out.push_str(&format!(
            r#"<div class="official-block"><div class="official-label">Contact</div><div class="official-phone">{}</div></div>"#,
            escape_html(phone)
        ));
    }
    if let Some(mailing) = &official.mailing {
        out.push_str(&format!(
            r#"<div class="official-block"><div class="official-label">Business Mailing Address</div><div class="official-address">{}<br>{}</div></div>"#,
            escape_html(&mailing.street),
            escape_html(&mailing.locality)
        ));
    }
    out
}

/// Serialize a full dashboard page from the regions' current content.
pub fn render_page(page: &DashboardRegions, footer: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title}</title></head><body>",
            r#"<header class="dashboard-header"><h1>{title}</h1>"#,
            r#"<dl class="stats">"#,
            r#"<div><dt>Total Spend</dt><dd id="{spend_id}">{spend}</dd></div>"#,
            r#"<div><dt>Providers</dt><dd id="{providers_id}">{providers}</dd></div>"#,
            r#"<div><dt>Risk Flags</dt><dd id="{flags_id}">{flags}</dd></div>"#,
            "</dl></header>",
            r#"<main class="dashboard-body">"#,
            r#"<aside><h2>Flagged Providers</h2><nav id="{list_id}">{list}</nav></aside>"#,
            r#"<section id="{detail_id}">{detail}</section>"#,
            "</main>",
            r#"<footer class="dashboard-footer">{footer}</footer>"#,
            "</body></html>\n"
        ),
        title = PAGE_TITLE,
        spend_id = regions::TOTAL_SPEND,
        spend = region_markup(&page.total_spend),
        providers_id = regions::TOTAL_PROVIDERS,
        providers = region_markup(&page.total_providers),
        flags_id = regions::TOTAL_FLAGS,
        flags = region_markup(&page.total_flags),
        list_id = regions::PROVIDER_LIST,
        list = region_markup(&page.provider_list),
        detail_id = regions::DETAIL_VIEW,
        detail = region_markup(&page.detail_view),
        footer = escape_html(footer),
    )
}

/// Current markup of a region, empty when nothing has been written yet.
pub fn region_markup(target: &MemoryTarget) -> String {
    target
        .current()
        .map(|content| render_region(&content))
        .unwrap_or_default()
}
