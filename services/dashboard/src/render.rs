use crate::infra::{apply_api_base, dashboard_source, snapshot_footer};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use spend_watch::config::AppConfig;
use spend_watch::dashboard::markup::{region_markup, render_page};
use spend_watch::dashboard::{
    DashboardFlows, DashboardRegions, FlowOutcome, MemoryTarget, RegionContent,
};
use spend_watch::error::AppError;
use spend_watch::telemetry;
use std::io::Write;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    #[command(subcommand)]
    pub(crate) scope: RenderScope,
    /// Output format for the rendered regions
    #[arg(long, value_enum, default_value_t = RenderFormat::Html, global = true)]
    pub(crate) format: RenderFormat,
    /// Override the backend base URL (SPEND_WATCH_API_BASE)
    #[arg(long, global = true)]
    pub(crate) api_base: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum RenderScope {
    /// The three headline figures
    Summary,
    /// The flagged provider list
    Providers,
    /// The detail panel for one provider
    Provider {
        #[arg(long)]
        npi: String,
    },
    /// A full page, optionally with a provider selected
    Page {
        #[arg(long)]
        npi: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenderFormat {
    Html,
    Json,
    Text,
}

#[derive(Serialize)]
struct RegionSnapshot {
    region: &'static str,
    content: Option<RegionContent>,
}

impl RegionSnapshot {
    fn of(target: &MemoryTarget) -> Self {
        Self {
            region: target.name(),
            content: target.current(),
        }
    }
}

pub(crate) async fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    apply_api_base(&mut config.source, args.api_base)?;
    telemetry::init(&config.telemetry)?;

    let regions = DashboardRegions::new();
    let flows = DashboardFlows::new(dashboard_source(&config.source)?, &regions);

    let (outcomes, touched) = run_scope(&flows, &regions, &args.scope).await;
    for outcome in outcomes {
        if outcome != FlowOutcome::Rendered {
            warn!(?outcome, scope = ?args.scope, "flow did not render its data");
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        RenderFormat::Html => {
            if matches!(args.scope, RenderScope::Page { .. }) {
                out.write_all(render_page(&regions, &snapshot_footer()).as_bytes())?;
            } else {
                for target in &touched {
                    writeln!(out, "{}", region_markup(target))?;
                }
            }
        }
        RenderFormat::Json => {
            let snapshots: Vec<RegionSnapshot> =
                touched.iter().map(RegionSnapshot::of).collect();
            serde_json::to_writer_pretty(&mut out, &snapshots).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
        RenderFormat::Text => {
            for target in &touched {
                let text = target
                    .current()
                    .map(|content| content.text())
                    .unwrap_or_default();
                writeln!(out, "{}: {}", target.name(), text)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

async fn run_scope(
    flows: &DashboardFlows,
    regions: &DashboardRegions,
    scope: &RenderScope,
) -> (Vec<FlowOutcome>, Vec<MemoryTarget>) {
    match scope {
        RenderScope::Summary => (
            vec![flows.summary().run().await],
            vec![
                regions.total_spend.clone(),
                regions.total_providers.clone(),
                regions.total_flags.clone(),
            ],
        ),
        RenderScope::Providers => (
            vec![flows.providers().run().await],
            vec![regions.provider_list.clone()],
        ),
        RenderScope::Provider { npi } => (
            vec![flows.detail().show(npi).await],
            vec![regions.detail_view.clone()],
        ),
        RenderScope::Page { npi } => {
            let report = flows.bootstrap().await;
            let mut outcomes = vec![report.summary, report.providers];
            if let Some(npi) = npi {
                outcomes.push(flows.detail().show(npi).await);
            }
            (
                outcomes,
                vec![
                    regions.total_spend.clone(),
                    regions.total_providers.clone(),
                    regions.total_flags.clone(),
                    regions.provider_list.clone(),
                    regions.detail_view.clone(),
                ],
            )
        }
    }
}
