//! Retrieval-and-render core of the Medicaid spend compliance dashboard.
//!
//! Each dashboard region is owned by one flow: the summary flow fills the
//! three headline figures, the provider list flow fills the ranked list of
//! flagged providers, and the detail flow fills the provider detail panel.
//! Flows retrieve through a [`dashboard::DashboardSource`] and write typed
//! [`dashboard::RegionContent`] into explicit [`dashboard::RenderTarget`]
//! handles; markup is produced separately by [`dashboard::markup`].

pub mod config;
pub mod dashboard;
pub mod error;
pub mod telemetry;
