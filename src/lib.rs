//! Client-side engine for the clients/projects dashboard.
//!
//! The `data` feature exposes the pure layers: typed entities, form drafts
//! and the query engine. The default `client` feature adds the transport,
//! the per-entity sync controller and configuration loading.

pub mod domain;
pub mod error_conversions;
pub mod forms;
pub mod query;

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "client")]
pub mod dto;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod services;

#[cfg(feature = "client")]
use std::rc::Rc;

#[cfg(feature = "client")]
use crate::api::http::HttpTransport;
#[cfg(feature = "client")]
use crate::dto::dashboard::DashboardSummary;
#[cfg(feature = "client")]
use crate::models::config::DeskConfig;
#[cfg(feature = "client")]
use crate::services::dashboard::{Dashboard, LoadReport};

/// Fetches both collections from the configured API and returns the summary
/// alongside the per-collection load outcome.
#[cfg(feature = "client")]
pub async fn run(config: &DeskConfig) -> (DashboardSummary, LoadReport) {
    let transport = Rc::new(HttpTransport::new(config.api_base_url.as_str()));
    log::info!("Loading dashboard from {}", transport.base_url());

    let dashboard = Dashboard::new(transport, &config.session_user());
    let report = dashboard.load_all().await;
    (dashboard.summary(), report)
}
