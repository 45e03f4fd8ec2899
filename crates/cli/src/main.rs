use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitetrack_client::{ClientConfig, RestBackend};
use sitetrack_store::{Dashboard, EntityStore, TracingNotifier};

mod config;
mod render;

use config::{DashboardConfig, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let client_config = ClientConfig::from_env().context("Invalid client configuration")?;
    let dashboard_config = DashboardConfig::from_env().context("Invalid dashboard configuration")?;
    tracing::info!(
        api_url = %client_config.api_url,
        timeout_secs = client_config.request_timeout_secs,
        scope = %dashboard_config.scope,
        sort = %dashboard_config.sort,
        "Loaded configuration"
    );

    // --- Store ---
    let backend = Arc::new(RestBackend::new(&client_config)?);
    let store = EntityStore::new(backend, Arc::new(TracingNotifier));

    let seeded = store
        .ensure_seeded()
        .await
        .context("Failed to seed the work type catalog")?;
    if seeded > 0 {
        tracing::info!(count = seeded, "Installed default work types");
    }
    store
        .refresh_all()
        .await
        .context("Failed to load data from the backend")?;

    // --- Dashboard ---
    let dashboard = Dashboard::new(
        dashboard_config.scope,
        dashboard_config.filter,
        dashboard_config.sort,
    );
    let today = chrono::Local::now().date_naive();
    let snapshot = store.snapshot().await;
    let view = dashboard.view(&snapshot, today);

    if dashboard_config.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let summaries = dashboard.project_summaries(&snapshot);
        print!("{}", render::render(&view, &summaries, &snapshot.lookup()));
    }

    Ok(())
}
