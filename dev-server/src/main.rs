//! Development server for dashboard UI work
//!
//! Serves the fixture KPI dataset from the mock backend on a fixed port so
//! the UI can be run against it with `trunk serve`. Reads `IP_ADDRESS` and
//! `PORT` from the environment or a `.env` file.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::{Config, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();

    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting dashboard development server");

    let config = Config::from_env()?;
    let app = test_helpers::spawn_app_on(config).await;

    // Make sure the server answers before pointing the UI at it
    if let Err(e) = app.client.health_check().await {
        telemetry::log_error(e);
        anyhow::bail!("Mock backend did not come up on port {}", app.port);
    }

    let sample = app
        .client
        .list_implantation_suivi(&payloads::ListQuery::new(1, 0))
        .await?;
    info!("✅ API server running on {}", app.address());
    info!("   {} implantation rows available", sample.count);

    info!("🎯 Development server ready!");
    info!("   API: {}/api/", app.address());
    info!(
        "   UI:  cd ui && BACKEND_URL={} trunk serve",
        app.address()
    );
    info!("");
    app.dataset().print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
