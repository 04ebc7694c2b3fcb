//! # Derm Centre Binary
//!
//! Loads settings, assembles the content source and front desk, and serves the site.

use std::sync::Arc;

use anyhow::Context;
use configs::{LogFormat, LogSettings, Settings};
use dc_api::{router, ApiOptions, AppState};
use dc_content_static::StaticContent;
use dc_core::i18n::Catalog;
use dc_frontdesk_sim::{SimulatedFrontDesk, SimulatedOutcome};
use tracing_subscriber::EnvFilter;

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match log.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);

    let outcome = if settings.booking.fail_submissions {
        SimulatedOutcome::Fail
    } else {
        SimulatedOutcome::Succeed
    };
    let desk = Arc::new(SimulatedFrontDesk::new(settings.booking.latency(), outcome));
    let catalog = Catalog::embedded().context("loading translation catalogues")?;

    let options = ApiOptions {
        base_url: settings.site.base_url.clone(),
        secure_cookie: settings.session.secure_cookie,
        static_dir: settings.server.static_dir.clone(),
    };
    let state = AppState::new(
        Arc::new(StaticContent::new()),
        desk.clone(),
        desk,
        Arc::new(catalog),
        options,
    );
    let sweeper = state
        .sessions
        .spawn_sweeper(settings.session.idle_timeout(), settings.session.sweep_interval());

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, base_url = %settings.site.base_url, ?outcome, "Derm Centre listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    sweeper.abort();
    Ok(())
}
