use std::error::Error;

use toado::{
    app_state::AppState, data_access::data_context::DataContext, map_routes, settings::Settings,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toado_server=info,toado=info,tower_http=debug".into()),
        )
        .init();

    // ── Settings ───────────────────────────────────────────────
    let settings = Settings::load()?;
    info!(
        title = %settings.app_title,
        version = %settings.app_version,
        database = %settings.database_url,
        "settings loaded"
    );
    if settings.email_enabled {
        warn!(from = %settings.email_from, "email_enabled is set but email delivery is not implemented");
    }
    if settings.rate_limit_enabled {
        warn!(
            requests = settings.rate_limit_requests,
            period_secs = settings.rate_limit_period,
            "rate_limit_enabled is set but rate limiting is not implemented"
        );
    }

    // ── Storage ────────────────────────────────────────────────
    let data_context = DataContext::new(&settings.database_url)?;

    // ── Router ─────────────────────────────────────────────────
    let addr = settings.socket_address();
    let app = map_routes(AppState::new(data_context, settings));

    // ── Start ──────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{addr}");
    info!("  Todos:  http://{addr}/todos");
    info!("  Health: http://{addr}/health/check_status");

    axum::serve(listener, app).await?;
    Ok(())
}
