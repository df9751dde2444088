//! Merchant Insights - Shopify store dashboard

use anyhow::Result;
use merchant_insights::config::AppConfig;
use merchant_insights::routes::{build_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = AppConfig::from_env()?;
    if config.session.is_none() {
        tracing::info!("No SHOPIFY_SHOP configured, reading sessions from request headers");
    }
    let state = AppState {
        client: config.admin_client(),
        sessions: config.session_provider(),
        allowed_origins: config.allowed_origins.clone(),
    };
    let app = build_router(state);

    tracing::info!("🚀 Merchant Insights listening on 0.0.0.0:{} (Admin API {})", config.port, config.api_version);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}
