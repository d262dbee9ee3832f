use anyhow::Context;
use bsnl_balance_api::circles::{PostpaidDirectory, PrepaidDirectory};
use bsnl_balance_api::config::Config;
use bsnl_balance_api::handlers::{self, AppState};
use bsnl_balance_api::portal_client::PortalClient;
use bsnl_balance_api::services::BalanceService;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Both circle directories are loaded before the listener is bound, so no
/// request is ever served against a partially populated directory. A failure
/// to load either feed aborts startup.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bsnl_balance_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let client = PortalClient::new(&config)?;
    tracing::info!("Portal client initialized: {}", config.vendor_url);

    let prepaid = PrepaidDirectory::load(&client, &config.prepaid_circles_url)
        .await
        .context("Error in fetching prepaid circles")?;
    let postpaid = PostpaidDirectory::load(&client, &config.postpaid_circles_url)
        .await
        .context("Error in fetching postpaid circles")?;

    let app_state = Arc::new(AppState {
        config: config.clone(),
        service: BalanceService::new(client, Arc::new(prepaid)),
        postpaid: Arc::new(postpaid),
    });

    let app = handlers::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting Server on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
