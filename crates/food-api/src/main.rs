//! # Food Delivery RS
//!
//! Backend for customers, restaurant owners and the platform admin.
//!
//! ## Usage
//!
//! ```bash
//! # Optional environment variables
//! export PORT=6001
//! export FOOD_STORE_PATH=data/delivery.json
//! export PLATFORM_CONFIG=config/platform.toml
//!
//! # Run the server
//! food-delivery
//! ```

use food_api::{routes, state::AppState};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Without a store there is nothing to serve
    let state = AppState::new().await.map_err(|e| {
        error!("Startup failed: {:#}", e);
        e
    })?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);

    let app = routes::create_router(state);

    info!("Food delivery API starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Register: POST http://{}/register", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Food Delivery RS
  ━━━━━━━━━━━━━━━━
  Accounts, approvals, restaurants, carts
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
