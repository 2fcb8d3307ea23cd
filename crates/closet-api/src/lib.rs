//! Closet API
//!
//! The HTTP surface of the Better Days Closet backend: CRUD endpoints for
//! every storefront/admin entity, the batch image upload endpoint, the
//! order notification feed, and the admin global search.

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod uploader;

use closet_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load configuration, initialize the application, and serve until shutdown.
pub async fn run() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (_state, router) = setup::initialize_app(config.clone()).await?;

    setup::server::start_server(&config, router).await
}
