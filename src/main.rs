use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use car_rental_pricing::booking::PgBookingStore;
use car_rental_pricing::cache::{start_cache_warmer, PricingCache};
use car_rental_pricing::catalog::PgCatalogStore;
use car_rental_pricing::config::Config;
use car_rental_pricing::pricing::{PgPricingStore, PricingStore};
use car_rental_pricing::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let store: Arc<dyn PricingStore> = Arc::new(PgPricingStore::new(pool.clone()));
    let catalog = Arc::new(PgCatalogStore::new(pool.clone()));
    let bookings = Arc::new(PgBookingStore::new(pool));
    let cache = PricingCache::new(config.settings_cache_ttl, config.reference_cache_ttl);

    tokio::spawn(start_cache_warmer(
        cache.clone(),
        store.clone(),
        config.cache_refresh_interval,
    ));

    let state = AppState::new(store, catalog, bookings, cache);
    let router = app(state, config.request_timeout);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutting down");
}
