use anyhow::Context;
use aotr_values::catalog::{FileCatalogSource, RemoteCatalogSource};
use aotr_values::config::CatalogLocation;
use aotr_values::{api, config::Config, db::init_db, sync_catalog, CatalogSource, Clock};
use aotr_values::{Repository, SystemClock};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Configuration error")?;
    let port = config.port;

    let pool = init_db(&config.database_path)
        .await
        .context("Failed to initialize database")?;
    let repo = Arc::new(Repository::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    if let Some(location) = &config.catalog {
        let source: Box<dyn CatalogSource> = match location {
            CatalogLocation::Url(url) => Box::new(RemoteCatalogSource::new(url.clone())),
            CatalogLocation::File(path) => Box::new(FileCatalogSource::new(path.clone())),
        };
        // Serve the stored catalog if the sync fails.
        if let Err(e) = sync_catalog(source.as_ref(), &repo, clock.as_ref()).await {
            tracing::warn!(source = %source.describe(), error = %e, "Catalog sync failed");
        }
    }

    tracing::info!(
        time_zone = config.restock.time_zone().name(),
        reset_hours = ?config.restock.schedule().hours(),
        "Restock schedule loaded"
    );

    let app = api::create_router(api::AppState::new(repo, config, clock));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
