use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinedex_import::catalog::resolve_titles;
use cinedex_import::importer::import_titles;
use cinedex_import::omdb::{OmdbClient, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinedex_import=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let api_key = std::env::var("OMDB_API_KEY").context("OMDB_API_KEY must be set")?;
    let base_url = std::env::var("OMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

    let pool = cinedex_db::create_pool(&database_url, 2)
        .await
        .context("Failed to connect to database")?;
    cinedex_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let titles = resolve_titles(std::env::args().skip(1));
    tracing::info!(count = titles.len(), "Starting import");

    let client = OmdbClient::new(base_url, api_key);
    let summary = import_titles(&pool, &client, &titles).await;

    tracing::info!(
        imported = summary.imported,
        failed = summary.failed.len(),
        "Import finished"
    );
    for (title, error) in &summary.failed {
        tracing::warn!(title = %title, error = %error, "Not imported");
    }

    pool.close().await;
    Ok(())
}
