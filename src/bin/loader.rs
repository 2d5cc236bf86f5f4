use anyhow::Context;
use tracing::info;
use typecatalog::{
    catalog::repo::PgCatalogStore,
    config::AppConfig,
    db,
    loader::{self, cli, Outcome, Target},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = AppConfig::from_env()?;
    let console = match cli::console_requested(&config.scraper.key, std::env::args_os()) {
        Ok(v) => v,
        Err(e) => e.exit(),
    };

    let client = reqwest::Client::builder()
        .build()
        .context("build HTTP client")?;

    if console {
        info!(url = %config.scraper.url, "console mode");
        if let Outcome::Printed(table) = loader::run(&client, &config.scraper, Target::Console).await? {
            println!("{table}");
        }
        return Ok(());
    }

    info!(url = %config.scraper.url, "persist mode");
    let pool = db::connect(&config.db).await?;
    db::migrate(&pool).await;
    let store = PgCatalogStore::new(pool.clone());

    let outcome = loader::run(&client, &config.scraper, Target::Store(&store)).await;
    pool.close().await;

    if let Outcome::Persisted(written) = outcome? {
        println!("Catalog replaced with {written} entries");
    }
    Ok(())
}
