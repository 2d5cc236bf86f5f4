//! Catalog loader: fetch the reference page, extract the captioned table and
//! either print it or replace the stored catalog with it.

use tracing::info;

use crate::catalog::{repo::CatalogStore, repo_types::NewCatalogEntry};
use crate::config::ScraperConfig;
use crate::error::LoaderError;

pub mod cli;
pub mod console;
pub mod extract;
pub mod fetch;

pub use extract::{ParsedRow, ScrapedTable};

/// Where a run delivers the extracted table.
pub enum Target<'a> {
    Console,
    Store(&'a dyn CatalogStore),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Rendered table, ready to print.
    Printed(String),
    /// Number of catalog rows written.
    Persisted(usize),
}

/// Fetch and parse only. Nothing is written anywhere.
pub async fn scrape(client: &reqwest::Client, config: &ScraperConfig) -> Result<ScrapedTable, LoaderError> {
    let html = fetch::fetch_page(client, &config.url).await?;
    let table = extract::extract_table(&html, &config.caption)?;
    info!(
        caption = %config.caption,
        headers = table.headers.len(),
        rows = table.rows.len(),
        "table extracted"
    );
    Ok(table)
}

/// One complete loader run. Fails before touching storage if the page or
/// any row is unusable.
pub async fn run(
    client: &reqwest::Client,
    config: &ScraperConfig,
    target: Target<'_>,
) -> Result<Outcome, LoaderError> {
    let table = scrape(client, config).await?;

    match target {
        Target::Console => Ok(Outcome::Printed(console::render(
            &config.caption,
            &table.headers,
            &table.rows,
        ))),
        Target::Store(store) => {
            let entries: Vec<NewCatalogEntry> =
                table.rows.into_iter().map(NewCatalogEntry::from).collect();
            let written = store.replace_all(&entries).await?;
            info!(written, "catalog replaced");
            Ok(Outcome::Persisted(written))
        }
    }
}
