//! The `scrape` command: load identifiers from a CSV file, fan the batch
//! out across the worker pool, and report totals.
//!
//! Per-product failures are logged and tallied rather than propagated, so
//! one bad page never aborts the run or changes the exit status. Errors
//! returned here are startup problems only (unreadable CSV, missing
//! column, unusable output directory).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use asinsnap_core::AppConfig;
use asinsnap_scraper::{run_batch, PageClient, ProductStore};

pub(crate) async fn run(
    config: &AppConfig,
    input: &Path,
    id_column: &str,
    replace: bool,
    workers: Option<usize>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let product_ids = load_product_ids(input, id_column)?;
    println!("Total number of products: {}", product_ids.len());

    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
    let store = ProductStore::open(output_dir)?;
    let client = PageClient::new(&config.base_url)?;
    let workers = workers.unwrap_or_else(|| config.effective_workers());
    tracing::debug!(
        output_dir = %store.root().display(),
        workers,
        replace,
        "scrape configured"
    );

    let summary = run_batch(&client, &store, &product_ids, replace, workers).await;

    println!(
        "Successfully scraped {}/{} products",
        summary.succeeded, summary.total
    );
    Ok(())
}

/// Reads the identifier column out of `input`, keeping the first
/// occurrence of each identifier in file order. Blank cells are skipped.
fn load_product_ids(input: &Path, id_column: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let headers = reader.headers().context("failed to read CSV headers")?;
    let column = headers
        .iter()
        .position(|name| name == id_column)
        .with_context(|| format!("no '{id_column}' column in {}", input.display()))?;

    let mut seen = HashSet::new();
    let mut product_ids = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to read CSV record")?;
        let Some(id) = record.get(column) else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() {
            continue;
        }
        if seen.insert(id.to_owned()) {
            product_ids.push(id.to_owned());
        }
    }
    Ok(product_ids)
}
