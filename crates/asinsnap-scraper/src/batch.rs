//! Batch coordination across many product identifiers.

use futures::stream::{self, StreamExt};

use crate::client::PageClient;
use crate::pipeline::{scrape_product, Outcome};
use crate::store::ProductStore;

/// Completions between progress log lines.
const PROGRESS_EVERY: usize = 100;

/// Tallies for one batch run. Skipped records count as succeeded, since
/// either way the record is on disk; `skipped` breaks out how many of
/// the successes never made a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

/// Scrapes every identifier in `product_ids` with at most `workers`
/// in flight at once, tallying outcomes as they complete in whatever
/// order they finish. One product's failure never stops the rest.
pub async fn run_batch(
    client: &PageClient,
    store: &ProductStore,
    product_ids: &[String],
    replace: bool,
    workers: usize,
) -> BatchSummary {
    let total = product_ids.len();
    let workers = workers.max(1);
    tracing::info!(total, workers, replace, "starting batch");

    let mut outcomes = stream::iter(product_ids)
        .map(|product_id| async move {
            let outcome = scrape_product(client, store, product_id, replace).await;
            (product_id.as_str(), outcome)
        })
        .buffer_unordered(workers);

    let mut succeeded = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut processed = 0usize;
    while let Some((product_id, outcome)) = outcomes.next().await {
        processed += 1;
        if processed % PROGRESS_EVERY == 0 {
            tracing::info!(processed, total, "batch progress");
        }
        match outcome {
            Outcome::Success => {
                succeeded += 1;
                tracing::debug!(product_id = %product_id, "scraped");
            }
            Outcome::Skipped => {
                succeeded += 1;
                skipped += 1;
                tracing::debug!(product_id = %product_id, "already on disk");
            }
            Outcome::Failed(err) => {
                failed += 1;
                tracing::warn!(
                    product_id = %product_id,
                    kind = ?err.kind(),
                    error = %err,
                    "product failed"
                );
            }
        }
    }

    let summary = BatchSummary {
        succeeded,
        skipped,
        failed,
        total,
    };
    tracing::info!(
        succeeded = summary.succeeded,
        skipped = summary.skipped,
        failed = summary.failed,
        total = summary.total,
        "batch finished"
    );
    summary
}
