//! Per-product pipeline: fetch, extract, persist.

use crate::client::PageClient;
use crate::error::ScrapeError;
use crate::extract::extract_product;
use crate::store::ProductStore;

/// Terminal state of one product's run through the pipeline.
#[derive(Debug)]
pub enum Outcome {
    /// Fetched, extracted, and written to disk.
    Success,
    /// A record already existed on disk and `replace` was off; no
    /// request was made.
    Skipped,
    Failed(ScrapeError),
}

impl Outcome {
    /// Successes and skips both mean a record is on disk.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Success | Self::Skipped)
    }
}

/// Runs one product identifier through the pipeline. An error at any
/// stage terminates this product only; it is folded into the returned
/// outcome and never propagates to the caller.
pub async fn scrape_product(
    client: &PageClient,
    store: &ProductStore,
    product_id: &str,
    replace: bool,
) -> Outcome {
    if !replace && store.contains(product_id) {
        tracing::debug!(product_id = %product_id, "record already on disk, skipping");
        return Outcome::Skipped;
    }

    let html = match client.fetch_product_page(product_id).await {
        Ok(html) => html,
        Err(err) => return Outcome::Failed(err),
    };

    let record = match extract_product(&html) {
        Ok(record) => record,
        Err(err) => return Outcome::Failed(err),
    };

    match store.write(product_id, &record).await {
        Ok(()) => Outcome::Success,
        Err(err) => Outcome::Failed(err),
    }
}
