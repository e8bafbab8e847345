//! Fetch → extract → persist pipeline for Amazon product detail pages.
//!
//! One JSON document per ASIN lands under the store root. The pipeline is
//! re-runnable: documents already on disk are skipped unless a replace is
//! requested, and a failed item never disturbs its siblings.

pub mod batch;
pub mod client;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod store;

pub use batch::{run_batch, BatchSummary};
pub use client::PageClient;
pub use error::{FailureKind, ScrapeError};
pub use extract::extract_product;
pub use pipeline::{scrape_product, Outcome};
pub use store::ProductStore;
