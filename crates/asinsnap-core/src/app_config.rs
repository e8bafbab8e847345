use std::path::PathBuf;

/// Runtime configuration, resolved once at startup and read-only after.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory receiving one `<asin>.json` document per product.
    pub output_dir: PathBuf,
    /// Origin the product-page path template is joined against. Pointing
    /// this at a local server is how integration tests run offline.
    pub base_url: String,
    /// Concurrent pipeline workers; `0` means use available parallelism.
    pub workers: usize,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl AppConfig {
    /// Worker count with `0` resolved to the machine's available
    /// parallelism (minimum 1 when that cannot be determined).
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        } else {
            self.workers
        }
    }
}
