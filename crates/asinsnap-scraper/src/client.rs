//! HTTP client for product detail pages.

use crate::error::ScrapeError;

/// A bare client gets served a bot interstitial instead of the product
/// page, so requests carry a fixed browser session's header set. The
/// accept-encoding side of that set comes from the client's gzip/brotli
/// features, which also decode response bodies.
pub(crate) const BROWSER_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const REFERER: &str = "https://www.amazon.com/";
const CACHE_CONTROL: &str = "max-age=0";
const VIEWPORT_WIDTH: &str = "1080";

/// HTTP client issuing one GET per ASIN against `{base}/dp/{asin}`.
///
/// Deliberately carries no timeout and no retry policy: a failed fetch
/// surfaces as one failed item, and re-running the batch retries only
/// what is still missing on disk.
pub struct PageClient {
    client: reqwest::Client,
    base_url: String,
}

impl PageClient {
    /// Creates a `PageClient` targeting the given origin. Trailing slashes
    /// on the origin are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(base_url: &str) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_UA)
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the raw markup of one product detail page.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`]: connection, TLS, or body-read failure.
    /// - [`ScrapeError::UnexpectedStatus`]: any non-2xx response.
    pub async fn fetch_product_page(&self, asin: &str) -> Result<String, ScrapeError> {
        let url = self.product_url(asin);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(reqwest::header::REFERER, REFERER)
            .header(reqwest::header::CACHE_CONTROL, CACHE_CONTROL)
            .header("viewport-width", VIEWPORT_WIDTH)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }

    fn product_url(&self, asin: &str) -> String {
        format!("{}/dp/{asin}?language=en_US&currency=USD", self.base_url)
    }
}
