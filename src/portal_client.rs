use crate::config::Config;
use crate::errors::{AppError, FetchError};
use crate::models::BalanceRequest;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left as-is when escaping a URL path segment. Everything else,
/// including `/`, `?`, quotes and braces, is percent-encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Client for the prepaid balance portal and its circle feeds.
///
/// Holds a single pooled `reqwest::Client`; cloning is cheap.
#[derive(Clone)]
pub struct PortalClient {
    client: reqwest::Client,
    vendor_url: String,
    origin: String,
    referer: String,
}

impl PortalClient {
    /// Creates a new `PortalClient`.
    ///
    /// Every call made through it is bounded by the configured timeout.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.vendor_timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create portal client: {}", e)))?;

        Ok(Self {
            client,
            vendor_url: config.vendor_url.clone(),
            origin: config.vendor_origin.clone(),
            referer: config.vendor_referer.clone(),
        })
    }

    /// Downloads a circle feed, busting intermediate caches with a nanosecond
    /// timestamp in the query string.
    pub async fn fetch_feed(&self, feed_url: &str) -> Result<Vec<u8>, FetchError> {
        let url = cache_busted(feed_url, chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0));
        tracing::info!("Fetching circle feed: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Posts a balance inquiry and returns the raw vendor body.
    ///
    /// The body is returned whatever the HTTP status; only connection,
    /// timeout and read failures are errors. Dropping the returned future
    /// aborts the outbound request.
    pub async fn submit_balance_request(
        &self,
        request: &BalanceRequest,
    ) -> Result<Vec<u8>, AppError> {
        let body = encode_post_data(request)?;
        tracing::info!(
            "Submitting balance inquiry for {} (circle '{}')",
            request.phone_no,
            request.circle_code
        );

        let response = self
            .client
            .post(&self.vendor_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Origin", &self.origin)
            .header("Referer", &self.referer)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Balance request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Vendor portal answered with status {}", status);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read vendor response: {}", e)))?;
        tracing::debug!("Vendor response: {}", String::from_utf8_lossy(&bytes));

        Ok(bytes.to_vec())
    }
}

/// Encodes `request` as `postData=<json>` and path-escapes the whole string.
///
/// The portal expects path-segment escaping here, not form encoding, so
/// `=`, `:` and `,` stay literal while quotes and braces are encoded.
pub fn encode_post_data(request: &BalanceRequest) -> Result<String, AppError> {
    let json = serde_json::to_string(request).map_err(|e| AppError::Marshal(e.to_string()))?;
    Ok(path_escape(&format!("postData={}", json)))
}

pub fn path_escape(input: &str) -> String {
    utf8_percent_encode(input, PATH_SEGMENT).to_string()
}

fn cache_busted(feed_url: &str, nonce: i64) -> String {
    let separator = if feed_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", feed_url, separator, nonce)
}
