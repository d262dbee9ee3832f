use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_VENDOR_URL: &str = "https://portal2.bsnl.in/myportal/validatepprequest.do";
pub const DEFAULT_VENDOR_ORIGIN: &str = "https://portal2.bsnl.in";
pub const DEFAULT_VENDOR_REFERER: &str = "https://portal2.bsnl.in/myportal/workspace.do";
pub const DEFAULT_PREPAID_CIRCLES_URL: &str =
    "http://portal2.bsnl.in/myportal/JSON/circles_prepaid.json";
pub const DEFAULT_POSTPAID_CIRCLES_URL: &str =
    "http://portal2.bsnl.in/myportal/JSON/circles_postpaid.json";
pub const DEFAULT_HOME_REDIRECT_URL: &str = "https://market.mashape.com/bsnl-balance";
pub const DEFAULT_VENDOR_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub vendor_url: String,
    pub vendor_origin: String,
    pub vendor_referer: String,
    pub prepaid_circles_url: String,
    pub postpaid_circles_url: String,
    pub home_redirect_url: String,
    /// Upper bound for every outbound call, feeds included.
    pub vendor_timeout_secs: u64,
    /// Skip TLS certificate verification on outbound calls. The portal has
    /// historically served a certificate that does not verify, so this is on
    /// unless turned off explicitly.
    pub accept_invalid_certs: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .map_err(|_| anyhow::anyhow!("$PORT not set"))
                .and_then(|port| {
                    if port.trim().is_empty() {
                        anyhow::bail!("$PORT not set");
                    }
                    port.trim().parse().map_err(|_| {
                        anyhow::anyhow!("PORT must be a valid number between 1-65535")
                    })
                })?,
            vendor_url: url_var("VENDOR_URL", DEFAULT_VENDOR_URL)?,
            vendor_origin: url_var("VENDOR_ORIGIN", DEFAULT_VENDOR_ORIGIN)?,
            vendor_referer: url_var("VENDOR_REFERER", DEFAULT_VENDOR_REFERER)?,
            prepaid_circles_url: url_var("PREPAID_CIRCLES_URL", DEFAULT_PREPAID_CIRCLES_URL)?,
            postpaid_circles_url: url_var("POSTPAID_CIRCLES_URL", DEFAULT_POSTPAID_CIRCLES_URL)?,
            home_redirect_url: url_var("HOME_REDIRECT_URL", DEFAULT_HOME_REDIRECT_URL)?,
            vendor_timeout_secs: match std::env::var("VENDOR_TIMEOUT_SECS") {
                Ok(raw) => match raw.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => anyhow::bail!("VENDOR_TIMEOUT_SECS must be a positive number of seconds"),
                },
                Err(_) => DEFAULT_VENDOR_TIMEOUT_SECS,
            },
            accept_invalid_certs: match std::env::var("VENDOR_ACCEPT_INVALID_CERTS") {
                Ok(raw) => parse_bool(&raw).ok_or_else(|| {
                    anyhow::anyhow!("VENDOR_ACCEPT_INVALID_CERTS must be true or false")
                })?,
                Err(_) => true,
            },
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Vendor URL: {}", config.vendor_url);
        tracing::debug!("Prepaid circles feed: {}", config.prepaid_circles_url);
        tracing::debug!("Postpaid circles feed: {}", config.postpaid_circles_url);
        tracing::debug!("Vendor timeout: {}s", config.vendor_timeout_secs);
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for outbound calls");
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn vendor_timeout(&self) -> Duration {
        Duration::from_secs(self.vendor_timeout_secs)
    }
}

/// Reads an optional URL variable, falling back to `default` when unset or blank.
fn url_var(name: &str, default: &str) -> anyhow::Result<String> {
    let value = std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    validate_url(name, &value)?;
    Ok(value)
}

fn validate_url(name: &str, value: &str) -> anyhow::Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("X", DEFAULT_VENDOR_URL).is_ok());
        assert!(validate_url("X", DEFAULT_PREPAID_CIRCLES_URL).is_ok());
        assert!(validate_url("X", "ftp://portal2.bsnl.in").is_err());
        assert!(validate_url("X", "not a url").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        for url in [
            DEFAULT_VENDOR_URL,
            DEFAULT_VENDOR_ORIGIN,
            DEFAULT_VENDOR_REFERER,
            DEFAULT_PREPAID_CIRCLES_URL,
            DEFAULT_POSTPAID_CIRCLES_URL,
            DEFAULT_HOME_REDIRECT_URL,
        ] {
            assert!(validate_url("default", url).is_ok(), "{}", url);
        }
    }
}
