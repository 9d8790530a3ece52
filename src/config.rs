use std::time::Duration;

use anyhow::{Context, Result, bail};
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 80;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub bind_addr: String,
    pub port: u16,
    /// Unset means remote calls are never cut short.
    pub api_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("BOOKING_API_BASE_URL").context("BOOKING_API_BASE_URL is not set")?;
        let api_base_url = Url::parse(&raw_url)
            .with_context(|| format!("BOOKING_API_BASE_URL is not a valid URL: {raw_url}"))?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            bail!("BOOKING_API_BASE_URL must be http or https, got {raw_url}");
        }

        let port = match lookup("PORT") {
            Some(port) => port.parse().with_context(|| format!("invalid PORT {port}"))?,
            None => DEFAULT_PORT,
        };

        let api_timeout = match lookup("BOOKING_API_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("invalid BOOKING_API_TIMEOUT_SECS {secs}"))?,
            )),
            None => None,
        };

        Ok(Config {
            api_base_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port,
            api_timeout,
        })
    }
}
