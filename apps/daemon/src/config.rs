use std::time::Duration;
use url::Url;

use fedisync_core::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use fedisync_core::errors::{Error, Result};

/// Signed-in account to register and activate at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountConfig {
    pub account_id: String,
    pub username: String,
}

/// Remote instance credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceConfig {
    pub base_url: String,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: String,
    pub instance: Option<InstanceConfig>,
    pub account: Option<AccountConfig>,
    pub request_timeout: Duration,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = var("FEDISYNC_DB_PATH").unwrap_or_else(|| "./db/fedisync.db".into());

        let instance = match (var("FEDISYNC_INSTANCE_URL"), var("FEDISYNC_ACCESS_TOKEN")) {
            (Some(base_url), Some(access_token)) => {
                parse_instance_url(&base_url)?;
                Some(InstanceConfig {
                    base_url,
                    access_token,
                })
            }
            (None, None) => None,
            _ => {
                return Err(Error::Config(
                    "FEDISYNC_INSTANCE_URL and FEDISYNC_ACCESS_TOKEN must be set together"
                        .to_string(),
                ))
            }
        };

        let account = match (var("FEDISYNC_ACCOUNT_ID"), var("FEDISYNC_USERNAME")) {
            (Some(account_id), Some(username)) => Some(AccountConfig {
                account_id,
                username,
            }),
            (None, None) => None,
            _ => {
                return Err(Error::Config(
                    "FEDISYNC_ACCOUNT_ID and FEDISYNC_USERNAME must be set together".to_string(),
                ))
            }
        };
        if account.is_some() && instance.is_none() {
            return Err(Error::Config(
                "FEDISYNC_ACCOUNT_ID requires FEDISYNC_INSTANCE_URL".to_string(),
            ));
        }

        let timeout_ms: u64 = parse_number(
            "FEDISYNC_REQUEST_TIMEOUT_MS",
            var("FEDISYNC_REQUEST_TIMEOUT_MS"),
            DEFAULT_REQUEST_TIMEOUT_SECS * 1000,
        )?;

        Ok(Self {
            db_path,
            instance,
            account,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Instance domain used as the account's `instance`, e.g. `mastodon.social`.
    pub fn instance_domain(&self) -> Option<String> {
        let base_url = &self.instance.as_ref()?.base_url;
        let url = parse_instance_url(base_url).ok()?;
        url.host_str().map(str::to_string)
    }
}

fn parse_instance_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("FEDISYNC_INSTANCE_URL {:?} is invalid: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::Config(format!(
            "FEDISYNC_INSTANCE_URL must be an http(s) URL with a host, got {:?}",
            raw
        )));
    }
    Ok(url)
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}
