//! HTTP client for the Mastodon REST API.
//!
//! Each action maps to exactly one request. Non-success responses become
//! [`NetworkError`]s that keep the HTTP status and the raw body so callers can
//! surface the server's own error message.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use fedisync_core::actions::{MastodonApiTrait, MuteDuration, Poll, Relationship, Status};
use fedisync_core::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use fedisync_core::errors::{Error, NetworkError, Result};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types (internal, for parsing Mastodon responses)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ApiAccountRef {
    id: String,
}

#[derive(Debug, serde::Deserialize)]
struct ApiStatus {
    id: String,
    account: ApiAccountRef,
    #[serde(default)]
    content: String,
    #[serde(default)]
    text: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    reblogged: Option<bool>,
    #[serde(default)]
    favourited: Option<bool>,
    #[serde(default)]
    bookmarked: Option<bool>,
    #[serde(default)]
    pinned: Option<bool>,
    #[serde(default)]
    muted: Option<bool>,
    #[serde(default)]
    poll: Option<Poll>,
    /// Set when this status is a boost wrapping another status
    #[serde(default)]
    reblog: Option<Box<ApiStatus>>,
}

impl From<ApiStatus> for Status {
    fn from(api: ApiStatus) -> Self {
        // Reblogging returns the wrapper; the action targeted the original
        if let Some(original) = api.reblog {
            return Status::from(*original);
        }

        Status {
            id: api.id,
            author_account_id: api.account.id,
            content: api.content,
            text: api.text,
            created_at: api.created_at,
            reblogged: api.reblogged.unwrap_or(false),
            favourited: api.favourited.unwrap_or(false),
            bookmarked: api.bookmarked.unwrap_or(false),
            pinned: api.pinned.unwrap_or(false),
            muted: api.muted.unwrap_or(false),
            poll: api.poll,
        }
    }
}

#[derive(Debug, Serialize)]
struct VoteRequest<'a> {
    choices: &'a [u32],
}

#[derive(Debug, Serialize)]
struct MuteAccountRequest {
    notifications: bool,
    duration: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Mastodon API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for one account on one Mastodon-compatible instance.
///
/// # Example
///
/// ```ignore
/// let client = MastodonApiClient::new("https://mastodon.social", "token", DEFAULT_TIMEOUT)?;
/// let status = client.favourite_status("109372").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MastodonApiClient {
    client: reqwest::Client,
    base_url: Url,
    auth_header: HeaderValue,
}

impl MastodonApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The instance URL (e.g., "https://mastodon.social")
    /// * `access_token` - An OAuth bearer token for the signed-in account
    /// * `timeout` - Total time allowed for each request
    ///
    /// # Errors
    ///
    /// Returns an error if the instance URL is not an absolute http(s) URL, the
    /// access token format is invalid, or the HTTP client cannot be initialized.
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url.trim()).map_err(|e| {
            Error::InvalidArgument(format!("Invalid instance URL {:?}: {}", base_url, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            return Err(Error::InvalidArgument(format!(
                "Instance URL must be http(s) with a host: {}",
                base_url
            )));
        }
        base_url.set_query(None);
        base_url.set_fragment(None);

        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|e| Error::InvalidArgument(format!("Invalid access token format: {}", e)))?;
        auth_header.set_sensitive(true);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            auth_header,
        })
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    /// `{base}/api/v1/{resource}/{id}[/{action}]`, with `id` percent-encoded as
    /// a single path segment.
    fn url(&self, resource: &str, id: &str, action: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidArgument(format!("Instance URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "v1", resource, id])
            .extend(action);
        Ok(url)
    }

    /// Send a request, optionally with a JSON body, and parse the response.
    async fn send<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!("[MastodonApi] {} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .headers(self.headers());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NetworkError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::transport(format!("Failed to read response: {}", e)))?;

        parse_body(status.as_u16(), &body)
    }

    async fn post<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.send::<T, ()>(Method::POST, url, None).await
    }

    async fn status_action(&self, status_id: &str, action: &str) -> Result<Status> {
        let status: ApiStatus = self.post(self.url("statuses", status_id, Some(action))?).await?;
        Ok(status.into())
    }

    async fn account_action(&self, account_id: &str, action: &str) -> Result<Relationship> {
        self.post(self.url("accounts", account_id, Some(action))?)
            .await
    }

    async fn follow_request_action(&self, account_id: &str, action: &str) -> Result<Relationship> {
        self.post(self.url("follow_requests", account_id, Some(action))?)
            .await
    }
}

/// Interpret a response body for the given HTTP status.
fn parse_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(NetworkError::http(status, body).into());
    }

    serde_json::from_str(body).map_err(|e| {
        Error::Serialization(format!(
            "Failed to parse response: {} - {}",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })
}

#[async_trait]
impl MastodonApiTrait for MastodonApiClient {
    async fn reblog_status(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "reblog").await
    }

    async fn unreblog_status(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "unreblog").await
    }

    async fn favourite_status(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "favourite").await
    }

    async fn unfavourite_status(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "unfavourite").await
    }

    async fn bookmark_status(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "bookmark").await
    }

    async fn unbookmark_status(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "unbookmark").await
    }

    async fn mute_conversation(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "mute").await
    }

    async fn unmute_conversation(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "unmute").await
    }

    async fn pin_status(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "pin").await
    }

    async fn unpin_status(&self, status_id: &str) -> Result<Status> {
        self.status_action(status_id, "unpin").await
    }

    async fn delete_status(&self, status_id: &str) -> Result<Status> {
        let status: ApiStatus = self
            .send::<_, ()>(Method::DELETE, self.url("statuses", status_id, None)?, None)
            .await?;
        Ok(status.into())
    }

    async fn vote_in_poll(&self, poll_id: &str, choices: &[u32]) -> Result<Poll> {
        let body = VoteRequest { choices };
        self.send(
            Method::POST,
            self.url("polls", poll_id, Some("votes"))?,
            Some(&body),
        )
        .await
    }

    async fn mute_account(
        &self,
        account_id: &str,
        notifications: bool,
        duration: MuteDuration,
    ) -> Result<Relationship> {
        let body = MuteAccountRequest {
            notifications,
            duration: duration.as_secs(),
        };
        self.send(
            Method::POST,
            self.url("accounts", account_id, Some("mute"))?,
            Some(&body),
        )
        .await
    }

    async fn block_account(&self, account_id: &str) -> Result<Relationship> {
        self.account_action(account_id, "block").await
    }

    async fn unfollow_account(&self, account_id: &str) -> Result<Relationship> {
        self.account_action(account_id, "unfollow").await
    }

    async fn authorize_follow_request(&self, account_id: &str) -> Result<Relationship> {
        self.follow_request_action(account_id, "authorize").await
    }

    async fn reject_follow_request(&self, account_id: &str) -> Result<Relationship> {
        self.follow_request_action(account_id, "reject").await
    }
}
