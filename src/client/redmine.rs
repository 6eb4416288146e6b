//! HTTP client for the Redmine issues endpoint.

use crate::error::{MenuError, Result};
use crate::models::{Instance, Issue, IssuesResponse};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something that can produce the issue list of an instance.
#[allow(async_fn_in_trait)]
pub trait IssueSource {
    /// Fetch the open issues assigned to the token's user, in server order.
    async fn fetch_issues(&self, instance: &Instance) -> Result<Vec<Issue>>;
}

/// Fetches issues over HTTP(S).
pub struct RedmineClient {
    http: reqwest::Client,
    limit: u32,
}

impl RedmineClient {
    /// Create a client whose requests give up after `timeout_seconds`.
    pub fn new(timeout_seconds: u64, limit: u32) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("redmine-bar/", env!("CARGO_PKG_VERSION")))
            // Anything but a direct 200 is a failure; following a redirect
            // would also resend the key to another location.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(MenuError::Client)?;

        Ok(Self { http, limit })
    }
}

impl IssueSource for RedmineClient {
    async fn fetch_issues(&self, instance: &Instance) -> Result<Vec<Issue>> {
        let url = issues_url(instance, self.limit)?;
        info!("Fetching issues from {}", instance.url);

        // The request URL carries the API key, so keep it out of error text.
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| MenuError::Request {
                url: instance.url.clone(),
                source: e.without_url(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("{} answered {}", instance.url, status);
            return Err(MenuError::FetchFailed {
                url: instance.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| MenuError::Request {
            url: instance.url.clone(),
            source: e.without_url(),
        })?;
        debug!("Received {} bytes from {}", body.len(), instance.url);

        decode_issues(&instance.url, &body)
    }
}

/// Build `{url}issues.json?key=..&limit=..&status_id=open&assigned_to_id=me`.
///
/// `issues.json` is resolved relative to the instance URL, so a base without
/// a trailing slash loses its last path segment.
pub fn issues_url(instance: &Instance, limit: u32) -> Result<Url> {
    let mut url = Url::parse(&instance.url)
        .and_then(|base| base.join("issues.json"))
        .map_err(|e| MenuError::InvalidUrl {
            url: instance.url.clone(),
            reason: e.to_string(),
        })?;

    url.query_pairs_mut()
        .append_pair("key", &instance.token)
        .append_pair("limit", &limit.to_string())
        .append_pair("status_id", "open")
        .append_pair("assigned_to_id", "me");

    Ok(url)
}

/// Strictly decode an issues payload.
pub fn decode_issues(url: &str, body: &str) -> Result<Vec<Issue>> {
    serde_json::from_str::<IssuesResponse>(body)
        .map(|response| response.issues)
        .map_err(|source| MenuError::DataContractViolation {
            url: url.to_string(),
            source,
        })
}
