//! Plumbing shared by [`BackendClient`](crate::BackendClient) and
//! [`IbgeClient`](crate::IbgeClient): client construction, base-URL handling
//! and status-checked JSON GETs.

use std::time::Duration;

use ecoleta_core::AppConfig;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::retry::retry_with_backoff;

/// Transport settings common to both clients.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure, for GETs only.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: ecoleta_core::config::DEFAULT_USER_AGENT.to_owned(),
            max_retries: 0,
            backoff_base_ms: 500,
        }
    }
}

impl HttpOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        }
    }
}

pub(crate) fn build_client(options: &HttpOptions) -> Result<Client, ClientError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(options.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(&options.user_agent)
        .build()?;
    Ok(client)
}

/// Parses `base_url` and normalises it to end in exactly one slash so that
/// appended path segments extend the base path instead of replacing its last
/// segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_owned()));
    }
    Ok(url)
}

/// Appends `segments` to `base`, percent-encoding each one.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidBaseUrl {
            base_url: base.to_string(),
            reason: "URL cannot be used as a base".to_owned(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Maps 404 and any other non-2xx status to typed errors.
pub(crate) fn check_status(response: Response, url: &Url) -> Result<Response, ClientError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound {
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

/// GETs `url` and decodes the body as `T`, retrying transient failures per
/// `options`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    options: &HttpOptions,
    url: &Url,
) -> Result<T, ClientError> {
    retry_with_backoff(options.max_retries, options.backoff_base_ms, || {
        let url = url.clone();
        async move {
            let response = client.get(url.clone()).send().await?;
            let response = check_status(response, &url)?;
            let body = response.text().await?;
            serde_json::from_str::<T>(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })
        }
    })
    .await
}
