//! HTTP client for the Ecoleta backend.
//!
//! Two endpoints: `GET /items` for the recyclable-item catalog and
//! `POST /points` to register a collection point.

use ecoleta_core::{Item, PointPayload};
use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::http::{build_client, check_status, endpoint, get_json, parse_base_url, HttpOptions};

pub struct BackendClient {
    client: Client,
    options: HttpOptions,
    base_url: Url,
}

impl BackendClient {
    /// Creates a client for the backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, options: HttpOptions) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let client = build_client(&options)?;
        Ok(Self {
            client,
            options,
            base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the item catalog, in server order.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] / [`ClientError::UnexpectedStatus`] on non-2xx.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a list of items.
    pub async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let url = endpoint(&self.base_url, &["items"])?;
        let items: Vec<Item> = get_json(&self.client, &self.options, &url).await?;
        tracing::debug!(count = items.len(), "loaded item catalog");
        Ok(items)
    }

    /// Registers a collection point. Sent exactly once; the response body is
    /// not read.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] / [`ClientError::UnexpectedStatus`] on non-2xx.
    /// - [`ClientError::Http`] on network failure.
    pub async fn create_point(&self, payload: &PointPayload) -> Result<(), ClientError> {
        let url = endpoint(&self.base_url, &["points"])?;
        let response = self.client.post(url.clone()).json(payload).send().await?;
        check_status(response, &url)?;
        tracing::info!(
            name = %payload.name,
            uf = %payload.uf,
            city = %payload.city,
            items = payload.items.len(),
            "collection point created"
        );
        Ok(())
    }
}
