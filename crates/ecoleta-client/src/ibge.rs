//! HTTP client for the IBGE localidades API.
//!
//! Supplies the UF list and per-UF municipality names for the address
//! dropdowns. The service is public and unauthenticated.

use ecoleta_core::config::DEFAULT_IBGE_URL;
use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::http::{build_client, endpoint, get_json, parse_base_url, HttpOptions};
use crate::types::{IbgeCity, IbgeUf};

pub struct IbgeClient {
    client: Client,
    options: HttpOptions,
    base_url: Url,
}

impl IbgeClient {
    /// Creates a client pointed at the production IBGE API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(options: HttpOptions) -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_IBGE_URL, options)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(base_url: &str, options: HttpOptions) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let client = build_client(&options)?;
        Ok(Self {
            client,
            options,
            base_url,
        })
    }

    /// Lists UF siglas in the order IBGE returns them.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] / [`ClientError::UnexpectedStatus`] on non-2xx.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body does not match `[{ sigla }]`.
    pub async fn list_ufs(&self) -> Result<Vec<String>, ClientError> {
        let url = endpoint(&self.base_url, &["estados"])?;
        let ufs: Vec<IbgeUf> = get_json(&self.client, &self.options, &url).await?;
        tracing::debug!(count = ufs.len(), "loaded UF list");
        Ok(ufs.into_iter().map(|uf| uf.sigla).collect())
    }

    /// Lists municipality names for `uf`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] / [`ClientError::UnexpectedStatus`] on non-2xx.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body does not match `[{ nome }]`.
    pub async fn list_cities(&self, uf: &str) -> Result<Vec<String>, ClientError> {
        let url = endpoint(&self.base_url, &["estados", uf, "municipios"])?;
        let cities: Vec<IbgeCity> = get_json(&self.client, &self.options, &url).await?;
        tracing::debug!(uf, count = cities.len(), "loaded city list");
        Ok(cities.into_iter().map(|city| city.nome).collect())
    }
}
