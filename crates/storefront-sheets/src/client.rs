//! HTTP client for the spreadsheet values API.
//!
//! Reads one cell range of one tab and maps the rows into products. The
//! request is a single GET with the API key in the query string; there is no
//! retry and no partial result.

use std::time::Duration;

use reqwest::{Client, Url};
use storefront_core::{AppConfig, CatalogSource, Product, ShopError};

use crate::error::SheetsError;
use crate::normalize::products_from_rows;
use crate::types::ValueRange;

/// Builds the shared `reqwest::Client` used by both adapters.
pub(crate) fn http_client(config: &AppConfig) -> Result<Client, SheetsError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Client for the values endpoint of the catalog spreadsheet.
///
/// The sheet id and API key are optional so a misconfigured storefront can
/// still start; [`SheetsClient::fetch_rows`] reports whichever is missing.
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    sheet_id: Option<String>,
    api_key: Option<String>,
    sheet_name: String,
    range: String,
}

impl SheetsClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, SheetsError> {
        let base_url =
            Url::parse(&config.sheets_base_url).map_err(|e| SheetsError::InvalidUrl {
                url: config.sheets_base_url.clone(),
                reason: e.to_string(),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(SheetsError::InvalidUrl {
                url: config.sheets_base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client: http_client(config)?,
            base_url,
            sheet_id: config.sheet_id.clone(),
            api_key: config.api_key.clone(),
            sheet_name: config.sheet_name.clone(),
            range: config.sheet_range.clone(),
        })
    }

    /// `Sheet1!A2:F`, the A1 notation the values endpoint expects.
    fn a1_range(&self) -> String {
        format!("{}!{}", self.sheet_name, self.range)
    }

    /// Builds `{base}/v4/spreadsheets/{id}/values/{tab}!{range}?key={key}`
    /// with every segment percent-encoded.
    fn values_url(&self, sheet_id: &str, api_key: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", sheet_id, "values"])
                .push(&self.a1_range());
        }
        url.query_pairs_mut().append_pair("key", api_key);
        url
    }

    /// Fetches the configured range as text rows.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::MissingConfig`] if the sheet id or API key is unset.
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`SheetsError::Deserialize`] if the body is not a value range.
    pub async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SheetsError> {
        let sheet_id = self
            .sheet_id
            .as_deref()
            .ok_or(SheetsError::MissingConfig("STOREFRONT_SHEET_ID"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SheetsError::MissingConfig("STOREFRONT_API_KEY"))?;

        // The URL carries the API key, so errors and logs use the range only.
        let context = format!("values/{}", self.a1_range());
        let url = self.values_url(sheet_id, api_key);

        tracing::debug!(range = %self.a1_range(), "requesting sheet values");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SheetsError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SheetsError::UnexpectedStatus {
                status: status.as_u16(),
                context,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SheetsError::Http(e.without_url()))?;
        let range: ValueRange = serde_json::from_str(&body)
            .map_err(|e| SheetsError::Deserialize { context, source: e })?;
        Ok(range.into_text_rows())
    }

    /// Fetches and maps the catalog.
    ///
    /// # Errors
    ///
    /// Same as [`SheetsClient::fetch_rows`].
    pub async fn fetch_products(&self) -> Result<Vec<Product>, SheetsError> {
        let rows = self.fetch_rows().await?;
        let row_count = rows.len();
        let products = products_from_rows(rows);
        tracing::info!(rows = row_count, products = products.len(), "sheet rows mapped");
        Ok(products)
    }
}

impl CatalogSource for SheetsClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, ShopError> {
        SheetsClient::fetch_products(self)
            .await
            .map_err(|e| ShopError::Fetch(e.to_string()))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
