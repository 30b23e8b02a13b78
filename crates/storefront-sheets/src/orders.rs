//! Client for the script endpoint that appends confirmed orders to the sheet.

use reqwest::{Client, Url};
use storefront_core::{AppConfig, Order, OrderSink, ShopError};

use crate::client::http_client;
use crate::error::SheetsError;
use crate::types::OrderResponse;

const DEFAULT_REJECTION: &str = "order was not accepted";

/// Posts order summaries to the configured script endpoint.
///
/// Each order is sent exactly once; failures are reported, never retried.
pub struct OrderClient {
    client: Client,
    endpoint: Option<Url>,
}

impl OrderClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SheetsError::InvalidUrl`] if the configured endpoint does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, SheetsError> {
        let endpoint = config
            .order_endpoint
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| SheetsError::InvalidUrl {
                    url: raw.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            client: http_client(config)?,
            endpoint,
        })
    }

    /// Sends `order` as JSON and checks the endpoint's verdict.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::MissingConfig`] if no endpoint is configured.
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`SheetsError::Deserialize`] if the body is not an order response.
    /// - [`SheetsError::OrderRejected`] if the endpoint answered `success: false`.
    pub async fn submit(&self, order: &Order) -> Result<(), SheetsError> {
        let endpoint = self
            .endpoint
            .clone()
            .ok_or(SheetsError::MissingConfig("STOREFRONT_ORDER_ENDPOINT"))?;
        let context = format!("order endpoint ({})", endpoint.host_str().unwrap_or("?"));

        tracing::debug!(order_id = %order.order_id, "posting order");
        let response = self
            .client
            .post(endpoint)
            .json(order)
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
        let verdict: OrderResponse = serde_json::from_str(&body)
            .map_err(|e| SheetsError::Deserialize { context, source: e })?;

        if verdict.success {
            Ok(())
        } else {
            Err(SheetsError::OrderRejected(
                verdict
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            ))
        }
    }
}

impl OrderSink for OrderClient {
    async fn submit_order(&self, order: &Order) -> Result<(), ShopError> {
        self.submit(order).await.map_err(|e| match e {
            SheetsError::OrderRejected(reason) => ShopError::Submit(reason),
            other => ShopError::Submit(other.to_string()),
        })
    }
}
