use reqwest::Client;
use thiserror::Error;

use super::types::{ApiPosition, ApiTrade};

const DATA_API_BASE: &str = "https://data-api.polymarket.com";

#[derive(Debug, Error)]
pub enum DataClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone)]
pub struct DataClient {
    http: Client,
    base_url: String,
}

impl DataClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: DATA_API_BASE.into(),
        }
    }

    /// Client against a non-default base URL (tests, self-hosted mirrors).
    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch the most recent trades for a wallet address.
    pub async fn get_user_trades(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<Vec<ApiTrade>, DataClientError> {
        let url = format!("{}/trades", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("maker", address), ("limit", &limit.to_string())])
            .send()
            .await?
            .error_for_status()?;

        let trades: Vec<ApiTrade> = resp.json().await?;
        Ok(trades)
    }

    /// Fetch the current open positions for a wallet address.
    pub async fn get_user_positions(
        &self,
        address: &str,
    ) -> Result<Vec<ApiPosition>, DataClientError> {
        let url = format!("{}/positions", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("user", address)])
            .send()
            .await?
            .error_for_status()?;

        let positions: Vec<ApiPosition> = resp.json().await?;
        Ok(positions)
    }
}
