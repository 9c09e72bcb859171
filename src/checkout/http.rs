//! HTTP order client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{OrderClient, OrderClientError, OrderRequest, PlacedOrder};

/// Places orders by POSTing to `<base_url>/orders`.
#[derive(Debug, Clone)]
pub struct HttpOrderClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl HttpOrderClient {
    /// Create a client for the API at `base_url`, e.g. `"https://api.example.com/v1"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: Client::new(),
        }
    }

    /// Send `token` as a bearer token with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Order creation endpoint.
    pub fn orders_url(&self) -> String {
        format!("{}/orders", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl OrderClient for HttpOrderClient {
    async fn create_order(&self, order: &OrderRequest) -> Result<PlacedOrder, OrderClientError> {
        let mut request = self.http.post(self.orders_url()).json(order);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(OrderClientError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(OrderClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
