//! HTTP transport for portal API calls

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::response::extract_detail_message;

use crate::{ClientError, ClientResult, PortalConfig};

/// HTTP client for making requests to the portal backend
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    /// Create a new client from configuration
    pub fn new(config: &PortalConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Non-2xx bodies are FastAPI error envelopes; the first detail message
    /// becomes the error text. A body that carries no detail surfaces a
    /// generic status message instead of raw bytes.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = extract_detail_message(&text).unwrap_or_else(|| {
                tracing::debug!(%status, body = %text, "error body carried no detail");
                format!("Request failed with status {status}")
            });
            return match status {
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::UNPROCESSABLE_ENTITY => Err(ClientError::Validation(message)),
                _ => Err(ClientError::Server(message)),
            };
        }

        response.json().await.map_err(Into::into)
    }
}
