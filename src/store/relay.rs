//! HTTP relay client

use super::traits::{RelayClient, RelayError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Relay client over HTTP
///
/// Deliberately configures no request timeout: a hung relay keeps the
/// submission pending until the connection itself dies.
pub struct HttpRelayClient {
    client: Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/chat", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, message: &str) -> Result<String, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RelayRequest { message })
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if !status.is_success() {
            // Use the relay's error field when the body carries one
            let message = match serde_json::from_str::<RelayErrorBody>(&body) {
                Ok(parsed) => parsed.error,
                Err(_) => body,
            };
            return Err(RelayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: RelayReply =
            serde_json::from_str(&body).map_err(|e| RelayError::Malformed(e.to_string()))?;
        Ok(reply.response)
    }
}

// Relay wire types

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct RelayReply {
    response: String,
}

#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    error: String,
}
