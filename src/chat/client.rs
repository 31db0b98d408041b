//! Client side of the chat proxy contract

use crate::api::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;

/// Why a proxy call produced no reply
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Chat proxy unreachable: {0}")]
    Network(String),
    #[error("Chat proxy returned HTTP {status}")]
    Status { status: u16 },
    #[error("Unreadable chat proxy reply: {0}")]
    Decode(String),
}

/// Sends one user message to the chat proxy and returns the reply text
#[async_trait]
pub trait ProxyClient: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<String, ProxyError>;
}

#[async_trait]
impl<T: ProxyClient + ?Sized> ProxyClient for Arc<T> {
    async fn send_message(&self, text: &str) -> Result<String, ProxyError> {
        (**self).send_message(text).await
    }
}

/// `POST {base}/api/chat` over HTTP. No timeout: a call runs until the
/// server answers or the connection fails.
pub struct HttpProxyClient {
    client: Client,
    endpoint: String,
}

impl HttpProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProxyClient for HttpProxyClient {
    async fn send_message(&self, text: &str) -> Result<String, ProxyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest::new(text))
            .send()
            .await
            .map_err(|e| ProxyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Status {
                status: status.as_u16(),
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProxyError::Decode(e.to_string()))?;

        Ok(reply.message)
    }
}
