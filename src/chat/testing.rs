//! Mock proxy client for runtime tests

use super::client::{ProxyClient, ProxyError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Semaphore;

/// Proxy client that returns queued outcomes and records every call.
///
/// When gated, each call blocks until the test releases it, which keeps a
/// request in flight for as long as the test needs.
pub struct MockProxyClient {
    outcomes: Mutex<VecDeque<Result<String, ProxyError>>>,
    calls: Mutex<Vec<String>>,
    gate: Option<Semaphore>,
}

impl MockProxyClient {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn queue_reply(&self, text: &str) {
        self.outcomes.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn queue_error(&self, error: ProxyError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// Let `n` gated calls complete
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockProxyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProxyClient for MockProxyClient {
    async fn send_message(&self, text: &str) -> Result<String, ProxyError> {
        self.calls.lock().unwrap().push(text.to_string());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProxyError::Network("No mock reply queued".to_string())))
    }
}
