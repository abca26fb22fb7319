// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock tool client for deterministic testing.
//!
//! `MockToolClient` implements `ToolClient` with responses scripted per
//! `(dataSource, tool)`. Replies are popped from a FIFO queue; the last one
//! stays in place so repeated refreshes keep seeing it.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, Semaphore};

use dashwire_core::{DashwireError, ToolClient, WidgetDataResponse};

/// One recorded `invoke` call.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub data_source: String,
    pub tool: String,
    pub args: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response(WidgetDataResponse),
    /// The call itself fails, as opposed to `success: false`.
    Error(String),
}

type ToolKey = (String, String);

/// A tool client that returns pre-configured replies.
#[derive(Clone, Default)]
pub struct MockToolClient {
    scripts: Arc<Mutex<HashMap<ToolKey, VecDeque<Reply>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    gate: Arc<Mutex<Option<Arc<Semaphore>>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockToolClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response carrying `data`.
    pub async fn push_data(&self, data_source: &str, tool: &str, data: Value) {
        self.push(data_source, tool, Reply::Response(WidgetDataResponse::ok(data)))
            .await;
    }

    /// Queue a full response, e.g. one with `refreshIn` or `success: false`.
    pub async fn push_response(&self, data_source: &str, tool: &str, response: WidgetDataResponse) {
        self.push(data_source, tool, Reply::Response(response)).await;
    }

    /// Queue a call that fails outright.
    pub async fn push_error(&self, data_source: &str, tool: &str, message: &str) {
        self.push(data_source, tool, Reply::Error(message.to_string()))
            .await;
    }

    async fn push(&self, data_source: &str, tool: &str, reply: Reply) {
        self.scripts
            .lock()
            .await
            .entry((data_source.to_string(), tool.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Hold every subsequent call until [`release`](Self::release) or
    /// [`open`](Self::open).
    pub async fn hold(&self) {
        *self.gate.lock().await = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let `n` held calls through.
    pub async fn release(&self, n: usize) {
        if let Some(gate) = self.gate.lock().await.as_ref() {
            gate.add_permits(n);
        }
    }

    /// Stop holding calls and let every waiting call through.
    pub async fn open(&self) {
        if let Some(gate) = self.gate.lock().await.take() {
            gate.add_permits(Semaphore::MAX_PERMITS / 2);
        }
    }

    /// Sleep this long inside every call.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.lock().await = Some(delay);
    }

    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    pub async fn calls_to(&self, data_source: &str, tool: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.data_source == data_source && c.tool == tool)
            .count()
    }

    async fn next_reply(&self, data_source: &str, tool: &str) -> Option<Reply> {
        let mut scripts = self.scripts.lock().await;
        let queue = scripts.get_mut(&(data_source.to_string(), tool.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl ToolClient for MockToolClient {
    async fn invoke(
        &self,
        data_source: &str,
        tool: &str,
        args: Option<&Value>,
    ) -> Result<WidgetDataResponse, DashwireError> {
        self.calls.lock().await.push(MockCall {
            data_source: data_source.to_string(),
            tool: tool.to_string(),
            args: args.cloned(),
        });

        let gate = self.gate.lock().await.clone();
        if let Some(gate) = gate {
            gate.acquire()
                .await
                .map_err(|e| DashwireError::Internal(format!("mock gate closed: {e}")))?
                .forget();
        }

        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply(data_source, tool).await {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Error(message)) => Err(DashwireError::fetch(message)),
            None => Err(DashwireError::ToolNotFound {
                data_source: data_source.to_string(),
                tool: tool.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn last_reply_is_sticky() {
        let client = MockToolClient::new();
        client.push_data("shop", "count", json!(1)).await;
        client.push_data("shop", "count", json!(2)).await;

        let data = |r: WidgetDataResponse| r.data;
        assert_eq!(data(client.invoke("shop", "count", None).await.unwrap()), Some(json!(1)));
        assert_eq!(data(client.invoke("shop", "count", None).await.unwrap()), Some(json!(2)));
        assert_eq!(data(client.invoke("shop", "count", None).await.unwrap()), Some(json!(2)));
        assert_eq!(client.calls_to("shop", "count").await, 3);
    }

    #[tokio::test]
    async fn unscripted_tool_is_not_found() {
        let client = MockToolClient::new();
        let err = client.invoke("shop", "nope", None).await.unwrap_err();
        assert!(matches!(err, DashwireError::ToolNotFound { .. }));
    }

    #[tokio::test]
    async fn records_args() {
        let client = MockToolClient::new();
        client.push_error("shop", "q", "down").await;
        let args = json!({"limit": 5});
        assert!(client.invoke("shop", "q", Some(&args)).await.is_err());
        assert_eq!(client.calls().await[0].args, Some(args));
    }

    #[tokio::test]
    async fn gate_holds_until_released() {
        let client = MockToolClient::new();
        client.push_data("shop", "q", json!(1)).await;
        client.hold().await;

        let task = {
            let client = client.clone();
            tokio::spawn(async move { client.invoke("shop", "q", None).await })
        };
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        client.release(1).await;
        assert!(task.await.unwrap().is_ok());
    }
}
