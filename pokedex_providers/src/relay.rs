//! HTTP transport for relayed tool calls.

use async_trait::async_trait;
use pokedex_core::{ProviderError, Relay};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8765";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    pub enabled: bool,
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: DEFAULT_RELAY_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolResult {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(rename = "isError", default)]
    is_error: bool,
}

impl ToolResult {
    fn text(self) -> String {
        self.content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn unavailable(e: impl std::fmt::Display) -> ProviderError {
    ProviderError::Unavailable(e.to_string())
}

/// Relay reached over HTTP: `GET /health` for the handshake and
/// `POST /tools/call` per tool call.
pub struct HttpRelay {
    client: Client,
    base_url: String,
    closed: AtomicBool,
}

impl HttpRelay {
    pub fn new(settings: &RelaySettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            closed: AtomicBool::new(false),
        })
    }

    fn ensure_open(&self) -> Result<(), ProviderError> {
        if self.closed.load(Ordering::Acquire) {
            Err(ProviderError::Unavailable("relay is closed".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn handshake(&self) -> Result<(), ProviderError> {
        self.ensure_open()?;
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;
        info!("Relay at {} is healthy", self.base_url);
        Ok(())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ProviderError> {
        self.ensure_open()?;
        debug!("Relaying tool call {name}");
        let result: ToolResult = self
            .client
            .post(format!("{}/tools/call", self.base_url))
            .json(&json!({ "name": name, "arguments": arguments }))
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;

        let is_error = result.is_error;
        let text = result.text();
        if is_error {
            return Err(ProviderError::Unavailable(text));
        }
        Ok(text)
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("Relay connection closed");
        }
    }
}
