//! Interactive session shell.
//!
//! A session decides once, at start, whether provider-backed questions go
//! through a relay or straight to the in-process engine. Everything else is
//! always answered locally.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::engine::{EngineError, IntentEngine};
use crate::intent::{Intent, classify};
use crate::{ProviderError, SpeciesProvider};

const GREETING: &str = "Catalog assistant ready. Ask about species, types or generations (\"help\" for examples, \"quit\" to leave).";
const PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Provider-backed intents are sent to the relay as tool calls.
    Relayed,
    /// Everything runs in-process.
    Direct,
}

/// Out-of-process tool endpoint.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn handshake(&self) -> Result<(), ProviderError>;

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ProviderError>;

    async fn close(&self);
}

#[async_trait]
impl<T: Relay + ?Sized> Relay for Arc<T> {
    async fn handshake(&self) -> Result<(), ProviderError> {
        (**self).handshake().await
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ProviderError> {
        (**self).call_tool(name, arguments).await
    }

    async fn close(&self) {
        (**self).close().await;
    }
}

/// One answer. `quit` marks the last reply of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

fn apology(error: &EngineError) -> String {
    format!("Sorry, I couldn't answer that right now ({error}). Please try again in a moment.")
}

pub struct ChatSession<P = Arc<dyn SpeciesProvider>> {
    engine: IntentEngine<P>,
    relay: Option<Box<dyn Relay>>,
    mode: SessionMode,
}

impl<P: SpeciesProvider> ChatSession<P> {
    /// Build a session. With a relay, one handshake decides the mode for the
    /// session's lifetime; a failed handshake falls back to direct mode.
    pub async fn start(engine: IntentEngine<P>, relay: Option<Box<dyn Relay>>) -> Self {
        let (relay, mode) = match relay {
            Some(relay) => match relay.handshake().await {
                Ok(()) => {
                    info!("Relay connected, provider lookups go through it");
                    (Some(relay), SessionMode::Relayed)
                }
                Err(e) => {
                    warn!("Relay unavailable, answering directly: {e}");
                    (None, SessionMode::Direct)
                }
            },
            None => (None, SessionMode::Direct),
        };
        Self {
            engine,
            relay,
            mode,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub const fn engine(&self) -> &IntentEngine<P> {
        &self.engine
    }

    /// Answer one line. Never fails: errors become an apology.
    pub async fn respond(&self, raw: &str) -> Reply {
        self.respond_with_cancel(raw, &CancellationToken::new())
            .await
    }

    pub async fn respond_with_cancel(&self, raw: &str, cancel: &CancellationToken) -> Reply {
        let span = info_span!("respond", request_id = %Uuid::now_v7());
        async {
            let intent = classify(raw);
            info!(intent = intent.tool_name(), mode = ?self.mode, "Answering");

            let result = match (&self.relay, intent.tool_call()) {
                (Some(relay), Some((name, arguments))) => relay
                    .call_tool(name, arguments)
                    .await
                    .map_err(EngineError::from),
                _ => self.engine.execute(&intent, cancel).await,
            };
            let text = result.unwrap_or_else(|e| {
                warn!("Answer failed: {e}");
                apology(&e)
            });

            let quit = intent == Intent::Quit;
            if quit {
                if let Some(relay) = &self.relay {
                    relay.close().await;
                }
            }
            Reply { text, quit }
        }
        .instrument(span)
        .await
    }

    /// Read questions from stdin until `quit` or end of input.
    pub async fn run_interactive(&self) -> std::io::Result<()> {
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Line loop over any reader and writer. Blank lines are skipped. Ctrl-C
    /// while an answer is being computed cancels its lookups; Ctrl-C at the
    /// prompt ends the session.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(format!("{GREETING}\n").as_bytes()).await?;

        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    output.write_all(b"\n").await?;
                    break;
                }
            };
            let Some(line) = line else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let cancel = CancellationToken::new();
            let answer = self.respond_with_cancel(line, &cancel);
            tokio::pin!(answer);
            let reply = loop {
                tokio::select! {
                    reply = &mut answer => break reply,
                    _ = tokio::signal::ctrl_c(), if !cancel.is_cancelled() => {
                        info!("Interrupted, cancelling the current lookup");
                        cancel.cancel();
                    }
                }
            };

            output
                .write_all(format!("{}\n\n", reply.text).as_bytes())
                .await?;
            if reply.quit {
                break;
            }
        }

        output.flush().await
    }
}
