//! Question-answering session, interactive or single-shot.

use pokedex_config::Config;
use pokedex_core::ChatSession;
use tracing::info;

use super::{build_engine, build_relay};

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to answer (non-interactive mode)
    pub message: Option<String>,
    /// Skip the relay even when the config enables it
    pub direct: bool,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let engine = build_engine(&config)?;
        let relay = if input.direct {
            None
        } else {
            build_relay(&config)?
        };

        let session = ChatSession::start(engine, relay).await;
        info!("Session started in {:?} mode", session.mode());

        if let Some(msg) = input.message {
            let reply = session.respond(&msg).await;
            println!("{}", reply.text);
        } else {
            session.run_interactive().await?;
        }

        Ok(())
    }
}
