//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use pokedex_config::Config;
use pokedex_core::{IntentEngine, Relay, SpeciesProvider};
use pokedex_providers::{HttpRelay, PokeApiProvider};
use std::sync::Arc;
use tracing::info;

mod chat;
mod classify;
mod info;
mod init;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use classify::{ClassifyInput, ClassifyStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Engine over the configured HTTP provider.
fn build_engine(config: &Config) -> anyhow::Result<IntentEngine> {
    let provider: Arc<dyn SpeciesProvider> =
        Arc::new(PokeApiProvider::new(config.provider.clone())?);
    Ok(IntentEngine::new(provider, config.scan.clone()))
}

/// Relay transport, when one is enabled in the config.
fn build_relay(config: &Config) -> anyhow::Result<Option<Box<dyn Relay>>> {
    if !config.relay.enabled {
        return Ok(None);
    }
    info!("Relay enabled at {}", config.relay.url);
    Ok(Some(Box::new(HttpRelay::new(&config.relay)?)))
}

/// Core trait defining the contract for all command strategies.
///
/// Each strategy names its input type, so parameters are passed without
/// runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
