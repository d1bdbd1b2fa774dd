use pokedex_config::Config;
use pokedex_core::{Relay, SpeciesProvider};
use pokedex_providers::{HttpRelay, PokeApiProvider};
use tracing::info;

/// Strategy for displaying configuration information.
///
/// Prints the effective settings, then checks that the species provider
/// (and the relay, when enabled) answers.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;

        println!("=== pokedex Configuration ===\n");
        println!("Config file: {}", Config::config_path()?.display());
        println!();

        println!("Species Provider:");
        println!("  URL: {}", config.provider.base_url);
        println!("  Timeout: {}s", config.provider.timeout_secs);
        println!("  Search Limit: {}", config.provider.search_limit);
        println!(
            "  Retry: {:?} ms, then {} more",
            config.provider.retry.base_delays_ms, config.provider.retry.final_retries
        );

        info!("Testing provider connection");
        let provider = PokeApiProvider::new(config.provider.clone())?;
        match provider.list_types().await {
            Ok(types) => println!("  Status: Reachable ({} types)", types.len()),
            Err(e) => {
                println!("  Status: Unreachable");
                println!("  Error: {e}");
            }
        }
        println!();

        println!("Relay:");
        if config.relay.enabled {
            println!("  URL: {}", config.relay.url);
            let relay = HttpRelay::new(&config.relay)?;
            match relay.handshake().await {
                Ok(()) => println!("  Status: Healthy"),
                Err(e) => {
                    println!("  Status: Unavailable (sessions will answer directly)");
                    println!("  Error: {e}");
                }
            }
            relay.close().await;
        } else {
            println!("  (disabled)");
        }
        println!();

        let scan = &config.scan;
        println!("Roster Lookups:");
        println!("  Roster Size: {}", scan.roster_size);
        println!("  Scan Window: {}", scan.scan_window);
        println!("  Concurrency: {}", scan.concurrency);
        println!("  Failure Threshold: {}", scan.failure_threshold);
        println!("  Max Lookups: {}", scan.max_lookups);
        println!("  Curated Index: {}", scan.use_curated_index);

        Ok(())
    }
}
