#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod pokeapi;
pub mod relay;
pub mod retry;

pub use pokeapi::{DEFAULT_BASE_URL, PokeApiProvider, ProviderSettings};
pub use relay::{DEFAULT_RELAY_URL, HttpRelay, RelaySettings};
pub use retry::{RetryPolicy, retry_with_backoff};
