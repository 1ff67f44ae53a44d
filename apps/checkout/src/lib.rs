//! # Cartwise Checkout Library
//!
//! The checkout session, its commands and the `checkout` command line.
//!
//! ## Module Organization
//! ```text
//! cartwise_checkout/
//! ├── lib.rs          ◄─── You are here (tracing setup)
//! ├── cli.rs          ◄─── clap definitions and subcommand output
//! ├── config.rs       ◄─── checkout.toml + CARTWISE_* overrides
//! ├── sample.rs       ◄─── Built-in items and promotion catalog
//! ├── script.rs       ◄─── Step parser for `checkout session`
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Cart, selection and points for one checkout
//! │   └── catalog.rs  ◄─── Ingested promotions and the item catalog
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── promotion.rs◄─── Promotion listing and selection
//! │   └── pricing.rs  ◄─── Quote command
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Startup                                  │
//! │                                                                         │
//! │  1. Parse CLI ──────────► --config, subcommand                         │
//! │  2. Load Config ────────► defaults → checkout.toml → CARTWISE_*        │
//! │  3. Initialize Logging ─► RUST_LOG, else [logging] filter              │
//! │  4. Load Catalog ───────► JSON file or sample, ingest + validate       │
//! │  5. Run Subcommand ─────► fresh CheckoutState, print report            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod sample;
pub mod script;
pub mod state;

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cartwise_core=trace` - Show trace for the engine only
/// - Default: `fallback`, normally the `[logging] filter` setting
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
