//! Lightning address lookup gateway.
//!
//! Resolves `user@domain` into the domain's LNURL-pay and keysend discovery
//! documents and serves the pair over a single HTTP endpoint.
//!
//! # Modules
//!
//! - [`address`]: Address parsing and discovery URLs ([`LightningAddress`])
//! - [`fetch`]: Outbound JSON fetches ([`DiscoveryFetcher`], [`HttpFetcher`])
//! - [`resolver`]: Outcome tracking and status decision ([`Resolver`])
//! - [`routes`]: HTTP handlers
//! - [`reporter`]: Optional error tracking sink

pub mod address;
pub mod config;
pub mod cors;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod reporter;
pub mod resolver;
pub mod routes;
pub mod state;

pub use address::LightningAddress;
pub use config::GatewayConfig;
pub use error::{FetchError, ResolveError};
pub use fetch::{DiscoveryFetcher, HttpFetcher};
pub use reporter::ErrorReporter;
pub use resolver::{AddressDetails, FetchOutcome, Resolution, Resolver, Verdict};
pub use state::AppState;
