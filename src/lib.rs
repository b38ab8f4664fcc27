//! # rcon-gateway
//!
//! HTTP admin gateway for game servers speaking the Source RCON protocol.
//!
//! Each administrative HTTP endpoint translates into exactly one
//! authenticate-then-execute round trip of the RCON wire protocol; the
//! plain-text console reply is scraped back into JSON. Mutating endpoints
//! are gated by an IP allowlist.
//!
//! ## Modules
//! - [`core`]: packet format and stream codec
//! - [`client`]: the RCON protocol client
//! - [`allowlist`]: IP/CIDR allowlist matching
//! - [`gateway`]: HTTP routes, handlers, and reply scraping
//! - [`config`]: immutable startup configuration
//! - [`error`]: the error taxonomy shared by all of the above
//!
//! ## Example
//! ```no_run
//! use rcon_gateway::client::RconClient;
//! use rcon_gateway::config::{RconConfig, Secret};
//!
//! # async fn run() -> rcon_gateway::error::Result<()> {
//! let client = RconClient::new(RconConfig {
//!     host: "127.0.0.1".into(),
//!     password: Secret::new("hunter2"),
//!     ..RconConfig::default()
//! });
//! let players = client.execute("/players").await?;
//! println!("{players}");
//! # Ok(())
//! # }
//! ```

pub mod allowlist;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod gateway;
pub mod utils;

pub use client::RconClient;
pub use config::GatewayConfig;
pub use error::{RconError, Result};
