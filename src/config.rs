//! # Configuration Management
//!
//! Centralized configuration for the gateway and the RCON client.
//!
//! Configuration is read once at process start from environment variables
//! and handed to the client and the allowlist middleware as an immutable
//! struct — there is no global mutable state and nothing is reloaded at
//! runtime.
//!
//! ## Environment Variables
//! - `RCON_HOST` — upstream server host (default `localhost`)
//! - `RCON_PORT` — upstream RCON port (default `27015`)
//! - `RCON_PASSWORD` — RCON credential (default empty)
//! - `RCON_TIMEOUT_MS` — per-call network timeout in milliseconds
//! - `GATEWAY_BIND` — HTTP listen address (default `0.0.0.0:8001`)
//! - `GATEWAY_ALLOWLIST` — comma-separated CIDR/address list for POSTs
//!
//! ## Security Considerations
//! - The credential lives in a [`Secret`] that redacts itself from all
//!   `Debug`/`Display` output and zeroizes its memory on drop.
//! - Timeouts bound every network operation so a wedged upstream cannot
//!   pin a request forever.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::allowlist::Allowlist;
use crate::utils::timeout::DEFAULT_TIMEOUT;

/// Default upstream RCON port (Source engine convention).
pub const DEFAULT_RCON_PORT: u16 = 27015;

/// Default HTTP listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:8001";

/// A credential that never appears in logs.
///
/// `Debug` and `Display` print a fixed placeholder; the underlying string
/// is zeroized when the value is dropped. Code that genuinely needs the
/// cleartext calls [`Secret::expose`].
#[derive(Clone, Default)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// The cleartext credential. Callers must not embed the returned value
    /// in log output or error messages.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// How the client decides a multi-packet command response has ended.
///
/// The sentinel technique (an empty follow-up EXECCOMMAND whose echo marks
/// the end of the previous command's output) is a well-known workaround,
/// not a formal part of the protocol, and not every server implements the
/// same framing — so the heuristic is configurable rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFraming {
    /// Send an empty EXECCOMMAND at a higher id after the real command and
    /// accumulate output until the higher id answers. Reliable for servers
    /// that split long output across packets.
    #[default]
    Sentinel,
    /// Treat the first RESPONSE_VALUE as the whole response. For servers
    /// that never split output and answer every EXECCOMMAND exactly once.
    Single,
}

/// Connection parameters for the RCON client.
#[derive(Debug, Clone)]
pub struct RconConfig {
    /// Upstream server host name or address.
    pub host: String,

    /// Upstream RCON port.
    pub port: u16,

    /// RCON credential, redacted from all output.
    pub password: Secret,

    /// Bound applied to connect and to every send/receive.
    pub timeout: Duration,

    /// End-of-response detection strategy.
    pub framing: ResponseFraming,
}

impl Default for RconConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: DEFAULT_RCON_PORT,
            password: Secret::default(),
            timeout: DEFAULT_TIMEOUT,
            framing: ResponseFraming::default(),
        }
    }
}

impl RconConfig {
    /// Validate the configuration for common misconfigurations.
    ///
    /// Returns a list of validation errors; an empty list means the
    /// configuration is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.host.is_empty() {
            errors.push("RCON host cannot be empty".to_string());
        }

        if self.port == 0 {
            errors.push("RCON port must be in 1-65535".to_string());
        }

        if self.timeout.is_zero() {
            errors.push("RCON timeout must be greater than zero".to_string());
        } else if self.timeout.as_secs() > 300 {
            errors.push("RCON timeout too long (maximum: 300s)".to_string());
        }

        errors
    }
}

/// Full gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// HTTP listen address.
    pub bind: Option<SocketAddr>,

    /// RCON client configuration.
    pub rcon: RconConfig,

    /// Allowlist applied to mutating requests.
    pub allowlist: Allowlist,
}

impl GatewayConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset. Malformed numeric values fall back to
    /// the default for that field rather than aborting startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("RCON_HOST") {
            if !host.is_empty() {
                config.rcon.host = host;
            }
        }

        if let Ok(port) = std::env::var("RCON_PORT") {
            if let Ok(value) = port.parse::<u16>() {
                config.rcon.port = value;
            }
        }

        if let Ok(password) = std::env::var("RCON_PASSWORD") {
            config.rcon.password = Secret::new(password);
        }

        if let Ok(timeout) = std::env::var("RCON_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                config.rcon.timeout = Duration::from_millis(value);
            }
        }

        if let Ok(bind) = std::env::var("GATEWAY_BIND") {
            if let Ok(value) = bind.parse::<SocketAddr>() {
                config.bind = Some(value);
            }
        }

        if let Ok(spec) = std::env::var("GATEWAY_ALLOWLIST") {
            config.allowlist = Allowlist::parse(&spec);
        }

        config
    }

    /// The address to bind, defaulting to [`DEFAULT_BIND`].
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind.unwrap_or_else(|| {
            DEFAULT_BIND
                .parse()
                .unwrap_or_else(|_| unreachable!("default bind address is valid"))
        })
    }
}
