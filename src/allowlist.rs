//! IP allowlist for state-changing requests.
//!
//! The allowlist gates mutating (POST) requests only; read-only requests
//! bypass it entirely. It is a narrow, deliberate security boundary for
//! admin operations, not a general authentication layer.
//!
//! An **empty allowlist allows every address**. That fail-open semantic is
//! a documented policy decision carried over from the deployment model this
//! gateway replaces — an operator who configures no allowlist has opted out
//! of the check. Do not tighten it silently.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use tracing::warn;

/// One permitted IP network: an address plus a prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpNetwork {
    addr: IpAddr,
    prefix_len: u8,
}

impl IpNetwork {
    /// Create a network, validating the prefix length against the address
    /// family (<= 32 for IPv4, <= 128 for IPv6).
    pub fn new(addr: IpAddr, prefix_len: u8) -> Option<Self> {
        let max = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        (prefix_len <= max).then_some(Self { addr, prefix_len })
    }

    /// Network containing exactly one address (/32 or /128).
    pub fn host(addr: IpAddr) -> Self {
        let prefix_len = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        Self { addr, prefix_len }
    }

    /// Whether `ip` falls inside this network. Addresses of the other
    /// family never match.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self.addr, ip) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                let mask = if self.prefix_len == 0 {
                    0
                } else {
                    u32::MAX << (32 - u32::from(self.prefix_len))
                };
                u32::from(net) & mask == u32::from(ip) & mask
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                let mask = if self.prefix_len == 0 {
                    0
                } else {
                    u128::MAX << (128 - u32::from(self.prefix_len))
                };
                u128::from(net) & mask == u128::from(ip) & mask
            }
            _ => false,
        }
    }
}

impl FromStr for IpNetwork {
    type Err = InvalidNetwork;

    /// Parse `addr/prefix` CIDR notation, or a bare address as a host
    /// network.
    fn from_str(s: &str) -> Result<Self, InvalidNetwork> {
        match s.split_once('/') {
            Some((addr, prefix)) => {
                let addr: IpAddr = addr.parse().map_err(|_| InvalidNetwork)?;
                let prefix_len: u8 = prefix.parse().map_err(|_| InvalidNetwork)?;
                Self::new(addr, prefix_len).ok_or(InvalidNetwork)
            }
            None => {
                let addr: IpAddr = s.parse().map_err(|_| InvalidNetwork)?;
                Ok(Self::host(addr))
            }
        }
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

/// Parse failure for a single allowlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidNetwork;

impl fmt::Display for InvalidNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not an IP address or CIDR network")
    }
}

impl std::error::Error for InvalidNetwork {}

/// Ordered set of permitted networks, parsed once at startup.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    networks: Vec<IpNetwork>,
}

impl Allowlist {
    /// Parse a comma-separated list of CIDR networks and bare addresses.
    ///
    /// Segments are trimmed; empty segments are ignored. Unparseable
    /// segments are skipped with a warning rather than aborting startup, so
    /// one typo in the configuration does not take the gateway down with
    /// the allowlist silently disabled.
    pub fn parse(spec: &str) -> Self {
        let mut networks = Vec::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            match entry.parse::<IpNetwork>() {
                Ok(network) => networks.push(network),
                Err(_) => {
                    warn!(entry, "skipping unparseable allowlist entry");
                }
            }
        }
        Self { networks }
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Whether `addr` may perform a mutating request.
    ///
    /// An empty allowlist admits everyone (fail-open, see module docs). A
    /// missing remote address is denied — if the peer cannot be identified,
    /// the check cannot pass.
    pub fn is_allowed(&self, addr: Option<IpAddr>) -> bool {
        if self.networks.is_empty() {
            return true;
        }
        let Some(addr) = addr else {
            return false;
        };
        self.networks.iter().any(|network| network.contains(addr))
    }
}
