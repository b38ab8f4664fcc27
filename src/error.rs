//! # Error Types
//!
//! Error handling for the RCON client and the gateway built on top of it.
//!
//! Every failure of a command round trip is reported as one of the variants
//! below; the client never retries and never swallows an error. The RCON
//! credential must not appear in any error message — variants carry either
//! the underlying I/O error or a protocol-level description, never the
//! password that was sent.
//!
//! ## Error Categories
//! - **Connection**: TCP connect failures, resets, and closed sockets
//! - **WrongPassword**: the server rejected the AUTH exchange
//! - **Timeout**: a bounded network operation did not complete in time
//! - **Protocol**: malformed frames or an unexpected packet sequence
//! - **Command**: the command ran but its textual reply reports failure

use std::io;
use thiserror::Error;

/// Primary error type for RCON operations.
#[derive(Error, Debug)]
pub enum RconError {
    /// The upstream server could not be reached or dropped the connection.
    #[error("connection error: {0}")]
    Connection(#[from] io::Error),

    /// The server answered the AUTH packet with id -1.
    ///
    /// Reported distinctly so operators can diagnose a credential
    /// misconfiguration; the message never contains the credential itself.
    #[error("authentication rejected by server")]
    WrongPassword,

    /// A connect, send, or receive did not finish within the configured
    /// per-call timeout.
    #[error("timed out waiting for server")]
    Timeout,

    /// Malformed frame or a packet sequence the protocol does not allow.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The command executed but the server's textual reply indicates
    /// failure. Raised by the gateway's reply scraping, not by the client.
    #[error("command failed: {0}")]
    Command(String),
}

/// Type alias for Results using RconError
pub type Result<T> = std::result::Result<T, RconError>;
