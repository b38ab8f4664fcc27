//! # RCON Client
//!
//! One authenticate-then-execute exchange per connection.
//!
//! The client owns a TCP connection for exactly one command round trip:
//! connect, AUTH handshake, EXECCOMMAND, multi-packet response reassembly,
//! close. The protocol has no multiplexing — a second command sent before
//! the first response is fully drained corrupts response correlation — so
//! nothing here shares a connection between commands.

pub mod rcon;

pub use rcon::RconClient;
