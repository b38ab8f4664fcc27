//! # Core Protocol Components
//!
//! Low-level RCON packet handling and stream framing.
//!
//! This module provides the foundation for the protocol: the binary packet
//! format and a tokio codec for framing packets over a TCP byte stream.
//!
//! ## Components
//! - **Packet**: the RCON packet (id, type, payload, double-NUL terminator)
//! - **Codec**: tokio codec for framing over byte streams
//!
//! ## Wire Format
//! ```text
//! [Size(4, LE)] [Id(4, LE)] [Type(4, LE)] [Payload(N)] [0x00 0x00]
//! ```
//! The size field counts everything after itself: `10 + N`.
//!
//! ## Security
//! - Maximum payload size: 4096 bytes (prevents memory exhaustion)
//! - Size validation before allocation
//! - Terminator validation on every received frame

pub mod codec;
pub mod packet;
