//! RCON protocol client: connect, authenticate, execute, reassemble.

use futures::{SinkExt, StreamExt};
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, instrument};

use crate::config::{RconConfig, ResponseFraming};
use crate::core::codec::RconCodec;
use crate::core::packet::{Packet, PacketType};
use crate::error::{RconError, Result};
use crate::utils::timeout::with_timeout_error;

/// Client for a single upstream RCON server.
///
/// Cheap to clone and safe to share; every [`execute`](Self::execute) call
/// opens its own connection, so concurrent calls never contend on shared
/// protocol state.
#[derive(Debug, Clone)]
pub struct RconClient {
    config: RconConfig,
}

impl RconClient {
    pub fn new(config: RconConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RconConfig {
        &self.config
    }

    /// Run one command: connect, authenticate, execute, and return the
    /// concatenated response text.
    ///
    /// The response is decoded as UTF-8 with lossy fallback since server
    /// output is not guaranteed to be valid UTF-8. The connection is closed
    /// on every exit path — success, authentication failure, protocol
    /// error, or timeout — when the session drops. Commands are never
    /// retried: a blind retry could double-execute a stateful command such
    /// as `/save`.
    #[instrument(skip(self), fields(host = %self.config.host, port = self.config.port))]
    pub async fn execute(&self, command: &str) -> Result<String> {
        let mut session = Session::connect(&self.config).await?;
        session.authenticate(self.config.password.expose()).await?;
        session.run(command, self.config.framing).await
    }
}

/// One TCP connection used for exactly one authenticate+execute exchange.
struct Session {
    framed: Framed<TcpStream, RconCodec>,
    next_id: i32,
    timeout: Duration,
}

impl Session {
    async fn connect(config: &RconConfig) -> Result<Self> {
        let timeout = config.timeout;
        let stream = with_timeout_error(
            async {
                TcpStream::connect((config.host.as_str(), config.port))
                    .await
                    .map_err(RconError::Connection)
            },
            timeout,
        )
        .await?;

        debug!("connected to RCON server");

        Ok(Self {
            framed: Framed::new(stream, RconCodec),
            next_id: 1,
            timeout,
        })
    }

    /// Next request id. Ids only need to be unique within the session for
    /// response correlation; a monotonic counter is sufficient.
    fn fresh_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    async fn send(&mut self, packet: Packet) -> Result<()> {
        let timeout = self.timeout;
        with_timeout_error(
            async {
                self.framed.send(packet).await?;
                Ok(())
            },
            timeout,
        )
        .await
    }

    async fn recv(&mut self) -> Result<Packet> {
        let timeout = self.timeout;
        with_timeout_error(
            async {
                self.framed.next().await.ok_or_else(|| {
                    RconError::Connection(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "server closed the connection",
                    ))
                })?
            },
            timeout,
        )
        .await
    }

    /// Perform the AUTH handshake.
    ///
    /// The server answers with an AUTH_RESPONSE whose id echoes ours on
    /// success and is -1 on a rejected credential. Some implementations
    /// send an empty RESPONSE_VALUE ahead of the AUTH_RESPONSE; those are
    /// skipped. Any other id is a protocol anomaly, not a quiet failure.
    #[instrument(skip_all)]
    async fn authenticate(&mut self, credential: &str) -> Result<()> {
        let auth_id = self.fresh_id();
        self.send(Packet::auth(auth_id, credential)).await?;

        loop {
            let packet = self.recv().await?;
            if packet.ptype == PacketType::RESPONSE_VALUE {
                continue;
            }
            if packet.ptype != PacketType::AUTH_RESPONSE {
                return Err(RconError::Protocol(format!(
                    "unexpected packet type {} during authentication",
                    packet.ptype.0
                )));
            }
            return match packet.id {
                -1 => Err(RconError::WrongPassword),
                id if id == auth_id => {
                    debug!("authenticated");
                    Ok(())
                }
                id => Err(RconError::Protocol(format!(
                    "authentication response for unknown request id {id}"
                ))),
            };
        }
    }

    /// Send the command and reassemble its response.
    #[instrument(skip(self))]
    async fn run(&mut self, command: &str, framing: ResponseFraming) -> Result<String> {
        let command_id = self.fresh_id();
        self.send(Packet::exec(command_id, command)).await?;

        match framing {
            ResponseFraming::Sentinel => self.collect_until_sentinel(command_id).await,
            ResponseFraming::Single => self.collect_single(command_id).await,
        }
    }

    /// Multi-packet reassembly with an end marker.
    ///
    /// Long output is split across several RESPONSE_VALUE packets and the
    /// protocol itself carries no end-of-response marker, so a second,
    /// empty EXECCOMMAND is sent at the next id. The server processes
    /// requests in order; once the sentinel id answers, every packet of the
    /// real response has been seen. Bodies are concatenated in arrival
    /// order. Partial output gathered before an error is discarded with the
    /// error — a truncated reply must not masquerade as a complete one.
    async fn collect_until_sentinel(&mut self, command_id: i32) -> Result<String> {
        let sentinel_id = self.fresh_id();
        self.send(Packet::exec(sentinel_id, "")).await?;

        let mut body = Vec::new();
        loop {
            let packet = self.recv().await?;
            if packet.ptype != PacketType::RESPONSE_VALUE {
                return Err(RconError::Protocol(format!(
                    "unexpected packet type {} in command response",
                    packet.ptype.0
                )));
            }
            if packet.id == command_id {
                body.extend_from_slice(&packet.payload);
            } else if packet.id == sentinel_id {
                debug!(bytes = body.len(), "response complete");
                return Ok(String::from_utf8_lossy(&body).into_owned());
            } else {
                return Err(RconError::Protocol(format!(
                    "response for unknown request id {}",
                    packet.id
                )));
            }
        }
    }

    /// Single-packet responses: the first RESPONSE_VALUE at the command id
    /// is the whole reply.
    async fn collect_single(&mut self, command_id: i32) -> Result<String> {
        let packet = self.recv().await?;
        if packet.ptype != PacketType::RESPONSE_VALUE {
            return Err(RconError::Protocol(format!(
                "unexpected packet type {} in command response",
                packet.ptype.0
            )));
        }
        if packet.id != command_id {
            return Err(RconError::Protocol(format!(
                "response for unknown request id {}",
                packet.id
            )));
        }
        Ok(packet.body_text().into_owned())
    }
}
