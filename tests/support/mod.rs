//! In-process fake RCON servers for integration tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)] // not every test binary uses every helper

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::codec::Framed;

use rcon_gateway::config::{RconConfig, Secret};
use rcon_gateway::core::codec::RconCodec;
use rcon_gateway::core::packet::{Packet, PacketType};

pub type ServerConn = Framed<TcpStream, RconCodec>;

/// Bind an ephemeral port and run `behavior` on the first accepted
/// connection.
pub async fn spawn_server<F, Fut>(behavior: F) -> (SocketAddr, JoinHandle<()>)
where
    F: FnOnce(ServerConn) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        behavior(Framed::new(stream, RconCodec)).await;
    });
    (addr, handle)
}

/// Client config pointed at a fake server, with a short test timeout.
pub fn client_config(addr: SocketAddr, password: &str) -> RconConfig {
    RconConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        password: Secret::new(password),
        timeout: Duration::from_secs(2),
        ..RconConfig::default()
    }
}

/// Handle the AUTH exchange: accept `password`, reject anything else with
/// id -1. Returns whether authentication succeeded.
pub async fn handle_auth(conn: &mut ServerConn, password: &str) -> bool {
    let packet = conn.next().await.unwrap().unwrap();
    assert_eq!(packet.ptype, PacketType::AUTH);

    if packet.payload == password.as_bytes() {
        conn.send(Packet::new(packet.id, PacketType::AUTH_RESPONSE, Vec::new()))
            .await
            .unwrap();
        true
    } else {
        conn.send(Packet::new(-1, PacketType::AUTH_RESPONSE, Vec::new()))
            .await
            .unwrap();
        false
    }
}

/// Handle one sentinel-framed EXECCOMMAND exchange, splitting the reply
/// into `chunks` RESPONSE_VALUE packets. Returns the command received.
pub async fn handle_command(conn: &mut ServerConn, chunks: &[&str]) -> String {
    let command = conn.next().await.unwrap().unwrap();
    assert_eq!(command.ptype, PacketType::EXECCOMMAND);

    let sentinel = conn.next().await.unwrap().unwrap();
    assert_eq!(sentinel.ptype, PacketType::EXECCOMMAND);
    assert!(sentinel.payload.is_empty());

    for chunk in chunks {
        conn.send(Packet::new(
            command.id,
            PacketType::RESPONSE_VALUE,
            chunk.as_bytes(),
        ))
        .await
        .unwrap();
    }
    conn.send(Packet::new(
        sentinel.id,
        PacketType::RESPONSE_VALUE,
        Vec::new(),
    ))
    .await
    .unwrap();

    String::from_utf8_lossy(&command.payload).into_owned()
}

/// Full scripted session: authenticate, answer one command with `chunks`,
/// then drain until the client hangs up.
pub async fn spawn_scripted(
    password: &'static str,
    chunks: &'static [&'static str],
) -> (SocketAddr, JoinHandle<()>) {
    spawn_server(move |mut conn| async move {
        if handle_auth(&mut conn, password).await {
            handle_command(&mut conn, chunks).await;
        }
        while let Some(result) = conn.next().await {
            if result.is_err() {
                break;
            }
        }
    })
    .await
}

/// Server that accepts the connection and then never responds. The
/// returned receiver resolves once the server observes the client closing
/// the socket.
pub async fn spawn_unresponsive() -> (SocketAddr, oneshot::Receiver<()>) {
    let (closed_tx, closed_rx) = oneshot::channel();
    let (addr, _handle) = spawn_server(move |mut conn| async move {
        // Drain frames without ever answering; next() returning None or an
        // error means the client side is gone.
        loop {
            match conn.next().await {
                Some(Ok(_)) => continue,
                _ => break,
            }
        }
        let _ = closed_tx.send(());
    })
    .await;
    (addr, closed_rx)
}
