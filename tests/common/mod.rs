//! Shared utilities for integration testing the decoy.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use decoy_listener::config::DecoyConfig;
use decoy_listener::lifecycle::Shutdown;
use decoy_listener::net::{ConnectionTracker, Listener};

/// Start a decoy on an ephemeral loopback port with default settings.
#[allow(dead_code)]
pub async fn start_decoy() -> (SocketAddr, Shutdown, ConnectionTracker) {
    let mut config = DecoyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    start_decoy_with(config).await
}

/// Start a decoy with the given configuration, returning its address, the
/// shutdown handle that stops it, and the live-connection tracker.
#[allow(dead_code)]
pub async fn start_decoy_with(config: DecoyConfig) -> (SocketAddr, Shutdown, ConnectionTracker) {
    let listener = Listener::bind(Arc::new(config)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let tracker = listener.tracker();

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        listener.run(shutdown_rx).await;
    });

    (addr, shutdown, tracker)
}

/// Send one probe and read the full reply until the decoy closes.
#[allow(dead_code)]
pub async fn exchange(addr: SocketAddr, probe: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(probe).await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    reply
}

/// Start a one-file HTTP server that answers every request with `body`.
#[allow(dead_code)]
pub async fn start_file_server(body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
