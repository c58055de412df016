//! End-to-end tests of the decoy connection pipeline.

use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use decoy_listener::config::DecoyConfig;

mod common;

#[tokio::test]
async fn http_probe_gets_forbidden_page() {
    let (addr, _shutdown, _tracker) = common::start_decoy().await;

    let reply = common::exchange(addr, b"GET /index.html HTTP/1.1\r\n\r\n").await;
    let reply = String::from_utf8(reply).unwrap();

    assert!(reply.starts_with("HTTP/1.1 403 Forbidden\r\n"), "{reply:?}");
    assert!(reply.contains("Server: Apache/2.4.29 (Ubuntu)\r\n"));

    let (head, body) = reply.split_once("\r\n\r\n").unwrap();
    let declared: usize = head
        .lines()
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .expect("Content-Length header present")
        .parse()
        .unwrap();
    assert_eq!(declared, body.len());
    assert!(body.contains("Access Forbidden."));
}

#[tokio::test]
async fn ssh_probe_gets_exact_banner() {
    let (addr, _shutdown, _tracker) = common::start_decoy().await;

    let reply = common::exchange(addr, b"SSH-2.0-libssh_0.8\r\n").await;

    assert_eq!(reply, b"SSH-2.0-OpenSSH_7.4\r\n");
}

#[tokio::test]
async fn immediate_close_gets_no_reply() {
    let (addr, _shutdown, tracker) = common::start_decoy().await;

    // Port-scan behavior: open the connection, send nothing, close the
    // sending side right away.
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let (mut read_half, mut write_half) = stream.split();
    tokio::io::AsyncWriteExt::shutdown(&mut write_half).await.unwrap();

    let mut reply = Vec::new();
    read_half.read_to_end(&mut reply).await.unwrap();
    assert!(reply.is_empty());

    assert!(tracker.drain(Duration::from_secs(2)).await);
}

#[tokio::test]
async fn scanner_probe_gets_silence() {
    let (addr, _shutdown, _tracker) = common::start_decoy().await;

    let reply = common::exchange(addr, b"nmap probe data").await;

    assert!(reply.is_empty());
}

#[tokio::test]
async fn scanner_http10_signature_gets_silence() {
    let (addr, _shutdown, _tracker) = common::start_decoy().await;

    let reply = common::exchange(addr, b"GET / HTTP/1.0\r\n\r\n").await;

    assert!(reply.is_empty());
}

#[tokio::test]
async fn unknown_probe_gets_access_denied() {
    let (addr, _shutdown, _tracker) = common::start_decoy().await;

    let reply = common::exchange(addr, b"randomgarbage\x00\x01").await;

    assert_eq!(reply, b"Access Denied.\r\n");
}

#[tokio::test]
async fn idle_peer_is_closed_after_the_io_timeout() {
    let mut config = DecoyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.timeouts.io_ms = 100;
    let (addr, _shutdown, tracker) = common::start_decoy_with(config).await;

    let started = Instant::now();
    let mut stream = TcpStream::connect(addr).await.unwrap();

    // Never send anything; the decoy should hang up on its own.
    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();

    assert!(reply.is_empty());
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "decoy held an idle peer too long: {:?}",
        started.elapsed()
    );
    assert!(tracker.drain(Duration::from_secs(2)).await);
}

#[tokio::test]
async fn reset_peer_still_releases_its_handler() {
    let (addr, _shutdown, tracker) = common::start_decoy().await;

    let stream = TcpStream::connect(addr).await.unwrap();
    // Linger 0 turns the close below into a hard RST instead of FIN.
    stream.set_linger(Some(Duration::from_secs(0))).unwrap();
    drop(stream);

    assert!(tracker.drain(Duration::from_secs(2)).await);
    assert_eq!(tracker.active_count(), 0);
}

#[tokio::test]
async fn shutdown_stops_the_accept_loop() {
    let (addr, shutdown, tracker) = common::start_decoy().await;

    // The decoy serves before shutdown...
    let reply = common::exchange(addr, b"SSH-2.0-probe\r\n").await;
    assert_eq!(reply, b"SSH-2.0-OpenSSH_7.4\r\n");

    shutdown.trigger();
    assert!(tracker.drain(Duration::from_secs(2)).await);
    tokio::time::sleep(Duration::from_millis(200)).await;

    // ...and refuses connections after it.
    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn concurrent_probes_are_isolated() {
    let (addr, _shutdown, tracker) = common::start_decoy().await;

    let (http, ssh, garbage) = tokio::join!(
        common::exchange(addr, b"GET / HTTP/1.1\r\n\r\n"),
        common::exchange(addr, b"SSH-2.0-scan\r\n"),
        common::exchange(addr, b"whoareyou"),
    );

    assert!(String::from_utf8(http)
        .unwrap()
        .starts_with("HTTP/1.1 403 Forbidden\r\n"));
    assert_eq!(ssh, b"SSH-2.0-OpenSSH_7.4\r\n");
    assert_eq!(garbage, b"Access Denied.\r\n");

    assert!(tracker.drain(Duration::from_secs(2)).await);
}
