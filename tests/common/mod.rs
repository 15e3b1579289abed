//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ban_check_proxy::{HttpServer, ServiceConfig, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` receives the raw request head (request line plus headers) and returns
/// the status code and body to answer with.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let (status, body) = f(head).await;
                        let response = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
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

/// Start a mock upstream that always returns the same answer.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> SocketAddr {
    start_programmable_upstream(move |_| async move { (status, body.to_string()) }).await
}

async fn read_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Default config pointed at the given mock upstreams.
pub fn service_config(info: SocketAddr, ban: SocketAddr) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.info_url = format!("http://{}/get", info);
    config.upstream.ban_url = format!("http://{}/ban", ban);
    config.upstream.info_timeout_ms = 1_000;
    config.upstream.ban_timeout_ms = 1_000;
    config
}

/// Run the service on an ephemeral port. Trigger the returned handle to stop it.
pub async fn start_service(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

pub const ACCOUNT_BODY: &str = r#"{
    "AccountInfo": {
        "AccountName": "Shadow",
        "AccountRegion": "SG",
        "AccountLevel": 67,
        "AccountEXP": 3012456,
        "AccountLastLogin": "2025-02-10 20:27:51 BDT",
        "AccountCreateTime": "2019-07-01 10:00:00 BDT"
    },
    "AccountProfileInfo": { "BrRankPoint": 3450 },
    "GuildInfo": { "GuildName": "Night Owls" },
    "SocialInfo": { "signature": "Top fragger since season one. Add me for ranked squads, no campers please!" }
}"#;

pub const NOT_BANNED_BODY: &str = r#"{"status": "success", "data": {"is_banned": 0, "period": 0}}"#;
pub const BANNED_BODY: &str = r#"{"status": "success", "data": {"is_banned": 1, "period": 3}}"#;
