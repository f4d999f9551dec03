//! Shared utilities for integration testing.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use video_relay::config::RelayConfig;
use video_relay::http::HttpServer;
use video_relay::lifecycle::Shutdown;
use video_relay::upstream::UpstreamPool;

/// How the mock origin answers HEAD probes.
#[derive(Clone, Copy)]
pub enum HeadMode {
    /// 200 with Content-Length and Content-Type.
    Ok,
    /// Close the connection without answering, like hosts that refuse
    /// length-revealing probes.
    Drop,
}

/// How the mock origin answers GET requests.
#[derive(Clone, Copy)]
pub enum RangeMode {
    /// Honor `Range` headers with a proper 206 + Content-Range.
    Honor,
    /// Ignore ranges entirely: 200, no Content-Length, body to EOF.
    Ignore,
    /// Reject every GET with 403.
    Reject,
}

pub struct MockUpstream {
    pub addr: SocketAddr,
    pub body: Arc<Vec<u8>>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/video.mp4", self.addr)
    }
}

/// Deterministic resource bytes so range slices are checkable.
pub fn test_body(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Start a mock origin serving one resource of `body_len` bytes.
pub async fn start_mock_upstream(body_len: usize, head: HeadMode, range: RangeMode) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = Arc::new(test_body(body_len));
    let served = body.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let body = served.clone();
                    tokio::spawn(async move {
                        handle_connection(socket, body, head, range).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, body }
}

async fn handle_connection(
    mut socket: TcpStream,
    body: Arc<Vec<u8>>,
    head: HeadMode,
    range: RangeMode,
) {
    let Some(request_head) = read_request_head(&mut socket).await else {
        return;
    };
    let is_head = request_head.starts_with("HEAD");
    let range_header = request_head
        .lines()
        .map(str::to_ascii_lowercase)
        .find_map(|line| line.strip_prefix("range:").map(|v| v.trim().to_string()));

    if is_head {
        match head {
            HeadMode::Ok => {
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: video/mp4\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
            // Dropped without a response: the client sees a dead
            // connection and must fall back.
            HeadMode::Drop => {}
        }
        return;
    }

    match range {
        RangeMode::Reject => {
            let response =
                "HTTP/1.1 403 Forbidden\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        RangeMode::Ignore => {
            // Length withheld: body delimited by connection close.
            let response = "HTTP/1.1 200 OK\r\nContent-Type: video/mp4\r\nConnection: close\r\n\r\n";
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.write_all(&body).await;
            let _ = socket.shutdown().await;
        }
        RangeMode::Honor => match range_header.as_deref().and_then(|v| parse_mock_range(v, body.len())) {
            Some((start, end)) => {
                let slice = &body[start..=end];
                let response = format!(
                    "HTTP/1.1 206 Partial Content\r\nContent-Range: bytes {}-{}/{}\r\nContent-Length: {}\r\nContent-Type: video/mp4\r\nConnection: close\r\n\r\n",
                    start,
                    end,
                    body.len(),
                    slice.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.write_all(slice).await;
                let _ = socket.shutdown().await;
            }
            None => {
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: video/mp4\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            }
        },
    }
}

async fn read_request_head(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    loop {
        match socket.read(&mut tmp).await {
            Ok(0) => return None,
            Ok(n) => {
                buf.extend_from_slice(&tmp[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    return Some(String::from_utf8_lossy(&buf).to_string());
                }
            }
            Err(_) => return None,
        }
    }
}

/// The relay always sends fully-bounded ranges (`bytes=a-b`).
fn parse_mock_range(value: &str, len: usize) -> Option<(usize, usize)> {
    let spec = value.strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;
    let start: usize = start.parse().ok()?;
    let end: usize = end.parse::<usize>().ok()?.min(len - 1);
    (start <= end).then_some((start, end))
}

/// Start the relay server on an ephemeral port with default settings.
pub async fn start_relay() -> (SocketAddr, Shutdown) {
    start_relay_with(RelayConfig::default()).await
}

/// Start the relay server with a custom configuration.
pub async fn start_relay_with(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let pool = Arc::new(UpstreamPool::new(&config.upstream).unwrap());
    let server = HttpServer::new(Arc::new(config), pool);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
