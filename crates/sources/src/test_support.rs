//! Test doubles for attraction sources.
//!
//! - [`StaticAttractionSource`] returns a fixed list (or a fixed failure)
//!   without any I/O, optionally after a delay.
//! - [`MockBackend`] is a minimal HTTP server on a random loopback port that
//!   answers configured paths with canned JSON bodies.

use crate::error::{Result, SourceError};
use crate::source::AttractionSource;
use async_trait::async_trait;
use data_loader::Attraction;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// ============================================================================
// Static source
// ============================================================================

#[derive(Debug, Clone)]
enum StaticResponse {
    List(Vec<Attraction>),
    Failure(String),
}

/// Source returning a pre-configured response.
#[derive(Debug)]
pub struct StaticAttractionSource {
    name: String,
    response: StaticResponse,
    delay: Duration,
    calls: AtomicUsize,
}

impl StaticAttractionSource {
    /// A source that always returns `attractions`.
    pub fn new(name: impl Into<String>, attractions: Vec<Attraction>) -> Self {
        Self {
            name: name.into(),
            response: StaticResponse::List(attractions),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every fetch fails with a network error.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: StaticResponse::Failure(message.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleep for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of fetches started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttractionSource for StaticAttractionSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Attraction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.response {
            StaticResponse::List(attractions) => Ok(attractions.clone()),
            StaticResponse::Failure(message) => Err(SourceError::Network {
                url: format!("static://{}", self.name),
                message: message.clone(),
            }),
        }
    }
}

// ============================================================================
// Mock HTTP backend
// ============================================================================

type Routes = Arc<Mutex<HashMap<String, (u16, String)>>>;

/// Minimal HTTP/1.1 server for exercising the HTTP sources.
///
/// Unconfigured paths answer 404. The server task is aborted on drop.
pub struct MockBackend {
    addr: SocketAddr,
    routes: Routes,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to a random loopback port and start serving.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to get local address");
        let routes: Routes = Arc::default();

        let shared = Arc::clone(&routes);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&shared);
                tokio::spawn(async move {
                    let _ = serve(stream, routes).await;
                });
            }
        });

        Self {
            addr,
            routes,
            handle,
        }
    }

    /// Answer `path` with `status` and `body`.
    pub fn route(self, path: &str, status: u16, body: &str) -> Self {
        self.routes
            .lock()
            .expect("routes lock poisoned")
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(mut stream: TcpStream, routes: Routes) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..n]);
    }

    let request = String::from_utf8_lossy(&request);
    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    let (status, body) = routes
        .lock()
        .ok()
        .and_then(|routes| routes.get(&path).cloned())
        .unwrap_or_else(|| (404, r#"{"error": "not found"}"#.to_string()));

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
