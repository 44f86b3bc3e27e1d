//! A throwaway HTTP server standing in for the sensor endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinHandle, JoinSet};
use tracing::debug;

/// How the stub answers every request.
#[derive(Debug, Clone)]
pub enum StubResponse {
    /// `200 OK` with this JSON body.
    Json(String),
    /// The given status with this body.
    Status(u16, String),
    /// Read the request and never answer.
    Hang,
}

/// HTTP server on an ephemeral loopback port. Stops when dropped.
#[derive(Debug)]
pub struct StubSensorServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl StubSensorServer {
    /// Bind to `127.0.0.1:0` and start answering with `response`.
    ///
    /// # Errors
    ///
    /// Returns the bind error if no port is available.
    pub async fn start(response: StubResponse) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let hits = Arc::new(AtomicUsize::new(0));

        let task = tokio::spawn(serve(listener, response, Arc::clone(&hits)));
        debug!(%addr, "stub sensor server listening");

        Ok(Self { addr, hits, task })
    }

    /// URL of the sensor resource.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/sensor-data", self.addr)
    }

    /// Number of requests received.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for StubSensorServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(listener: TcpListener, response: StubResponse, hits: Arc<AtomicUsize>) {
    // Dropping the set when this task is aborted also aborts the
    // connection tasks, including hanging ones.
    let mut connections = JoinSet::new();
    while let Ok((stream, _)) = listener.accept().await {
        connections.spawn(answer(stream, response.clone(), Arc::clone(&hits)));
    }
}

async fn answer(mut stream: TcpStream, response: StubResponse, hits: Arc<AtomicUsize>) {
    if read_request_head(&mut stream).await.is_err() {
        return;
    }
    hits.fetch_add(1, Ordering::SeqCst);

    let (status, body) = match response {
        StubResponse::Json(body) => (200, body),
        StubResponse::Status(status, body) => (status, body),
        StubResponse::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return;
        },
    };

    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    let raw = format!(
        "HTTP/1.1 {status} {reason}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(raw.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Read until the blank line ending the request head. GET requests carry no
/// body.
async fn read_request_head(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0_u8; 512];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            return Ok(());
        }
    }
}
