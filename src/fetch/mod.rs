// src/fetch/mod.rs

use crate::error::NetworkError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::info;

pub mod zips;

/// Source of the raw dataset archive.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, NetworkError>;
}

/// Fetches over HTTP with a shared `reqwest::Client`.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, NetworkError> {
        let start = Instant::now();
        let bytes = zips::download_zip(&self.client, url).await?;
        info!(
            size_mb = %format!("{:.2}", megabytes(bytes.len() as u64)),
            elapsed = ?start.elapsed(),
            "downloaded dataset archive"
        );
        Ok(bytes)
    }
}

pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a random local port.
    async fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = sock.read(&mut buf).await;
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            sock.write_all(head.as_bytes()).await.unwrap();
            sock.write_all(body).await.unwrap();
            sock.shutdown().await.ok();
        });
        format!("http://{}/Inputs_LandUse.zip", addr)
    }

    fn local_fetcher() -> HttpFetcher {
        HttpFetcher::new(Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let url = serve_once("200 OK", b"PK\x03\x04fake").await;
        let bytes = local_fetcher().fetch(&url).await.unwrap();
        assert_eq!(bytes, b"PK\x03\x04fake");
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn logs_download_size_once() {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let url = serve_once("200 OK", b"PK\x03\x04fake").await;
        local_fetcher().fetch(&url).await.unwrap();

        let logs = String::from_utf8_lossy(&sink.0.lock().unwrap()).into_owned();
        assert_eq!(logs.matches("size_mb").count(), 1, "{logs}");
    }

    #[tokio::test]
    async fn not_found_is_a_network_error() {
        let url = serve_once("404 Not Found", b"").await;
        let err = local_fetcher().fetch(&url).await.unwrap_err();
        match err {
            NetworkError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        // bind then drop so the port is closed
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_fetcher()
            .fetch(&format!("http://{}/x.zip", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Request { .. }));
    }

    #[tokio::test]
    async fn rejects_non_http_urls() {
        let err = local_fetcher()
            .fetch("ftp://example.com/x.zip")
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::UnsupportedScheme { .. }));

        let err = local_fetcher().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn probe_reads_advertised_length() {
        let url = serve_once("200 OK", b"12345").await;
        let client = Client::builder().no_proxy().build().unwrap();
        let len = zips::probe_zip(&client, &url).await.unwrap();
        assert_eq!(len, Some(5));
    }

    #[test]
    fn megabytes_rounds_from_bytes() {
        assert_eq!(megabytes(1024 * 1024), 1.0);
        assert_eq!(megabytes(0), 0.0);
    }
}
