use crate::error::NetworkError;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Only plain HTTP(S) is accepted as a dataset location.
pub fn parse_dataset_url(url_str: &str) -> Result<Url, NetworkError> {
    let url = Url::parse(url_str).map_err(|source| NetworkError::InvalidUrl {
        url: url_str.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NetworkError::UnsupportedScheme {
            url: url_str.to_string(),
            scheme: other.to_string(),
        }),
    }
}

/// Download the given ZIP URL into memory. Any non-2xx status is an error.
#[instrument(level = "info", skip(client))]
pub async fn download_zip(client: &Client, url_str: &str) -> Result<Vec<u8>, NetworkError> {
    let url = parse_dataset_url(url_str)?;

    let resp = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|source| NetworkError::Request {
            url: url_str.to_string(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(NetworkError::Status {
            url: url_str.to_string(),
            status,
        });
    }
    debug!(%status, "response headers received");

    let bytes = resp.bytes().await.map_err(|source| NetworkError::Body {
        url: url_str.to_string(),
        source,
    })?;
    Ok(bytes.to_vec())
}

/// `HEAD` the URL and return the advertised content length, if any.
pub async fn probe_zip(client: &Client, url_str: &str) -> Result<Option<u64>, NetworkError> {
    let url = parse_dataset_url(url_str)?;
    let resp = client
        .head(url.as_str())
        .send()
        .await
        .map_err(|source| NetworkError::Request {
            url: url_str.to_string(),
            source,
        })?;
    if !resp.status().is_success() {
        return Err(NetworkError::Status {
            url: url_str.to_string(),
            status: resp.status(),
        });
    }
    Ok(resp
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok()))
}
