/// External API clients module
use crate::config::Credential;
use crate::errors::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg(test)]
pub mod mock;

/// Read-only access to the NASA API host.
///
/// `path` is relative to the host (e.g. `/planetary/apod`). Implementations
/// attach the credential and make exactly one request per call.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value>;
}

/// Decode a raw upstream payload into a typed record.
pub fn decode<T: DeserializeOwned>(path: &str, value: Value) -> ApiResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::UpstreamShape(format!("{path}: {e}")))
}

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent("nasa-explorer/0.1")
            .default_headers(headers)
            .build()
            .map_err(ApiError::UpstreamTransport)?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// NASA APIs client (APOD, EPIC, Mars Rover Photos)
pub struct NasaClient {
    http_client: HttpClient,
    base_url: String,
    credential: Credential,
}

impl NasaClient {
    pub fn new(base_url: String, credential: Credential, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }
}

#[async_trait]
impl UpstreamApi for NasaClient {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        let api_key = self.credential.api_key()?;
        let url = format!("{}{}", self.base_url, path);
        debug!(path, "upstream request");

        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .query(query)
            .query(&[("api_key", api_key)])
            .send()
            .await
            .map_err(ApiError::UpstreamTransport)?;

        let status = resp.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "upstream request failed");
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        resp.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                ApiError::UpstreamShape(format!("{path}: {e}"))
            } else {
                ApiError::UpstreamTransport(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode, Uri},
        response::{IntoResponse, Response},
        Router,
    };
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Request line and headers as seen by the local upstream
    type Seen = Arc<Mutex<Vec<(Uri, HeaderMap)>>>;

    async fn upstream_route(State(seen): State<Seen>, uri: Uri, headers: HeaderMap) -> Response {
        let path = uri.path().to_string();
        seen.lock().unwrap().push((uri, headers));
        match path.as_str() {
            "/unavailable" => {
                (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance").into_response()
            }
            "/html" => (StatusCode::OK, "<html><body>not json</body></html>").into_response(),
            _ => axum::Json(json!({"title": "M101"})).into_response(),
        }
    }

    /// Serve a fake NASA host on an ephemeral port and return a client for it.
    async fn local_upstream() -> (NasaClient, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .fallback(upstream_route)
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service()).await.unwrap();
        });

        let client = NasaClient::new(
            format!("http://{addr}"),
            Credential::Configured("test-key".into()),
            Duration::from_secs(5),
        )
        .unwrap();
        (client, seen)
    }

    #[tokio::test]
    async fn test_fetch_attaches_key_and_no_cache_headers() {
        let (client, seen) = local_upstream().await;

        let body = client
            .fetch("/planetary/apod", &[("date", "2024-01-01".to_string())])
            .await
            .unwrap();
        assert_eq!(body["title"], "M101");

        let seen = seen.lock().unwrap();
        let (uri, headers) = &seen[0];
        assert_eq!(uri.path(), "/planetary/apod");
        assert_eq!(uri.query(), Some("date=2024-01-01&api_key=test-key"));
        assert_eq!(headers["cache-control"], "no-cache");
        assert_eq!(headers["pragma"], "no-cache");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_status_error() {
        let (client, seen) = local_upstream().await;

        let err = client.fetch("/unavailable", &[]).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::UpstreamStatus { status: 503, ref path } if path == "/unavailable"
        ));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_shape_error() {
        let (client, _) = local_upstream().await;

        let err = client.fetch("/html", &[]).await.unwrap_err();

        assert!(matches!(err, ApiError::UpstreamShape(_)));
    }

    #[tokio::test]
    async fn test_truncated_body_is_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // Promise 100 bytes, send a few, hang up.
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"title\": ")
                .await;
            let _ = socket.shutdown().await;
        });

        let client = NasaClient::new(
            format!("http://{addr}"),
            Credential::Configured("test-key".into()),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = client.fetch("/planetary/apod", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamTransport(_)), "{err:?}");
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_decode_reports_shape_error() {
        let err = decode::<Named>("/x", json!({"other": 1})).unwrap_err();
        assert!(matches!(err, ApiError::UpstreamShape(msg) if msg.starts_with("/x:")));
    }

    #[test]
    fn test_decode_ok() {
        let named: Named = decode("/x", json!({"name": "curiosity"})).unwrap();
        assert_eq!(named.name, "curiosity");
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        // Nothing listens here; a real request would surface as a transport error.
        let client = NasaClient::new(
            "http://127.0.0.1:9".into(),
            Credential::Missing,
            Duration::from_secs(1),
        )
        .unwrap();

        let err = client.fetch("/planetary/apod", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = NasaClient::new(
            "http://127.0.0.1:9".into(),
            Credential::Configured("key".into()),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.fetch("/planetary/apod", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamTransport(_)));
    }
}
