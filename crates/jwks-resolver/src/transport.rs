//! HTTP transport for fetching JWKS documents
//!
//! [`HttpFetch`] is the seam between the resolver and the network. The
//! default implementation, [`ReqwestFetch`], issues a plain GET with
//! `reqwest` and maps failures onto the error taxonomy:
//!
//! - no response at all (DNS, refused connection, timeout) → [`Error::Transport`]
//! - a response with a non-2xx status → [`Error::RemoteServer`]
//!
//! Bodies larger than [`MAX_JWKS_RESPONSE_SIZE`] are rejected while
//! streaming, before they are fully downloaded. Timeouts, TLS and connection
//! pooling are whatever the supplied `reqwest::Client` is configured with.

use crate::error::{Error, Result, TransportErrorKind};
use crate::limits::MAX_JWKS_RESPONSE_SIZE;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::future::Future;
use std::pin::Pin;

/// Future returned by [`HttpFetch::fetch`]
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;

/// Fetches the raw body of a URL
///
/// Implementations must report unreachable endpoints as
/// [`Error::Transport`] and non-success statuses as [`Error::RemoteServer`],
/// so callers can tell a down service from a missing key.
pub trait HttpFetch: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// [`HttpFetch`] backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: reqwest::Client,
    headers: HeaderMap,
}

impl ReqwestFetch {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            headers: HeaderMap::new(),
        }
    }

    /// Send `headers` with every request
    pub fn with_headers(client: reqwest::Client, headers: &[(String, String)]) -> Result<Self> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Configuration(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Configuration(format!("invalid value for header '{name}': {e}")))?;
            map.append(name, value);
        }

        Ok(Self {
            client,
            headers: map,
        })
    }
}

impl HttpFetch for ReqwestFetch {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .headers(self.headers.clone())
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::RemoteServer {
                    status: status.as_u16(),
                });
            }

            read_body(response, MAX_JWKS_RESPONSE_SIZE).await
        })
    }
}

/// Read a response body chunk by chunk, stopping once it exceeds `max` bytes
async fn read_body(mut response: reqwest::Response, max: usize) -> Result<Vec<u8>> {
    let declared = response
        .content_length()
        .map(|len| usize::try_from(len).unwrap_or(usize::MAX));
    if let Some(size) = declared.filter(|&size| size > max) {
        return Err(Error::RemoteResponseTooLarge { size, max });
    }

    let mut body = Vec::with_capacity(declared.unwrap_or(0));
    while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
        if body.len() + chunk.len() > max {
            return Err(Error::RemoteResponseTooLarge {
                size: body.len() + chunk.len(),
                max,
            });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Classify a reqwest failure and keep its full source chain in the message
fn transport_error(e: reqwest::Error) -> Error {
    let kind = if e.is_timeout() {
        TransportErrorKind::Timeout
    } else if e.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };

    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    Error::Transport { kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jwks.json")
            .with_status(200)
            .with_body(r#"{"keys":[]}"#)
            .create_async()
            .await;

        let fetch = ReqwestFetch::new(reqwest::Client::new());
        let url = format!("{}/jwks.json", server.url());

        let body = fetch.fetch(&url).await.expect("fetch");
        assert_eq!(body, br#"{"keys":[]}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jwks.json")
            .with_status(503)
            .create_async()
            .await;

        let fetch = ReqwestFetch::new(reqwest::Client::new());
        let url = format!("{}/jwks.json", server.url());

        assert_eq!(
            fetch.fetch(&url).await,
            Err(Error::RemoteServer { status: 503 })
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jwks.json")
            .match_header("user-agent", "jwks-resolver-test")
            .match_header("x-tenant", "acme")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let headers = vec![
            ("User-Agent".to_string(), "jwks-resolver-test".to_string()),
            ("X-Tenant".to_string(), "acme".to_string()),
        ];
        let fetch = ReqwestFetch::with_headers(reqwest::Client::new(), &headers).expect("headers");
        let url = format!("{}/jwks.json", server.url());

        assert!(fetch.fetch(&url).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_rejects_declared_oversized_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jwks.json")
            .with_status(200)
            .with_body(vec![b' '; MAX_JWKS_RESPONSE_SIZE + 1])
            .create_async()
            .await;

        let fetch = ReqwestFetch::new(reqwest::Client::new());
        let url = format!("{}/jwks.json", server.url());

        assert_eq!(
            fetch.fetch(&url).await,
            Err(Error::RemoteResponseTooLarge {
                size: MAX_JWKS_RESPONSE_SIZE + 1,
                max: MAX_JWKS_RESPONSE_SIZE
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_stops_reading_oversized_stream() {
        const CHUNK: usize = 64 * 1024;
        const TOTAL: usize = 32 * 1024 * 1024;

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jwks.json")
            .with_status(200)
            .with_chunked_body(|w| {
                let chunk = [b' '; CHUNK];
                for _ in 0..TOTAL / CHUNK {
                    w.write_all(&chunk)?;
                }
                Ok(())
            })
            .create_async()
            .await;

        let fetch = ReqwestFetch::new(reqwest::Client::new());
        let url = format!("{}/jwks.json", server.url());

        // No Content-Length: the limit must trip while streaming
        match fetch.fetch(&url).await {
            Err(Error::RemoteResponseTooLarge { size, max }) => {
                assert_eq!(max, MAX_JWKS_RESPONSE_SIZE);
                assert!(size > max);
                // One decoder buffer past the limit at most, never the whole stream
                assert!(size <= 2 * max, "read {size} of {TOTAL} bytes before stopping");
            }
            other => panic!("expected RemoteResponseTooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_accepts_body_at_limit() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jwks.json")
            .with_status(200)
            .with_chunked_body(|w| w.write_all(&vec![b' '; MAX_JWKS_RESPONSE_SIZE]))
            .create_async()
            .await;

        let fetch = ReqwestFetch::new(reqwest::Client::new());
        let url = format!("{}/jwks.json", server.url());

        let body = fetch.fetch(&url).await.expect("body at limit");
        assert_eq!(body.len(), MAX_JWKS_RESPONSE_SIZE);
    }

    #[tokio::test]
    async fn test_fetch_unresolvable_host() {
        // .invalid is reserved and never resolves (RFC 6761)
        let fetch = ReqwestFetch::new(reqwest::Client::new());

        let result = fetch.fetch("http://jwks.invalid/jwks.json").await;
        assert!(matches!(
            result,
            Err(Error::Transport {
                kind: TransportErrorKind::Connect,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_header_name() {
        let headers = vec![("bad header".to_string(), "value".to_string())];
        let result = ReqwestFetch::with_headers(reqwest::Client::new(), &headers);
        assert!(matches!(result, Err(Error::Configuration(msg)) if msg.contains("invalid header name")));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Nothing listens on port 1 of the loopback interface
        let fetch = ReqwestFetch::new(reqwest::Client::new());

        let result = fetch.fetch("http://127.0.0.1:1/jwks.json").await;
        assert!(matches!(
            result,
            Err(Error::Transport {
                kind: TransportErrorKind::Connect,
                ..
            })
        ));
    }
}
