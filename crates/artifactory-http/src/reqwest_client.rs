use std::time::Duration;

use reqwest::{Client, Proxy, Url};
use thiserror::Error;
use tracing::debug;

use crate::client::{HttpClient, resolve};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::response::Response;

const DEFAULT_USER_AGENT: &str = concat!("artifactory-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientSettingError {
    #[error("Invalid proxy URL {url}: {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Connection settings for [`ReqwestClient`].
///
/// Nothing is read from the environment; callers fill this in explicitly.
#[derive(Debug, Clone, Default)]
pub struct ClientSetting {
    pub endpoint:        Option<Url>,
    pub proxies:         Option<Vec<Url>>,
    pub connect_timeout: Option<Duration>,
    pub timeout:         Option<Duration>,
    pub user_agent:      Option<String>,
}

impl ClientSetting {
    pub fn new() -> Self { Self::default() }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn with_proxy(mut self, proxy: Url) -> Self {
        self.proxies.get_or_insert_with(Vec::new).push(proxy);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> std::result::Result<ReqwestClient, ClientSettingError> {
        let mut cb = Client::builder()
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()));

        if let Some(proxies) = self.proxies {
            let (secure, insecure): (Vec<Url>, Vec<Url>) =
                proxies.into_iter().partition(|u| u.scheme() == "https");

            for u in secure {
                cb = cb.proxy(Proxy::https(u.as_str()).map_err(|source| {
                    ClientSettingError::Proxy {
                        url: u.to_string(),
                        source,
                    }
                })?);
            }

            for u in insecure {
                cb = cb.proxy(Proxy::http(u.as_str()).map_err(|source| {
                    ClientSettingError::Proxy {
                        url: u.to_string(),
                        source,
                    }
                })?);
            }
        }

        if let Some(timeout) = self.connect_timeout {
            cb = cb.connect_timeout(timeout);
        }
        if let Some(timeout) = self.timeout {
            cb = cb.timeout(timeout);
        }

        Ok(ReqwestClient {
            client:   cb.build()?,
            endpoint: self.endpoint,
        })
    }
}

/// Production [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client:   Client,
    endpoint: Option<Url>,
}

impl ReqwestClient {
    /// A client for `endpoint` with otherwise default settings.
    pub fn new(endpoint: Url) -> std::result::Result<Self, ClientSettingError> {
        ClientSetting::new().with_endpoint(endpoint).build()
    }

    pub fn endpoint(&self) -> Option<&Url> { self.endpoint.as_ref() }

    /// The full URL a GET for `path` and `query` would hit.
    pub fn url_for(&self, path: &str, query: &Query) -> Result<Url> {
        let mut url = resolve(self.endpoint.as_ref(), path)?;
        query.apply(&mut url);
        Ok(url)
    }
}

impl HttpClient for ReqwestClient {
    type Error = Error;

    async fn get(&self, path: &str, query: &Query) -> Result<Response> {
        let url = self.url_for(path, query)?;
        debug!(url = %url, "GET");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url:    url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.bytes().await?;
        debug!(url = %final_url, status = status.as_u16(), bytes = body.len(), "response");

        Ok(Response::new(final_url, status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    use super::*;

    /// Answers a single request on a local port and hands back its request line.
    fn serve_once(status_line: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (endpoint, handle)
    }

    #[test]
    fn url_for_joins_endpoint_and_query() {
        let client = ReqwestClient::new(Url::parse("https://repo.example.com/artifactory").unwrap())
            .unwrap();

        let url = client
            .url_for("/api/search/artifact", &Query::new().with("name", ".*"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://repo.example.com/artifactory/api/search/artifact?name=.*"
        );
    }

    #[test]
    fn build_accepts_mixed_proxies_and_timeouts() {
        let client = ClientSetting::new()
            .with_proxy(Url::parse("https://proxy.example.com:8443").unwrap())
            .with_proxy(Url::parse("http://proxy.example.com:8080").unwrap())
            .with_connect_timeout(Duration::from_secs(5))
            .with_timeout(Duration::from_secs(30))
            .with_user_agent("test-agent")
            .build()
            .unwrap();

        assert!(client.endpoint().is_none());
    }

    #[test]
    fn relative_path_without_endpoint_is_rejected() {
        let client = ClientSetting::new().build().unwrap();
        let err = client.url_for("/api/search/artifact", &Query::new()).unwrap_err();
        assert!(matches!(err, Error::NoEndpoint(_)));
    }

    #[tokio::test]
    async fn get_without_endpoint_fails_before_sending() {
        let client = ClientSetting::new().build().unwrap();
        let err = client.get("/api/search/artifact", &Query::new()).await.unwrap_err();
        assert!(matches!(err, Error::NoEndpoint(_)));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (endpoint, server) = serve_once("HTTP/1.1 404 Not Found", "");
        let client = ReqwestClient::new(endpoint).unwrap();

        let err = client
            .get("/api/storage/x", &Query::new().flag("properties"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::Status { status: 404, ref url } if url.ends_with("/api/storage/x?properties")),
            "{err}"
        );
        server.join().unwrap();
    }

    #[tokio::test]
    async fn get_sends_query_and_returns_body() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", r#"{"properties":{}}"#);
        let client = ReqwestClient::new(endpoint).unwrap();

        let response = client
            .get("/api/storage/x", &Query::new().flag("properties"))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.into_body().as_ref(), br#"{"properties":{}}"#);
        assert_eq!(server.join().unwrap(), "GET /api/storage/x?properties HTTP/1.1");
    }
}
