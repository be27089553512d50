use bytes::Bytes;
use serde::de::DeserializeOwned;

/// A successful response: the final URL, status and the complete body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    url:    String,
    status: u16,
    body:   Bytes,
}

impl Response {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn url(&self) -> &str { &self.url }

    pub fn status(&self) -> u16 { self.status }

    pub fn body(&self) -> &Bytes { &self.body }

    pub fn into_body(self) -> Bytes { self.body }

    /// Parses the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}
