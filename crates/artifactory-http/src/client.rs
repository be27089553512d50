use std::future::Future;

use url::Url;

use crate::error::{Error, Result};
use crate::query::Query;
use crate::response::Response;

/// Asynchronous GET capability used by the resource layer.
///
/// `path` is either an absolute `http(s)://` URL, as handed out by the REST
/// API in `uri`/`downloadUri` fields, or a path relative to the
/// implementation's configured endpoint.
///
/// # Implementations
///
/// - [`ReqwestClient`](crate::ReqwestClient): production implementation
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issues one GET and returns the complete response.
    ///
    /// Non-success statuses are reported as errors by the implementation.
    fn get(
        &self,
        path: &str,
        query: &Query,
    ) -> impl Future<Output = std::result::Result<Response, Self::Error>> + Send;
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Resolves `path` against `endpoint`.
///
/// Absolute URLs are used as given. Relative paths are appended to the
/// endpoint's path, so an endpoint of `https://host/artifactory` keeps its
/// `/artifactory` prefix.
pub fn resolve(endpoint: Option<&Url>, path: &str) -> Result<Url> {
    let raw = if is_absolute(path) {
        path.to_string()
    } else {
        let endpoint = endpoint.ok_or_else(|| Error::NoEndpoint(path.to_string()))?;
        let mut base = endpoint.clone();
        base.set_query(None);
        base.set_fragment(None);
        format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    Url::parse(&raw).map_err(|source| Error::InvalidUrl { url: raw, source })
}
