//! Data layer: the artifact record, operation options and wire shapes.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;

/// Arbitrary key/value annotations attached to an artifact.
///
/// In practice the service sends `string -> [string]`, but nothing here
/// relies on that shape.
pub type Properties = Map<String, Value>;

/// A single artifact on the remote service.
///
/// Records built by [`Artifact::from_hash`] have every remote field set.
/// Records built by hand may leave any of them empty; operations that need
/// a missing field fail before doing any I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    /// Canonical API resource, e.g. `.../api/storage/libs-release-local/org/acme/a.deb`.
    pub api_path:      Option<String>,
    /// Where the bytes are served from.
    pub download_path: Option<String>,
    /// Preconfigured local destination for [`Artifact::download`].
    pub local_path:    Option<PathBuf>,
    pub md5:           Option<String>,
    pub sha1:          Option<String>,
    pub created:       Option<DateTime<FixedOffset>>,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub last_updated:  Option<DateTime<FixedOffset>>,
    pub size:          Option<u64>,

    pub(crate) properties: OnceCell<Properties>,
}

impl Artifact {
    pub fn new() -> Self { Self::default() }

    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = Some(api_path.into());
        self
    }

    pub fn with_download_path(mut self, download_path: impl Into<String>) -> Self {
        self.download_path = Some(download_path.into());
        self
    }

    pub fn with_local_path(mut self, local_path: impl Into<PathBuf>) -> Self {
        self.local_path = Some(local_path.into());
        self
    }

    /// Properties already fetched for this record, if any.
    pub fn cached_properties(&self) -> Option<&Properties> { self.properties.get() }
}

/// Options for [`Artifact::search`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Restrict the search to these repositories.
    pub repos: Option<Vec<String>>,
}

impl SearchOptions {
    pub fn new() -> Self { Self::default() }

    pub fn repos<I, S>(mut self, repos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repos = Some(repos.into_iter().map(Into::into).collect());
        self
    }
}

/// Options for [`Artifact::download`]. Unset fields fall back to the
/// record's `local_path` and `download_path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Local file or existing directory.
    pub to:   Option<PathBuf>,
    /// Remote path or absolute URL.
    pub from: Option<String>,
}

impl DownloadOptions {
    pub fn new() -> Self { Self::default() }

    pub fn to(mut self, to: impl Into<PathBuf>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// `GET /api/search/artifact` body.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResults {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    pub uri: String,
}

/// `GET <apiPath>?properties` body.
#[derive(Debug, Deserialize)]
pub(crate) struct PropertiesResponse {
    pub properties: Properties,
}

/// File info as returned by the storage API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArtifactDescription {
    pub uri:           String,
    pub checksums:     Checksums,
    pub created:       String,
    pub download_uri:  String,
    pub last_modified: String,
    pub last_updated:  String,
    pub size:          Size,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Checksums {
    pub md5:  String,
    pub sha1: String,
}

/// The storage API reports `size` as a decimal string; accept numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Size {
    Number(u64),
    Text(String),
}
