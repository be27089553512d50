//! Core layer: pure transformations with no network or disk access.

use std::io;
use std::path::{Component, Path, PathBuf};

use artifactory_http::Query;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::data::{Artifact, ArtifactDescription, SearchOptions, Size};
use crate::error::{Error, Result};

pub const SEARCH_PATH: &str = "/api/search/artifact";

/// Name pattern used when a search is issued without a name.
pub const MATCH_ALL: &str = ".*";

pub fn search_query(name: Option<&str>, options: &SearchOptions) -> Query {
    let query = Query::new().with("name", name.unwrap_or(MATCH_ALL));
    match &options.repos {
        Some(repos) => query.with("repos", repos.join(",")),
        None => query,
    }
}

pub fn properties_query() -> Query { Query::new().flag("properties") }

/// Parses the service's ISO-8601 timestamps.
///
/// Accepts RFC 3339 (`2014-01-08T15:38:25.000+01:00`, `...Z`) and the
/// colon-less offset form (`...+0100`). The reported offset is kept.
pub fn parse_timestamp(s: &str) -> std::result::Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z"))
}

/// Expands a leading `~`, makes the path absolute against the current
/// directory and folds `.`/`..` lexically. The filesystem is not consulted.
pub fn expand_path(path: &Path) -> io::Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => home::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "home directory not found"))?
            .join(rest),
        Err(_) => path.to_path_buf(),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };

    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Last path segment of a remote path or URL, ignoring query and fragment.
pub fn remote_basename(from: &str) -> Option<&str> {
    let path = from.split(['?', '#']).next().unwrap_or(from);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}

/// Final file path for a download: `to` itself, or `to/<basename of from>`
/// when `to` is a directory.
pub fn destination_path(to: &Path, from: &str, to_is_dir: bool) -> Option<PathBuf> {
    if to_is_dir {
        remote_basename(from).map(|name| to.join(name))
    } else {
        Some(to.to_path_buf())
    }
}

fn timestamp(field: &str, raw: &str) -> Result<DateTime<FixedOffset>> {
    parse_timestamp(raw).map_err(|e| Error::malformed(format!("artifact description field `{field}`"), e))
}

fn size(raw: Size) -> Result<u64> {
    match raw {
        Size::Number(n) => Ok(n),
        Size::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| Error::malformed("artifact description field `size`", e)),
    }
}

impl Artifact {
    /// Builds a record from a storage API file description.
    ///
    /// Every key is required; a missing or mistyped key is a
    /// [`Error::MalformedResponse`], never a default.
    pub fn from_hash(hash: &Value) -> Result<Self> {
        let description = ArtifactDescription::deserialize(hash)
            .map_err(|e| Error::malformed("artifact description", e))?;
        Self::from_description(description)
    }

    pub(crate) fn from_description(description: ArtifactDescription) -> Result<Self> {
        Ok(Self {
            api_path:      Some(description.uri),
            md5:           Some(description.checksums.md5),
            sha1:          Some(description.checksums.sha1),
            created:       Some(timestamp("created", &description.created)?),
            download_path: Some(description.download_uri),
            last_modified: Some(timestamp("lastModified", &description.last_modified)?),
            last_updated:  Some(timestamp("lastUpdated", &description.last_updated)?),
            size:          Some(size(description.size)?),
            local_path:    None,
            properties:    OnceCell::new(),
        })
    }
}
