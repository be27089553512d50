//! Effects layer: operations that hit the network or the filesystem.
//!
//! Requests are issued one at a time, in order. Nothing is retried and every
//! failure surfaces to the caller.

use std::path::PathBuf;

use artifactory_http::{HttpClient, Query, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};

use crate::data::{
    Artifact, DownloadOptions, Properties, PropertiesResponse, SearchOptions, SearchResults,
};
use crate::error::{Error, Result};

async fn get<C: HttpClient>(client: &C, path: &str, query: &Query) -> Result<Response> {
    client.get(path, query).await.map_err(Error::transport)
}

fn decode<T: DeserializeOwned>(response: &Response, what: &str) -> Result<T> {
    response
        .json()
        .map_err(|e| Error::malformed(format!("{what} from {}", response.url()), e))
}

impl Artifact {
    /// Searches artifacts by name, optionally restricted to some repositories.
    ///
    /// `None` searches for everything. Each hit is resolved with a follow-up
    /// GET on its `uri`; results keep the order the service returned.
    pub async fn search<C: HttpClient>(
        client: &C,
        name: Option<&str>,
        options: &SearchOptions,
    ) -> Result<Vec<Artifact>> {
        let query = crate::core::search_query(name, options);
        let response = get(client, crate::core::SEARCH_PATH, &query).await?;
        let found: SearchResults = decode(&response, "search results")?;
        debug!(
            count = found.results.len(),
            name = name.unwrap_or(crate::core::MATCH_ALL),
            "artifact search"
        );

        let mut artifacts = Vec::with_capacity(found.results.len());
        for result in found.results {
            artifacts.push(Self::from_url(client, &result.uri).await?);
        }
        Ok(artifacts)
    }

    /// Fetches the description at `url` and builds a record from it.
    pub async fn from_url<C: HttpClient>(client: &C, url: &str) -> Result<Artifact> {
        let response = get(client, url, &Query::new()).await?;
        let hash: Value = decode(&response, "artifact description")?;
        Self::from_hash(&hash)
    }

    /// Extended metadata for this artifact.
    ///
    /// Fetched from `<api_path>?properties` on first use and cached on the
    /// record afterwards. A failed fetch is not cached.
    pub async fn properties<C: HttpClient>(&self, client: &C) -> Result<&Properties> {
        if let Some(cached) = self.properties.get() {
            trace!(api_path = self.api_path.as_deref(), "properties cache hit");
            return Ok(cached);
        }

        let api_path = self.api_path.as_deref().ok_or(Error::MissingApiPath)?;
        self.properties
            .get_or_try_init(|| async {
                let response = get(client, api_path, &crate::core::properties_query()).await?;
                let body: PropertiesResponse = decode(&response, "properties")?;
                debug!(api_path, count = body.properties.len(), "fetched properties");
                Ok::<_, Error>(body.properties)
            })
            .await
    }

    /// Downloads the artifact to local disk and returns the absolute path
    /// written.
    ///
    /// `options.to` falls back to `local_path`, `options.from` to
    /// `download_path`; if either ends up empty this fails before any
    /// request. When the destination is an existing directory the remote
    /// file name is appended. An existing file is overwritten, and missing
    /// parent directories are not created.
    pub async fn download<C: HttpClient>(
        &self,
        client: &C,
        options: DownloadOptions,
    ) -> Result<PathBuf> {
        let to = options
            .to
            .or_else(|| self.local_path.clone())
            .ok_or(Error::MissingDestination)?;
        let from = options
            .from
            .or_else(|| self.download_path.clone())
            .ok_or(Error::MissingSource)?;

        let expanded = crate::core::expand_path(&to).map_err(|e| Error::filesystem(&to, e))?;
        let is_dir = tokio::fs::metadata(&expanded)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        let destination = crate::core::destination_path(&expanded, &from, is_dir).ok_or_else(|| {
            Error::filesystem(
                &expanded,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("remote path {from} has no file name"),
                ),
            )
        })?;

        let body = get(client, &from, &Query::new()).await?.into_body();

        let mut file = tokio::fs::File::create(&destination)
            .await
            .map_err(|e| Error::filesystem(&destination, e))?;
        file.write_all(&body)
            .await
            .map_err(|e| Error::filesystem(&destination, e))?;
        file.flush()
            .await
            .map_err(|e| Error::filesystem(&destination, e))?;

        debug!(from, path = %destination.display(), bytes = body.len(), "downloaded artifact");
        Ok(destination)
    }
}
