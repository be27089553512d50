//! Client-side model of a single artifact stored in Artifactory.
//!
//! # Architecture
//!
//! Same three layers as the rest of the workspace:
//! - [`data`] - the [`Artifact`] record and operation options
//! - [`core`] - pure transformations (query building, timestamp parsing,
//!   destination resolution, description mapping)
//! - [`effects`] - the operations that talk to the network and the disk
//!
//! Every operation takes the [`HttpClient`] explicitly; there is no
//! process-wide client.
//!
//! ```no_run
//! use artifactory::{Artifact, DownloadOptions, SearchOptions};
//! use artifactory::http::ReqwestClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ReqwestClient::new("https://repo.example.com/artifactory".parse()?)?;
//! let found = Artifact::search(&client, Some("acme"), &SearchOptions::new().repos(["libs-release-local"])).await?;
//! for artifact in &found {
//!     artifact.download(&client, DownloadOptions::new().to("~/Downloads")).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use artifactory_http as http;
pub use artifactory_http::HttpClient;

pub use data::{Artifact, DownloadOptions, Properties, SearchOptions};
pub use error::{Error, Result};
