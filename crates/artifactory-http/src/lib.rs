//! HTTP collaborator for talking to an Artifactory instance.
//!
//! The resource layer only ever needs one capability: "GET this path (or
//! absolute URL) with these query parameters and hand me the body". This
//! crate models exactly that:
//!
//! - [`HttpClient`] - the trait resources are generic over
//! - [`Query`] - ordered query parameters, including key-only flags
//! - [`Response`] - raw body plus a JSON accessor
//! - [`ReqwestClient`] / [`ClientSetting`] - the production implementation
//!
//! Authentication, retries and pagination are deliberately absent.

mod client;
mod error;
mod query;
mod response;

#[cfg(feature = "reqwest")]
mod reqwest_client;

pub use client::{HttpClient, resolve};
pub use error::{Error, Result};
pub use query::Query;
pub use response::Response;

#[cfg(feature = "reqwest")]
pub use reqwest_client::{ClientSetting, ClientSettingError, ReqwestClient};
