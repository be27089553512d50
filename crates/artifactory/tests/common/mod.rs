use std::collections::HashMap;
use std::sync::Mutex;

use artifactory::http::{HttpClient, Query, Response};
use bytes::Bytes;
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
#[error("no canned response for {0}")]
pub struct MockError(pub String);

/// Serves canned bodies keyed by path and query, and records every call.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, Bytes>,
    calls:     Mutex<Vec<(String, Query)>>,
}

fn key(path: &str, query: &Query) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", query.encode())
    }
}

impl MockClient {
    pub fn new() -> Self { Self::default() }

    pub fn respond(mut self, path: &str, query: &Query, body: impl Into<Bytes>) -> Self {
        self.responses.insert(key(path, query), body.into());
        self
    }

    pub fn respond_json(self, path: &str, query: &Query, value: Value) -> Self {
        let body = serde_json::to_vec(&value).unwrap();
        self.respond(path, query, body)
    }

    pub fn calls(&self) -> Vec<(String, Query)> { self.calls.lock().unwrap().clone() }

    pub fn call_count(&self) -> usize { self.calls.lock().unwrap().len() }
}

impl HttpClient for MockClient {
    type Error = MockError;

    async fn get(&self, path: &str, query: &Query) -> Result<Response, MockError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), query.clone()));

        let key = key(path, query);
        match self.responses.get(&key) {
            Some(body) => Ok(Response::new(key, 200, body.clone())),
            None => Err(MockError(key)),
        }
    }
}

pub const BASE: &str = "https://repo.example.com/artifactory";

pub fn api_uri(path: &str) -> String { format!("{BASE}/api/storage/{path}") }

pub fn download_uri(path: &str) -> String { format!("{BASE}/{path}") }

pub fn description(path: &str, size: u64) -> Value {
    json!({
        "uri": api_uri(path),
        "downloadUri": download_uri(path),
        "created": "2014-01-08T15:38:25.000+01:00",
        "lastModified": "2014-01-09T10:00:00.000Z",
        "lastUpdated": "2014-01-10T08:30:00.000Z",
        "size": size.to_string(),
        "checksums": {
            "md5": format!("md5-{path}"),
            "sha1": format!("sha1-{path}")
        }
    })
}
