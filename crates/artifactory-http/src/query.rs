use url::{Url, form_urlencoded};

/// Ordered query parameters for a GET request.
///
/// A parameter without a value is rendered as a bare key, which is how the
/// REST API spells flags such as `?properties`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, Option<String>)>,
}

impl Query {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), Some(value.into())));
        self
    }

    pub fn flag(mut self, key: impl Into<String>) -> Self {
        self.params.push((key.into(), None));
        self
    }

    pub fn is_empty(&self) -> bool { self.params.is_empty() }

    /// Looks up a parameter. `Some(None)` means the key is present as a flag.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, key: &str) -> bool { self.get(key).is_some() }

    /// Form-urlencoded rendering, without the leading `?`.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            match value {
                Some(value) => serializer.append_pair(key, value),
                None => serializer.append_key_only(key),
            };
        }
        serializer.finish()
    }

    /// Appends the parameters to `url`, keeping any query it already carries.
    pub fn apply(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }

        let encoded = self.encode();
        let merged = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
            _ => encoded,
        };
        url.set_query(Some(&merged));
    }
}
