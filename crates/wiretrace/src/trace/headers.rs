//! Ordered header map with a canonical single-line rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered list of header name/value pairs.
///
/// Names are matched ASCII case-insensitively. Duplicate names are allowed
/// (servers repeat `Set-Cookie`, `Vary`, ...) and keep their relative order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set `name` to `value`, replacing the first existing entry with the same
    /// name and dropping any further duplicates.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.position(&name) {
            Some(idx) => {
                self.0[idx].1 = value;
                let mut seen = 0;
                self.0.retain(|(n, _)| {
                    if n.eq_ignore_ascii_case(&name) {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.0.push((name, value)),
        }
    }

    /// Add a pair without touching existing entries
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value stored under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.0[idx].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Delete every entry named `name`. Returns how many were removed;
    /// removing an absent header is not an error.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        before - self.0.len()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Canonical rendering used for both writing and comparing traces.
    ///
    /// A compact JSON array of `[name, value]` pairs, stably sorted by the
    /// lowercased name. JSON escaping keeps the result on one line.
    pub fn canonical(&self) -> String {
        let pairs = self
            .sorted()
            .into_iter()
            .map(|(n, v)| Value::Array(vec![Value::String(n.clone()), Value::String(v.clone())]))
            .collect();

        Value::Array(pairs).to_string()
    }

    /// Decode a rendering produced by [`Headers::canonical`]
    pub fn from_canonical(repr: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(repr)
    }

    fn sorted(&self) -> Vec<&(String, String)> {
        let mut pairs: Vec<&(String, String)> = self.0.iter().collect();
        pairs.sort_by_key(|(n, _)| n.to_ascii_lowercase());
        pairs
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// Two header maps are equal when their canonical renderings are; the order
/// a server happened to send distinct headers in is not significant.
impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for Headers {}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect())
    }
}
