//! Builtin namespaces that have no backing file in any root.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maps a builtin namespace prefix to its canonical standard-library path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuiltinPrefixes(IndexMap<String, String>);

impl Default for BuiltinPrefixes {
    fn default() -> Self {
        Self::new([("sys", "sys"), ("os", "os"), ("path", "os/path")])
    }
}

impl BuiltinPrefixes {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(prefix, canonical)| (prefix.into(), canonical.into()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rewrite a namespace path that begins with a builtin prefix.
    ///
    /// Matching is a plain string prefix (`system/x` begins with `sys`). When
    /// several prefixes match, the first in table order wins.
    pub fn rewrite(&self, path: &str) -> Option<String> {
        self.0
            .iter()
            .filter(|(prefix, _)| !prefix.is_empty())
            .find_map(|(prefix, canonical)| {
                path.strip_prefix(prefix.as_str())
                    .map(|rest| format!("{canonical}{rest}"))
            })
    }
}
