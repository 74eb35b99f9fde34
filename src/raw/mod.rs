//! Raw analyzer payload.
//!
//! The analyzer emits camelCase keys (`identStart`, `funcData`) while older
//! dumps use PascalCase; both spellings are accepted. `null` in place of a
//! string or array reads as empty, and a `null` offset reads as 0. Offsets are
//! signed: the analyzer marks a missing position with `-1`.

use serde::{Deserialize, Deserializer};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One analyzer run: the extracted graph plus the declared dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawGraphData {
    #[serde(alias = "Graph", deserialize_with = "null_as_default")]
    pub graph: RawGraph,
    #[serde(alias = "Reqs", deserialize_with = "null_as_default")]
    pub reqs: Vec<Requirement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawGraph {
    #[serde(alias = "Syms", deserialize_with = "null_as_default")]
    pub syms: Vec<RawSymbol>,
    #[serde(alias = "Refs", deserialize_with = "null_as_default")]
    pub refs: Vec<RawRef>,
    #[serde(alias = "Docs", deserialize_with = "null_as_default")]
    pub docs: Vec<RawDoc>,
}

/// A definition as reported by the analyzer, anchored to absolute paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSymbol {
    #[serde(alias = "Path", deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(alias = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "File", deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(alias = "IdentStart", deserialize_with = "null_as_default")]
    pub ident_start: i64,
    #[serde(alias = "IdentEnd", deserialize_with = "null_as_default")]
    pub ident_end: i64,
    #[serde(alias = "DefStart", deserialize_with = "null_as_default")]
    pub def_start: i64,
    #[serde(alias = "DefEnd", deserialize_with = "null_as_default")]
    pub def_end: i64,
    #[serde(alias = "Exported")]
    pub exported: bool,
    #[serde(alias = "Kind", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(alias = "FuncData")]
    pub func_data: Option<FuncData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FuncData {
    #[serde(alias = "Signature", deserialize_with = "null_as_default")]
    pub signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawRef {
    /// Namespace path of the referenced symbol
    #[serde(alias = "Sym", deserialize_with = "null_as_default")]
    pub sym: String,
    #[serde(alias = "File", deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(alias = "Start", deserialize_with = "null_as_default")]
    pub start: i64,
    #[serde(alias = "End", deserialize_with = "null_as_default")]
    pub end: i64,
    #[serde(alias = "Builtin")]
    pub builtin: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawDoc {
    #[serde(alias = "Sym", deserialize_with = "null_as_default")]
    pub sym: String,
    #[serde(alias = "File", deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(alias = "Body", deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(alias = "Start", deserialize_with = "null_as_default")]
    pub start: i64,
    #[serde(alias = "End", deserialize_with = "null_as_default")]
    pub end: i64,
}

/// A declared third-party dependency and the import names it provides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Requirement {
    #[serde(alias = "ProjectName")]
    pub project_name: Option<String>,
    #[serde(alias = "RepoURL", deserialize_with = "null_as_default")]
    pub repo_url: String,
    /// Dotted package names (`google.protobuf`)
    #[serde(alias = "Packages", deserialize_with = "null_as_default")]
    pub packages: Vec<String>,
    /// Top-level single-file modules (`six`)
    #[serde(alias = "Modules", deserialize_with = "null_as_default")]
    pub modules: Vec<String>,
}

impl Requirement {
    pub fn new<P, M>(repo_url: impl Into<String>, packages: P, modules: M) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            project_name: None,
            repo_url: repo_url.into(),
            packages: packages.into_iter().map(Into::into).collect(),
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    /// Name used in diagnostics: the project name if known, else the repo URL.
    pub fn display_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(&self.repo_url)
    }
}
