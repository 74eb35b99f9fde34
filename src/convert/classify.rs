//! Analyzer kind classification.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::SymbolKind;

/// Analyzer kind for modules; packages are modules defined by an init file.
pub const MODULE_KIND: &str = "MODULE";

/// Specific kind given to modules defined by a package init file.
pub const PACKAGE_SPECIFIC_KIND: &str = "package";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub callable: bool,
    #[serde(default)]
    pub kind: SymbolKind,
    #[serde(default)]
    pub specific_kind: String,
}

impl Classification {
    pub fn new(callable: bool, kind: SymbolKind, specific_kind: impl Into<String>) -> Self {
        Self {
            callable,
            kind,
            specific_kind: specific_kind.into(),
        }
    }
}

/// Analyzer kind string -> classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationTable(IndexMap<String, Classification>);

impl Default for ClassificationTable {
    fn default() -> Self {
        use SymbolKind::*;

        Self::new([
            ("ATTRIBUTE", Classification::new(false, Field, "attribute")),
            ("CLASS", Classification::new(false, Type, "class")),
            ("CLASS_METHOD", Classification::new(true, Func, "class_method")),
            ("CONSTRUCTOR", Classification::new(true, Func, "constructor")),
            ("FUNCTION", Classification::new(true, Func, "function")),
            ("METHOD", Classification::new(true, Func, "method")),
            (MODULE_KIND, Classification::new(false, Module, "module")),
            ("PARAMETER", Classification::new(false, Var, "parameter")),
            ("SCOPE", Classification::new(false, Var, "scope")),
            ("VARIABLE", Classification::new(false, Var, "variable")),
        ])
    }
}

impl ClassificationTable {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Classification)>,
        K: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(kind, class)| (kind.into(), class))
                .collect(),
        )
    }

    /// Look up a raw kind; unknown kinds get the zero classification.
    pub fn classify(&self, raw_kind: &str) -> Classification {
        self.0.get(raw_kind).cloned().unwrap_or_default()
    }

    pub fn contains(&self, raw_kind: &str) -> bool {
        self.0.contains_key(raw_kind)
    }
}
