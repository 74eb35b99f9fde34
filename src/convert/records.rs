//! Per-record conversion from raw analyzer records to graph records.

use crate::raw::{RawDoc, RawRef, RawSymbol};
use crate::resolve::{IdentityResolver, ResolveResult};
use crate::types::{Doc, Ref, Symbol, SymbolKind};

use super::classify::{ClassificationTable, MODULE_KIND, PACKAGE_SPECIFIC_KIND};

/// A converted symbol and the reference for its own identifier, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedSymbol {
    pub symbol: Symbol,
    pub self_ref: Option<Ref>,
}

pub struct RecordConverter<'a> {
    identity: &'a IdentityResolver<'a>,
    kinds: &'a ClassificationTable,
    package_init_file: &'a str,
}

impl<'a> RecordConverter<'a> {
    pub fn new(
        identity: &'a IdentityResolver<'a>,
        kinds: &'a ClassificationTable,
        package_init_file: &'a str,
    ) -> Self {
        Self {
            identity,
            kinds,
            package_init_file,
        }
    }

    pub fn convert_symbol(&self, raw: &RawSymbol) -> ResolveResult<ConvertedSymbol> {
        let key = self.identity.resolve_symbol(&raw.path)?;
        let file = if raw.file.is_empty() {
            String::new()
        } else {
            self.identity.relative_file(&raw.file)?
        };

        let class = self.kinds.classify(&raw.kind);
        let (kind, specific_kind) = if raw.kind == MODULE_KIND && self.is_package_init(&raw.file) {
            (SymbolKind::Package, PACKAGE_SPECIFIC_KIND.to_string())
        } else {
            (class.kind, class.specific_kind)
        };

        let specific_path = if raw.exported {
            display_path(&key.path)
        } else {
            raw.name.clone()
        };

        let self_ref = (!file.is_empty() && raw.ident_start != raw.ident_end)
            .then(|| Ref::definition(&key, file.clone(), raw.ident_start, raw.ident_end));

        let symbol = Symbol {
            key,
            name: raw.name.clone(),
            file,
            def_start: raw.def_start,
            def_end: raw.def_end,
            exported: raw.exported,
            callable: class.callable,
            kind,
            specific_kind,
            specific_path,
            type_expr: raw.func_data.as_ref().map(|data| data.signature.clone()),
        };

        Ok(ConvertedSymbol { symbol, self_ref })
    }

    pub fn convert_ref(&self, raw: &RawRef) -> ResolveResult<Ref> {
        let key = self.identity.resolve_symbol(&raw.sym)?;
        let location = self.identity.resolve_file(&raw.file)?;

        Ok(Ref::usage(
            &key,
            location.repo,
            self.identity.unit(),
            location.path,
            raw.start,
            raw.end,
        ))
    }

    pub fn convert_doc(&self, raw: &RawDoc) -> ResolveResult<Doc> {
        let key = self.identity.resolve_symbol(&raw.sym)?;
        let file = self.identity.relative_file(&raw.file)?;

        Ok(Doc {
            key,
            format: String::new(),
            data: raw.body.clone(),
            file,
            start: raw.start,
            end: raw.end,
        })
    }

    fn is_package_init(&self, file: &str) -> bool {
        file.rsplit('/').next() == Some(self.package_init_file)
    }
}

/// Short display path: the last one or two `/` components joined by `.`.
pub fn display_path(path: &str) -> String {
    let components: Vec<&str> = path.split('/').collect();
    match components.as_slice() {
        [.., parent, last] => format!("{parent}.{last}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RootsConfig;
    use crate::raw::{FuncData, Requirement};
    use crate::resolve::{
        BuiltinPrefixes, ContainmentPolicy, Identities, RegionResolver, RequirementMatcher,
    };
    use crate::types::{RepoUri, SourceUnit};

    struct Fixture {
        regions: RegionResolver,
        builtins: BuiltinPrefixes,
        identities: Identities,
        kinds: ClassificationTable,
        requirements: Vec<Requirement>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                regions: RegionResolver::from_config(&RootsConfig::default()),
                builtins: BuiltinPrefixes::default(),
                identities: Identities {
                    repository: RepoUri::new("github.com/acme/app"),
                    stdlib_repository: RepoUri::new("hg.python.org/cpython"),
                    unit: SourceUnit::new("FauxPackage", "FauxPackage"),
                },
                kinds: ClassificationTable::default(),
                requirements: vec![Requirement::new(
                    "github.com/psf/requests",
                    ["requests"],
                    Vec::<String>::new(),
                )],
            }
        }

        fn with<T>(&self, f: impl FnOnce(&RecordConverter<'_>) -> T) -> T {
            let matcher =
                RequirementMatcher::new(&self.requirements, ContainmentPolicy::Strict, "py");
            let identity =
                IdentityResolver::new(&self.regions, matcher, &self.builtins, &self.identities);
            let converter = RecordConverter::new(&identity, &self.kinds, "__init__.py");
            f(&converter)
        }
    }

    fn foo() -> RawSymbol {
        RawSymbol {
            path: "/src/pkg/mod/Foo".to_string(),
            name: "Foo".to_string(),
            file: "/src/pkg/mod.py".to_string(),
            ident_start: 10,
            ident_end: 13,
            def_start: 0,
            def_end: 50,
            exported: true,
            kind: "FUNCTION".to_string(),
            func_data: None,
        }
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path("pkg/mod/Foo"), "mod.Foo");
        assert_eq!(display_path("mod/Foo"), "mod.Foo");
        assert_eq!(display_path("Foo"), "Foo");
        assert_eq!(display_path(""), "");
    }

    #[test]
    fn test_convert_exported_function() {
        let converted = Fixture::new().with(|c| c.convert_symbol(&foo())).unwrap();
        let symbol = &converted.symbol;

        assert_eq!(symbol.key.repo.as_str(), "github.com/acme/app");
        assert_eq!(symbol.key.path, "pkg/mod/Foo");
        assert_eq!(symbol.file, "pkg/mod.py");
        assert_eq!((symbol.def_start, symbol.def_end), (0, 50));
        assert!(symbol.callable);
        assert_eq!(symbol.kind, SymbolKind::Func);
        assert_eq!(symbol.specific_kind, "function");
        assert_eq!(symbol.specific_path, "mod.Foo");
        assert_eq!(symbol.type_expr, None);
    }

    #[test]
    fn test_self_reference_for_distinct_identifier_span() {
        let converted = Fixture::new().with(|c| c.convert_symbol(&foo())).unwrap();
        let self_ref = converted.self_ref.expect("self reference");

        assert!(self_ref.def);
        assert_eq!(self_ref.symbol_key(), converted.symbol.key);
        assert_eq!(self_ref.repo, converted.symbol.key.repo);
        assert_eq!(self_ref.file, "pkg/mod.py");
        assert_eq!((self_ref.start, self_ref.end), (10, 13));
    }

    #[test]
    fn test_no_self_reference_for_empty_identifier_span() {
        let raw = RawSymbol {
            ident_start: 0,
            ident_end: 0,
            ..foo()
        };
        let converted = Fixture::new().with(|c| c.convert_symbol(&raw)).unwrap();
        assert!(converted.self_ref.is_none());
    }

    #[test]
    fn test_fileless_symbol_has_no_self_reference() {
        let raw = RawSymbol {
            path: "sys/argv".to_string(),
            name: "argv".to_string(),
            file: String::new(),
            kind: "VARIABLE".to_string(),
            ..foo()
        };
        let converted = Fixture::new().with(|c| c.convert_symbol(&raw)).unwrap();
        assert_eq!(converted.symbol.key.repo.as_str(), "hg.python.org/cpython");
        assert!(converted.symbol.file.is_empty());
        assert!(converted.self_ref.is_none());
    }

    #[test]
    fn test_unexported_symbol_displays_name() {
        let raw = RawSymbol {
            path: "/src/pkg/mod/Foo/x".to_string(),
            name: "x".to_string(),
            exported: false,
            kind: "VARIABLE".to_string(),
            ..foo()
        };
        let converted = Fixture::new().with(|c| c.convert_symbol(&raw)).unwrap();
        assert_eq!(converted.symbol.specific_path, "x");
        assert!(!converted.symbol.callable);
    }

    #[test]
    fn test_signature_becomes_type_expr() {
        let raw = RawSymbol {
            func_data: Some(FuncData {
                signature: "(self, other)".to_string(),
            }),
            ..foo()
        };
        let converted = Fixture::new().with(|c| c.convert_symbol(&raw)).unwrap();
        assert_eq!(converted.symbol.type_expr.as_deref(), Some("(self, other)"));
    }

    #[test]
    fn test_package_init_module_becomes_package() {
        let raw = RawSymbol {
            path: "/src/pkg".to_string(),
            name: "pkg".to_string(),
            file: "/src/pkg/__init__.py".to_string(),
            kind: "MODULE".to_string(),
            ..foo()
        };
        let converted = Fixture::new().with(|c| c.convert_symbol(&raw)).unwrap();
        assert_eq!(converted.symbol.kind, SymbolKind::Package);
        assert_eq!(converted.symbol.specific_kind, "package");
        assert_eq!(converted.symbol.specific_path, "pkg");
    }

    #[test]
    fn test_plain_module_stays_module() {
        let raw = RawSymbol {
            path: "/src/pkg/mod".to_string(),
            kind: "MODULE".to_string(),
            ..foo()
        };
        let converted = Fixture::new().with(|c| c.convert_symbol(&raw)).unwrap();
        assert_eq!(converted.symbol.kind, SymbolKind::Module);
        assert_eq!(converted.symbol.specific_kind, "module");
    }

    #[test]
    fn test_non_module_in_init_file_keeps_kind() {
        let raw = RawSymbol {
            file: "/src/pkg/__init__.py".to_string(),
            ..foo()
        };
        let converted = Fixture::new().with(|c| c.convert_symbol(&raw)).unwrap();
        assert_eq!(converted.symbol.kind, SymbolKind::Func);
    }

    #[test]
    fn test_symbol_with_unresolvable_file_fails() {
        let raw = RawSymbol {
            file: "/elsewhere/mod.py".to_string(),
            ..foo()
        };
        assert!(Fixture::new().with(|c| c.convert_symbol(&raw)).is_err());
    }

    #[test]
    fn test_convert_ref_uses_synthetic_unit_and_file_owner() {
        let raw = RawRef {
            sym: "/src/pkg/mod/Foo".to_string(),
            file: "/venv/lib/python2.7/site-packages/requests/hooks.py".to_string(),
            start: 40,
            end: 43,
            builtin: false,
        };
        let r = Fixture::new().with(|c| c.convert_ref(&raw)).unwrap();

        assert!(!r.def);
        assert_eq!(r.symbol_repo.as_str(), "github.com/acme/app");
        assert_eq!(r.symbol_path, "pkg/mod/Foo");
        assert_eq!(r.repo.as_str(), "github.com/psf/requests");
        assert_eq!(r.unit_type, "FauxPackage");
        assert_eq!(r.unit, "FauxPackage");
        assert_eq!(r.file, "requests/hooks.py");
        assert_eq!((r.start, r.end), (40, 43));
    }

    #[test]
    fn test_convert_ref_outside_roots_fails() {
        let raw = RawRef {
            sym: "/src/pkg/mod/Foo".to_string(),
            file: "/opt/other/x.py".to_string(),
            ..RawRef::default()
        };
        assert!(Fixture::new().with(|c| c.convert_ref(&raw)).is_err());
    }

    #[test]
    fn test_convert_doc_copies_body_verbatim() {
        let raw = RawDoc {
            sym: "/src/pkg/mod/Foo".to_string(),
            file: "/src/pkg/mod.py".to_string(),
            body: "  Frobnicate the foo.\n\n  Returns: bar\u{0}".to_string(),
            start: 14,
            end: 40,
        };
        let doc = Fixture::new().with(|c| c.convert_doc(&raw)).unwrap();

        assert_eq!(doc.key.path, "pkg/mod/Foo");
        assert_eq!(doc.data, raw.body);
        assert!(doc.format.is_empty());
        assert_eq!(doc.file, "pkg/mod.py");
        assert_eq!((doc.start, doc.end), (14, 40));
    }
}
