//! Convert Python analyzer output into cross-repository dependency graph
//! records.
//!
//! The analyzer reports symbols, references and docs anchored to absolute
//! paths inside an analysis sandbox. [`convert::GraphConverter`] resolves each
//! path to the repository that owns it and emits records keyed by stable
//! [`types::SymbolKey`]s.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod raw;
pub mod resolve;
pub mod types;

pub use config::Settings;
pub use convert::{Conversion, ConversionStats, GraphConverter, parse_payload};
pub use error::{ExitCode, GraphError, GraphResult};
pub use raw::{RawGraphData, Requirement};
pub use resolve::{ContainmentPolicy, Region, ResolveError};
pub use types::{Doc, GraphOutput, Ref, RepoUri, SourceUnit, Symbol, SymbolKey, SymbolKind};
