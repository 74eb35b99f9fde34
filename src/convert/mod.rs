//! Whole-graph conversion.
//!
//! [`GraphConverter`] owns everything that stays fixed during a run (roots,
//! builtin prefixes, kind table, identities) and converts one raw analyzer
//! payload at a time. Records are converted in order: symbols first, so their
//! self-references can suppress identical references reported by the
//! analyzer, then references, then docs.
//!
//! Failure policy is asymmetric. A symbol or doc that cannot be resolved
//! aborts the conversion. A reference that cannot be resolved is dropped and
//! logged.

pub mod classify;
pub mod records;

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{GraphError, GraphResult};
use crate::raw::{RawGraphData, Requirement};
use crate::resolve::{
    BuiltinPrefixes, ContainmentPolicy, Identities, IdentityResolver, RegionResolver,
    RequirementMatcher,
};
use crate::types::{GraphOutput, Ref, RepoUri, SourceUnit};

pub use classify::{Classification, ClassificationTable};
pub use records::{ConvertedSymbol, RecordConverter, display_path};

/// Bytes of input echoed back when the payload is not valid JSON.
const PREVIEW_LEN: usize = 100;

/// Counters for one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub symbols: usize,
    pub self_refs: usize,
    pub refs: usize,
    /// Analyzer references identical to a self-reference
    pub suppressed_refs: usize,
    /// Analyzer references that could not be resolved
    pub dropped_refs: usize,
    pub docs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: GraphOutput,
    pub stats: ConversionStats,
}

pub struct GraphConverter {
    regions: RegionResolver,
    builtins: BuiltinPrefixes,
    kinds: ClassificationTable,
    identities: Identities,
    requirement_policy: ContainmentPolicy,
    source_extension: String,
    package_init_file: String,
    pretty: bool,
}

impl GraphConverter {
    /// Build a converter for `repository` from loaded settings.
    pub fn from_settings(settings: &Settings, repository: RepoUri) -> Self {
        let graph = &settings.graph;
        Self {
            regions: RegionResolver::from_config(&settings.roots),
            builtins: graph.builtin_prefixes.clone(),
            kinds: graph.kinds.clone(),
            identities: Identities {
                repository,
                stdlib_repository: RepoUri::new(graph.stdlib_repository.clone()),
                unit: SourceUnit::new(graph.unit_type.clone(), graph.unit_name.clone()),
            },
            requirement_policy: settings.requirements.containment,
            source_extension: settings.requirements.source_extension.clone(),
            package_init_file: graph.package_init_file.clone(),
            pretty: graph.pretty,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Identity resolver over one run's requirement list.
    pub fn identity_resolver<'a>(&'a self, requirements: &'a [Requirement]) -> IdentityResolver<'a> {
        let matcher =
            RequirementMatcher::new(requirements, self.requirement_policy, &self.source_extension);
        IdentityResolver::new(&self.regions, matcher, &self.builtins, &self.identities)
    }

    /// Convert a parsed payload into graph records.
    pub fn convert(&self, data: &RawGraphData) -> GraphResult<Conversion> {
        let identity = self.identity_resolver(&data.reqs);
        let records = RecordConverter::new(&identity, &self.kinds, &self.package_init_file);

        let raw = &data.graph;
        let mut output = GraphOutput::default();
        let mut stats = ConversionStats::default();
        let mut seen: HashSet<Ref> = HashSet::new();

        for sym in &raw.syms {
            let converted = records
                .convert_symbol(sym)
                .map_err(|source| GraphError::Symbol {
                    record: format!("{sym:?}"),
                    source,
                })?;
            if let Some(self_ref) = converted.self_ref {
                seen.insert(self_ref.clone());
                output.refs.push(self_ref);
                stats.self_refs += 1;
            }
            output.symbols.push(converted.symbol);
            stats.symbols += 1;
        }

        for raw_ref in &raw.refs {
            match records.convert_ref(raw_ref) {
                Ok(r) if seen.contains(&r) => {
                    debug!(sym = %raw_ref.sym, file = %raw_ref.file, "suppressed duplicate reference");
                    stats.suppressed_refs += 1;
                }
                Ok(r) => {
                    output.refs.push(r);
                    stats.refs += 1;
                }
                Err(e) => {
                    warn!(sym = %raw_ref.sym, file = %raw_ref.file, "dropping reference: {e}");
                    stats.dropped_refs += 1;
                }
            }
        }

        for raw_doc in &raw.docs {
            let doc = records
                .convert_doc(raw_doc)
                .map_err(|source| GraphError::Doc {
                    record: format!("{raw_doc:?}"),
                    source,
                })?;
            output.docs.push(doc);
            stats.docs += 1;
        }

        info!(
            repository = %self.identities.repository,
            symbols = stats.symbols,
            refs = stats.refs + stats.self_refs,
            docs = stats.docs,
            suppressed = stats.suppressed_refs,
            dropped = stats.dropped_refs,
            "converted graph"
        );

        Ok(Conversion { output, stats })
    }

    /// Serialize converted records.
    pub fn render(&self, output: &GraphOutput) -> GraphResult<Vec<u8>> {
        let rendered = if self.pretty {
            serde_json::to_vec_pretty(output)
        } else {
            serde_json::to_vec(output)
        };
        rendered.map_err(GraphError::Serialize)
    }

    /// Raw payload bytes in, graph JSON bytes out.
    pub fn transform(&self, input: &[u8]) -> GraphResult<Vec<u8>> {
        let data = parse_payload(input)?;
        let conversion = self.convert(&data)?;
        self.render(&conversion.output)
    }
}

/// Parse the analyzer payload.
pub fn parse_payload(input: &[u8]) -> GraphResult<RawGraphData> {
    serde_json::from_slice(input).map_err(|source| GraphError::MalformedInput {
        source,
        preview: preview(input),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequirementSource {
    List(Vec<Requirement>),
    Payload(RawGraphData),
}

/// Parse requirements from either a bare JSON list or a full analyzer payload.
pub fn parse_requirements(input: &[u8]) -> GraphResult<Vec<Requirement>> {
    let source: RequirementSource =
        serde_json::from_slice(input).map_err(|source| GraphError::MalformedInput {
            source,
            preview: preview(input),
        })?;
    Ok(match source {
        RequirementSource::List(reqs) => reqs,
        RequirementSource::Payload(data) => data.reqs,
    })
}

/// The first bytes of `input`, with `...` appended when truncated.
fn preview(input: &[u8]) -> String {
    if input.len() <= PREVIEW_LEN {
        return String::from_utf8_lossy(input).into_owned();
    }

    let mut end = PREVIEW_LEN;
    if let Ok(text) = std::str::from_utf8(input) {
        while !text.is_char_boundary(end) {
            end -= 1;
        }
    }
    format!("{}...", String::from_utf8_lossy(&input[..end]))
}
