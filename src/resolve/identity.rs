//! Turn sandbox paths and namespace paths into graph identities.

use tracing::trace;

use super::builtins::BuiltinPrefixes;
use super::error::{ResolveError, ResolveResult};
use super::region::{Located, Region, RegionResolver};
use super::requirements::{PathForm, RequirementMatcher};
use crate::types::{RepoUri, SourceUnit, SymbolKey};

/// The fixed identities records are attributed to during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identities {
    /// The repository under analysis
    pub repository: RepoUri,
    pub stdlib_repository: RepoUri,
    /// Synthetic unit used for every key and every reference use site
    pub unit: SourceUnit,
}

/// A file attributed to its owning repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub repo: RepoUri,
    pub path: String,
}

pub struct IdentityResolver<'a> {
    regions: &'a RegionResolver,
    matcher: RequirementMatcher<'a>,
    builtins: &'a BuiltinPrefixes,
    identities: &'a Identities,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(
        regions: &'a RegionResolver,
        matcher: RequirementMatcher<'a>,
        builtins: &'a BuiltinPrefixes,
        identities: &'a Identities,
    ) -> Self {
        Self {
            regions,
            matcher,
            builtins,
            identities,
        }
    }

    pub fn unit(&self) -> &'a SourceUnit {
        &self.identities.unit
    }

    pub fn locate(&self, path: &str) -> ResolveResult<Located> {
        self.regions.locate(path)
    }

    /// Path of a file relative to whichever root contains it.
    ///
    /// Does not consult requirements; used for the defining file of symbols
    /// and docs, whose owner is carried by the symbol key.
    pub fn relative_file(&self, path: &str) -> ResolveResult<String> {
        self.regions.locate(path).map(|located| located.relative)
    }

    /// Owning repository and relative path of a file.
    pub fn resolve_file(&self, path: &str) -> ResolveResult<FileLocation> {
        let located = self.regions.locate(path)?;
        let repo = self.owner(&located, PathForm::File, path)?;
        trace!(path, repo = %repo, region = %located.region, "resolved file");
        Ok(FileLocation {
            repo,
            path: located.relative,
        })
    }

    /// Full symbol key for a namespace path.
    ///
    /// Paths outside every root fall back to the builtin prefix table and are
    /// attributed to the standard library.
    pub fn resolve_symbol(&self, path: &str) -> ResolveResult<SymbolKey> {
        match self.regions.locate(path) {
            Ok(located) => {
                let repo = self.owner(&located, PathForm::Namespace, path)?;
                Ok(SymbolKey::new(repo, &self.identities.unit, located.relative))
            }
            Err(_) => {
                let rewritten = self.builtins.rewrite(path).ok_or_else(|| {
                    ResolveError::UnresolvedSymbolPath {
                        path: path.to_string(),
                    }
                })?;
                trace!(path, rewritten, "resolved builtin namespace");
                Ok(SymbolKey::new(
                    self.identities.stdlib_repository.clone(),
                    &self.identities.unit,
                    rewritten,
                ))
            }
        }
    }

    fn owner(&self, located: &Located, form: PathForm, path: &str) -> ResolveResult<RepoUri> {
        match located.region {
            Region::Analysis => Ok(self.identities.repository.clone()),
            Region::StandardLibrary => Ok(self.identities.stdlib_repository.clone()),
            Region::Dependencies => {
                let requirement = self.matcher.find(&located.relative, form).ok_or_else(|| {
                    ResolveError::NoMatchingRequirement {
                        path: path.to_string(),
                    }
                })?;
                let repo = RepoUri::from_clone_url(&requirement.repo_url);
                if repo.is_empty() {
                    return Err(ResolveError::MissingRepository {
                        path: path.to_string(),
                        requirement: requirement.display_name().to_string(),
                    });
                }
                Ok(repo)
            }
        }
    }
}
