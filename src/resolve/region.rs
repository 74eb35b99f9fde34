//! Region lookup: which configured root a sandbox path lives under.
//!
//! Roots are an ordered list and the first root that contains a path wins, so
//! priority is data rather than call order. With nested roots a path is always
//! attributed to the earliest root in the list.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{ResolveError, ResolveResult};
use super::paths::ContainmentPolicy;
use crate::config::RootsConfig;

/// The three filesystem regions of an analysis sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// The repository under analysis
    Analysis,
    /// Installed third-party packages (site-packages)
    Dependencies,
    /// The interpreter's standard library
    StandardLibrary,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Dependencies => "dependencies",
            Self::StandardLibrary => "standard_library",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub region: Region,
    pub path: String,
}

impl Root {
    pub fn new(region: Region, path: impl Into<String>) -> Self {
        Self {
            region,
            path: path.into(),
        }
    }
}

/// A path attributed to a region, relative to that region's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub region: Region,
    pub relative: String,
}

#[derive(Debug, Clone)]
pub struct RegionResolver {
    roots: Vec<Root>,
    policy: ContainmentPolicy,
}

impl RegionResolver {
    /// Create a resolver that tries `roots` in order.
    pub fn new(roots: Vec<Root>, policy: ContainmentPolicy) -> Self {
        Self { roots, policy }
    }

    /// Analysis root, then site-packages, then the standard library.
    pub fn from_config(config: &RootsConfig) -> Self {
        Self::new(
            vec![
                Root::new(Region::Analysis, config.source_root.clone()),
                Root::new(Region::Dependencies, config.site_packages_dir()),
                Root::new(Region::StandardLibrary, config.stdlib_dir()),
            ],
            config.containment,
        )
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    /// Find the first root containing `path`.
    pub fn locate(&self, path: &str) -> ResolveResult<Located> {
        self.roots
            .iter()
            .find_map(|root| {
                self.policy
                    .relativize(&root.path, path)
                    .map(|relative| Located {
                        region: root.region,
                        relative,
                    })
            })
            .ok_or_else(|| ResolveError::OutsideRoots {
                path: path.to_string(),
            })
    }
}
