//! Attribute a site-packages path to the declared requirement that installed it.

use super::paths::ContainmentPolicy;
use crate::raw::Requirement;

/// What kind of path is being matched.
///
/// File paths carry the source extension (`six.py`) while namespace paths do
/// not (`six/moves`), so single-file modules are matched differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathForm {
    File,
    Namespace,
}

/// Finds the first requirement whose packages or modules cover a path.
///
/// No ambiguity detection: requirements are tried in declaration order and the
/// first one with any covering package or module wins.
#[derive(Debug, Clone, Copy)]
pub struct RequirementMatcher<'a> {
    requirements: &'a [Requirement],
    policy: ContainmentPolicy,
    /// Without the dot (`py`)
    source_extension: &'a str,
}

impl<'a> RequirementMatcher<'a> {
    pub fn new(
        requirements: &'a [Requirement],
        policy: ContainmentPolicy,
        source_extension: &'a str,
    ) -> Self {
        Self {
            requirements,
            policy,
            source_extension,
        }
    }

    /// Match a path relative to the dependency-install root.
    pub fn find(&self, relative: &str, form: PathForm) -> Option<&'a Requirement> {
        self.requirements
            .iter()
            .find(|requirement| self.covers(requirement, relative, form))
    }

    fn covers(&self, requirement: &Requirement, relative: &str, form: PathForm) -> bool {
        let by_package = requirement.packages.iter().any(|package| {
            self.policy
                .relativize(&package.replace('.', "/"), relative)
                .is_some()
        });
        if by_package {
            return true;
        }

        requirement.modules.iter().any(|module| {
            let base = match form {
                PathForm::File => format!("{module}.{}", self.source_extension),
                PathForm::Namespace => module.clone(),
            };
            self.policy.relativize(&base, relative).is_some()
        })
    }
}
