//! Resolve command - show how one path maps to a graph identity.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Settings;
use crate::convert::{GraphConverter, parse_requirements};
use crate::error::GraphError;
use crate::raw::Requirement;

use super::convert::repository;

/// What a path resolved to, one `key: value` pair per line when printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub fields: Vec<(&'static str, String)>,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in &self.fields {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Run the resolve command and print the result.
pub fn run(
    settings: &Settings,
    path: &str,
    symbol: bool,
    reqs: Option<&Path>,
    repo: Option<&str>,
) -> Result<()> {
    let requirements = match reqs {
        Some(file) => {
            let bytes =
                std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
            parse_requirements(&bytes)?
        }
        None => Vec::new(),
    };

    let resolution = resolve(settings, path, symbol, &requirements, repo)?;
    print!("{resolution}");
    Ok(())
}

pub fn resolve(
    settings: &Settings,
    path: &str,
    symbol: bool,
    requirements: &[Requirement],
    repo: Option<&str>,
) -> Result<Resolution, GraphError> {
    let converter = GraphConverter::from_settings(settings, repository(settings, repo)?);
    let identity = converter.identity_resolver(requirements);

    let region = match identity.locate(path) {
        Ok(located) => located.region.to_string(),
        Err(_) => "none".to_string(),
    };

    let fields = if symbol {
        let key = identity.resolve_symbol(path)?;
        vec![
            ("region", region),
            ("repository", key.repo.to_string()),
            ("unit_type", key.unit_type),
            ("unit", key.unit),
            ("path", key.path),
        ]
    } else {
        let location = identity.resolve_file(path)?;
        vec![
            ("region", region),
            ("repository", location.repo.to_string()),
            ("path", location.path),
        ]
    };

    Ok(Resolution { fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;

    fn settings() -> Settings {
        Settings {
            repository: "github.com/acme/app".to_string(),
            ..Settings::default()
        }
    }

    fn field<'a>(resolution: &'a Resolution, name: &str) -> &'a str {
        resolution
            .fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
            .unwrap()
    }

    #[test]
    fn test_resolve_dependency_file() {
        let reqs = vec![Requirement::new(
            "https://github.com/psf/requests",
            ["requests"],
            Vec::<String>::new(),
        )];
        let resolution = resolve(
            &settings(),
            "/venv/lib/python2.7/site-packages/requests/api.py",
            false,
            &reqs,
            None,
        )
        .unwrap();

        assert_eq!(field(&resolution, "region"), "dependencies");
        assert_eq!(field(&resolution, "repository"), "github.com/psf/requests");
        assert_eq!(field(&resolution, "path"), "requests/api.py");
    }

    #[test]
    fn test_resolve_builtin_symbol() {
        let resolution = resolve(&settings(), "path/join", true, &[], None).unwrap();

        assert_eq!(field(&resolution, "region"), "none");
        assert_eq!(field(&resolution, "repository"), "hg.python.org/cpython");
        assert_eq!(field(&resolution, "path"), "os/path/join");
        assert_eq!(
            resolution.to_string().lines().next(),
            Some("region: none")
        );
    }

    #[test]
    fn test_unresolvable_path_maps_to_resolution_exit_code() {
        let err = resolve(&settings(), "/tmp/x.py", false, &[], None).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ResolutionFailed);
    }
}
