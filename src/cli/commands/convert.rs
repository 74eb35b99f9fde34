//! Convert command - raw analyzer payload to graph JSON.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;

use crate::config::Settings;
use crate::convert::{ConversionStats, GraphConverter, parse_payload};
use crate::error::GraphError;
use crate::log_event;
use crate::types::RepoUri;

/// Repository under analysis: the CLI override, else the configured one.
pub fn repository(settings: &Settings, repo: Option<&str>) -> Result<RepoUri, GraphError> {
    let raw = repo.unwrap_or(settings.repository.as_str());
    let uri = RepoUri::from_clone_url(raw);
    if uri.is_empty() {
        return Err(GraphError::Config(
            "no repository under analysis; pass --repo or set `repository` in settings.toml"
                .to_string(),
        ));
    }
    Ok(uri)
}

/// Run the convert command.
pub fn run(
    settings: &Settings,
    input: Option<&Path>,
    output: Option<&Path>,
    repo: Option<&str>,
    pretty: bool,
) -> Result<ConversionStats> {
    let repository = repository(settings, repo)?;
    let converter = GraphConverter::from_settings(settings, repository)
        .with_pretty(pretty || settings.graph.pretty);

    let bytes = read_input(input)?;
    let data = parse_payload(&bytes)?;
    let conversion = converter.convert(&data)?;
    let rendered = converter.render(&conversion.output)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing output to {}", path.display()))?;
            log_event!("convert", "wrote", "{}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&rendered)
                .and_then(|()| stdout.flush())
                .context("writing output to stdout")?;
        }
    }

    Ok(conversion.stats)
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;
    use tempfile::TempDir;

    const PAYLOAD: &str = r#"{
        "graph": {
            "syms": [{
                "path": "/src/pkg/mod/Foo", "name": "Foo", "file": "/src/pkg/mod.py",
                "identStart": 10, "identEnd": 13, "defStart": 0, "defEnd": 50,
                "exported": true, "kind": "FUNCTION"
            }],
            "refs": [{"sym": "/src/pkg/mod/Foo", "file": "/opt/elsewhere.py", "start": 1, "end": 4}]
        },
        "reqs": []
    }"#;

    #[test]
    fn test_repository_override_wins() {
        let settings = Settings {
            repository: "github.com/acme/app".to_string(),
            ..Settings::default()
        };
        let uri = repository(&settings, Some("https://github.com/acme/other.git")).unwrap();
        assert_eq!(uri.as_str(), "github.com/acme/other");
        assert_eq!(
            repository(&settings, None).unwrap().as_str(),
            "github.com/acme/app"
        );
    }

    #[test]
    fn test_missing_repository_is_config_error() {
        let err = repository(&Settings::default(), None).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ConfigError);
    }

    #[test]
    fn test_convert_file_to_file() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("graph.json");
        let output = temp.path().join("out.json");
        std::fs::write(&input, PAYLOAD).unwrap();

        let stats = run(
            &Settings::default(),
            Some(&input),
            Some(&output),
            Some("github.com/acme/app"),
            false,
        )
        .unwrap();

        assert_eq!(stats.symbols, 1);
        assert_eq!(stats.self_refs, 1);
        assert_eq!(stats.dropped_refs, 1);

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(written["Symbols"][0]["SpecificPath"], "mod.Foo");
        assert_eq!(written["Refs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = run(
            &Settings::default(),
            Some(&temp.path().join("absent.json")),
            None,
            Some("github.com/acme/app"),
            false,
        )
        .unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::IoError);
    }
}
