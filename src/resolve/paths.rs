//! Lexical path arithmetic for sandbox paths.
//!
//! Analyzer paths always come from the Linux sandbox, so these helpers work on
//! `/`-separated strings rather than host `Path`s. Nothing here touches the
//! filesystem.

use serde::{Deserialize, Serialize};

/// Which relativizations count as "contained" in a base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentPolicy {
    /// The relative path must not climb out of the base with `..`.
    #[default]
    Strict,
    /// Any successful relativization counts, including `../sibling/x.py`.
    Lexical,
}

impl ContainmentPolicy {
    /// Relativize `target` against `base`, or `None` if it is not contained.
    pub fn relativize(self, base: &str, target: &str) -> Option<String> {
        let relative = relative_path(base, target)?;
        match self {
            Self::Lexical => Some(relative),
            Self::Strict if escapes_base(&relative) => None,
            Self::Strict => Some(relative),
        }
    }
}

/// Lexically normalize a path: collapse repeated separators, drop `.`
/// segments and resolve `..` against preceding segments.
///
/// The empty path cleans to `.`; `..` at the root of an absolute path is
/// dropped.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Compute `target` relative to `base`.
///
/// Fails only when the two paths cannot be related lexically: one is absolute
/// and the other relative, or `base` needs to climb through a `..` segment the
/// target does not share. Results may start with `..`.
pub fn relative_path(base: &str, target: &str) -> Option<String> {
    let base = clean(base);
    let target = clean(target);
    if base == target {
        return Some(".".to_string());
    }
    if base.starts_with('/') != target.starts_with('/') {
        return None;
    }

    let base_segments = segments(&base);
    let target_segments = segments(&target);
    let common = base_segments
        .iter()
        .zip(&target_segments)
        .take_while(|(b, t)| b == t)
        .count();

    let remaining_base = &base_segments[common..];
    if remaining_base.first() == Some(&"..") {
        return None;
    }

    let mut relative = vec![".."; remaining_base.len()];
    relative.extend_from_slice(&target_segments[common..]);
    if relative.is_empty() {
        Some(".".to_string())
    } else {
        Some(relative.join("/"))
    }
}

/// True if a relative path climbs out of its base.
pub fn escapes_base(relative: &str) -> bool {
    relative == ".." || relative.starts_with("../")
}

fn segments(cleaned: &str) -> Vec<&str> {
    cleaned
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}
