// src/core/scanner.rs

use crate::core::template::Template;
use crate::models::{Candidate, Segment, TokenValue};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

lazy_static! {
    /// Re-locates `{token}` placeholders inside a single path component after
    /// home-dir/env expansion of the full pattern string.
    static ref TOKEN_RE: Regex = Regex::new(r"\{([a-z]+)\}").unwrap();
}

/// A per-template scan failure. Non-fatal by contract: the caller logs it and
/// continues with the remaining templates.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot expand template '{template}': {reason}")]
    Expansion { template: String, reason: String },
    #[error("template '{template}' produced an invalid matcher: {source}")]
    Matcher {
        template: String,
        #[source]
        source: regex::Error,
    },
}

/// One path component of a template, split into literal and token pieces.
#[derive(Debug)]
enum Piece {
    Literal(String),
    Token(String),
}

/// In-flight walk state: a directory reached so far plus the raw token
/// bindings collected along the way.
#[derive(Debug, Clone)]
struct WalkState {
    path: PathBuf,
    bindings: HashMap<String, String>,
}

/// Expands one template against the real filesystem and extracts a candidate
/// for every concrete match.
///
/// The walk is a manual segment walk: the template path is split on
/// separators, literal components are joined directly (and pruned when the
/// joined path does not exist), and components containing placeholders are
/// matched against `read_dir` entries with an anchored, case-insensitive
/// per-component regex. Token values are captured minimally (`\w+?`), so the
/// anchors stretch each capture just far enough for the whole component to
/// match; first occurrence wins, and repeated occurrences of the same token
/// must match the first binding (case-insensitively) or the entry is skipped.
///
/// Unreadable directories and non-matching entries are skipped at debug
/// level; only a broken template (bad expansion, uncompilable matcher)
/// surfaces as a [`ScanError`].
pub fn scan(template: &Template) -> Result<Vec<Candidate>, ScanError> {
    // 1. Rebuild the path pattern without probe brackets, then expand `~`
    //    and environment variables. `{token}` braces pass through untouched.
    let pattern = render_pattern(template);
    let expanded = shellexpand::full(&pattern).map_err(|e| ScanError::Expansion {
        template: template.raw().to_string(),
        reason: e.to_string(),
    })?;

    // 2. Split the expanded pattern into path components.
    let (mut states, components) = initial_walk(&expanded);

    // 3. Walk the filesystem component by component.
    for component in &components {
        let has_tokens = component
            .iter()
            .any(|piece| matches!(piece, Piece::Token(_)));

        if !has_tokens {
            states = descend_literal(states, component);
        } else {
            let (matcher, group_tokens) =
                component_matcher(component).map_err(|e| ScanError::Matcher {
                    template: template.raw().to_string(),
                    source: e,
                })?;
            states = descend_matching(states, &matcher, &group_tokens);
        }
        if states.is_empty() {
            break;
        }
    }

    // 4. Turn every surviving walk state into a candidate.
    let candidates = states
        .into_iter()
        .map(|state| {
            let version = render_version(template, &state.bindings);
            let tokens = state
                .bindings
                .iter()
                .map(|(name, raw)| (name.clone(), TokenValue::parse(raw)))
                .collect();
            Candidate {
                path: state.path,
                version,
                tokens,
                tags: Vec::new(),
            }
        })
        .collect();

    Ok(candidates)
}

/// Joins a template's segments back into a plain pattern string, keeping
/// `{token}` placeholders but dropping the probe brackets.
fn render_pattern(template: &Template) -> String {
    let mut out = String::new();
    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
    }
    out
}

/// Splits the expanded pattern into components and seeds the walk at the
/// pattern's root: `/` for absolute patterns, the drive root on Windows,
/// or the current directory for relative ones.
fn initial_walk(expanded: &str) -> (Vec<WalkState>, Vec<Vec<Piece>>) {
    let (base, rest) = split_root(expanded);

    let components = rest
        .split(std::path::is_separator)
        .filter(|component| !component.is_empty())
        .map(parse_pieces)
        .collect();

    let seed = WalkState {
        path: base,
        bindings: HashMap::new(),
    };
    (vec![seed], components)
}

/// Peels the filesystem root off a pattern string.
fn split_root(expanded: &str) -> (PathBuf, &str) {
    if expanded.chars().next().is_some_and(std::path::is_separator) {
        return (
            PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
            expanded,
        );
    }

    // Drive-qualified Windows pattern, e.g. "C:\apps\...".
    let mut chars = expanded.chars();
    if cfg!(windows)
        && let (Some(drive), Some(':'), Some(sep)) = (chars.next(), chars.next(), chars.next())
        && drive.is_ascii_alphabetic()
        && std::path::is_separator(sep)
    {
        let root = expanded.get(..3).unwrap_or_default();
        let rest = expanded.get(3..).unwrap_or_default();
        return (PathBuf::from(root), rest);
    }

    (PathBuf::from("."), expanded)
}

/// Splits one path component into literal and `{token}` pieces.
fn parse_pieces(component: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in TOKEN_RE.captures_iter(component) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            pieces.push(Piece::Literal(
                component
                    .get(last..whole.start())
                    .unwrap_or_default()
                    .to_string(),
            ));
        }
        pieces.push(Piece::Token(name.as_str().to_string()));
        last = whole.end();
    }
    if last < component.len() {
        pieces.push(Piece::Literal(
            component.get(last..).unwrap_or_default().to_string(),
        ));
    }
    pieces
}

/// Advances every walk state through a token-free component. Paths that do
/// not exist are pruned silently.
fn descend_literal(states: Vec<WalkState>, component: &[Piece]) -> Vec<WalkState> {
    let literal: String = component
        .iter()
        .map(|piece| match piece {
            Piece::Literal(text) => text.as_str(),
            Piece::Token(_) => "",
        })
        .collect();

    states
        .into_iter()
        .filter_map(|mut state| {
            let next = state.path.join(&literal);
            if fs::metadata(&next).is_ok() {
                state.path = next;
                Some(state)
            } else {
                log::debug!("pruning '{}': does not exist", next.display());
                None
            }
        })
        .collect()
}

/// Builds the anchored, case-insensitive regex for one component. Returns the
/// matcher plus the token name behind each capture group, in group order.
fn component_matcher(component: &[Piece]) -> Result<(Regex, Vec<String>), regex::Error> {
    let mut pattern = String::from("^");
    let mut group_tokens = Vec::new();
    for piece in component {
        match piece {
            Piece::Literal(text) => pattern.push_str(&regex::escape(text)),
            Piece::Token(name) => {
                pattern.push_str(r"(\w+?)");
                group_tokens.push(name.clone());
            }
        }
    }
    pattern.push('$');

    let matcher = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
    Ok((matcher, group_tokens))
}

/// Advances every walk state through a component containing placeholders by
/// listing the directory and matching entry names. Unreadable directories
/// are skipped; conflicting repeated-token captures drop the entry.
fn descend_matching(
    states: Vec<WalkState>,
    matcher: &Regex,
    group_tokens: &[String],
) -> Vec<WalkState> {
    let mut next_states = Vec::new();
    for state in states {
        let entries = match fs::read_dir(&state.path) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("skipping unreadable '{}': {}", state.path.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let Some(caps) = matcher.captures(&name) else {
                continue;
            };

            let mut bindings = state.bindings.clone();
            let mut consistent = true;
            for (i, token) in group_tokens.iter().enumerate() {
                let Some(value) = caps.get(i + 1).map(|m| m.as_str()) else {
                    consistent = false;
                    break;
                };
                match bindings.get(token) {
                    Some(existing) if !existing.eq_ignore_ascii_case(value) => {
                        log::debug!(
                            "skipping '{}': token '{}' rebinds '{}' as '{}'",
                            name,
                            token,
                            existing,
                            value
                        );
                        consistent = false;
                        break;
                    }
                    Some(_) => {}
                    None => {
                        bindings.insert(token.clone(), value.to_string());
                    }
                }
            }
            if consistent {
                next_states.push(WalkState {
                    path: state.path.join(name.as_ref()),
                    bindings,
                });
            }
        }
    }
    next_states
}

/// Renders a candidate's version string from the probe region and the raw
/// token bindings collected during the walk.
fn render_version(template: &Template, bindings: &HashMap<String, String>) -> String {
    let mut version = String::new();
    for segment in template.probe_segments() {
        match segment {
            Segment::Literal(text) => version.push_str(text),
            Segment::Placeholder(name) => match bindings.get(name) {
                Some(value) => version.push_str(value),
                None => log::debug!("probe token '{}' has no binding", name),
            },
        }
    }
    version
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(path: &std::path::Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    fn scan_sorted(template: &str) -> Vec<Candidate> {
        let template = Template::parse(template).unwrap();
        let mut found = scan(&template).unwrap();
        found.sort_by(|a, b| a.version.cmp(&b.version));
        found
    }

    #[test]
    fn test_scan_extracts_versions_and_tokens() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("app-1.2/bin"));
        touch(&root.path().join("app-1.5/bin"));
        touch(&root.path().join("app-junk/bin"));

        let found = scan_sorted(&format!(
            "{}/app-[{{major}}.{{minor}}]/bin",
            root.path().display()
        ));

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].version, "1.2");
        assert_eq!(found[1].version, "1.5");
        assert_eq!(found[1].tokens.get("major"), Some(&TokenValue::Number(1)));
        assert_eq!(found[1].tokens.get("minor"), Some(&TokenValue::Number(5)));
        assert!(found[1].path.ends_with("app-1.5/bin"));
    }

    #[test]
    fn test_scan_requires_full_component_match() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("app-1.2.9/bin"));

        // {major}.{minor} cannot swallow the extra ".9".
        let found = scan_sorted(&format!(
            "{}/app-[{{major}}.{{minor}}]/bin",
            root.path().display()
        ));
        assert!(found.is_empty());
    }

    #[test]
    fn test_scan_repeated_token_must_rebind_identically() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("nuke-7/nuke7"));
        touch(&root.path().join("nuke-8/nuke9"));

        let found = scan_sorted(&format!(
            "{}/nuke-[{{major}}]/nuke{{major}}",
            root.path().display()
        ));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].version, "7");
    }

    #[test]
    fn test_scan_tokens_spanning_components() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("v12/app-12.3"));

        let found = scan_sorted(&format!(
            "{}/v{{major}}/app-[{{major}}.{{minor}}]",
            root.path().display()
        ));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].version, "12.3");
    }

    #[test]
    fn test_scan_missing_root_yields_no_candidates() {
        let root = TempDir::new().unwrap();
        let found = scan_sorted(&format!(
            "{}/nowhere/app-[{{major}}]/bin",
            root.path().display()
        ));
        assert!(found.is_empty());
    }

    #[test]
    fn test_scan_textual_tokens() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("app-2.0beta/bin"));

        let found = scan_sorted(&format!(
            "{}/app-[{{major}}.{{minor}}{{stage}}]/bin",
            root.path().display()
        ));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].version, "2.0beta");
        assert_eq!(
            found[0].tokens.get("stage"),
            Some(&TokenValue::Text("beta".to_string()))
        );
    }
}
