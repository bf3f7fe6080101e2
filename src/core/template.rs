// src/core/template.rs

use crate::constants::LIST_SEPARATOR;
use crate::models::Segment;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template '{0}' must mark the version region with '[' and ']' brackets")]
    MissingProbe(String),
    #[error("template '{0}' has unbalanced probe brackets")]
    UnbalancedBrackets(String),
    #[error("template '{0}' contains more than one probe region")]
    MultipleProbes(String),
    #[error("unclosed '{{' placeholder in template '{0}'")]
    UnclosedPlaceholder(String),
    #[error("empty placeholder name in template '{0}'")]
    EmptyPlaceholder(String),
    #[error(
        "invalid token name '{name}' in template '{template}': only lowercase ASCII letters are allowed"
    )]
    InvalidTokenName { template: String, name: String },
    #[error("empty template string")]
    EmptyTemplate,
}

/// A parsed path template: literal path text interleaved with `{token}`
/// placeholders, plus exactly one bracketed probe region marking the
/// substring that names a discovered version.
///
/// Example: `/apps/nuke[{major}.{minor}v{release}]/nuke{major}.{minor}`.
#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
    segments: Vec<Segment>,
    /// Segment index range `[probe_start, probe_end)` covered by the probe.
    probe_start: usize,
    probe_end: usize,
}

impl Template {
    /// Parses a single template string.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        if raw.trim().is_empty() {
            return Err(TemplateError::EmptyTemplate);
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut probe_start: Option<usize> = None;
        let mut probe_end: Option<usize> = None;

        let flush = |literal: &mut String, segments: &mut Vec<Segment>| {
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(literal)));
            }
        };

        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            match c {
                '[' => {
                    if probe_end.is_some() || probe_start.is_some() {
                        // A second probe, or a '[' inside an open probe.
                        return if probe_end.is_some() {
                            Err(TemplateError::MultipleProbes(raw.to_string()))
                        } else {
                            Err(TemplateError::UnbalancedBrackets(raw.to_string()))
                        };
                    }
                    flush(&mut literal, &mut segments);
                    probe_start = Some(segments.len());
                }
                ']' => {
                    if probe_start.is_none() || probe_end.is_some() {
                        return Err(TemplateError::UnbalancedBrackets(raw.to_string()));
                    }
                    flush(&mut literal, &mut segments);
                    probe_end = Some(segments.len());
                }
                '{' => {
                    flush(&mut literal, &mut segments);
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) if c.is_ascii_lowercase() => name.push(c),
                            Some(c) => {
                                return Err(TemplateError::InvalidTokenName {
                                    template: raw.to_string(),
                                    name: format!("{}{}", name, c),
                                });
                            }
                            None => {
                                return Err(TemplateError::UnclosedPlaceholder(raw.to_string()));
                            }
                        }
                    }
                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder(raw.to_string()));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                _ => literal.push(c),
            }
        }
        flush(&mut literal, &mut segments);

        match (probe_start, probe_end) {
            (Some(start), Some(end)) => Ok(Self {
                raw: raw.to_string(),
                segments,
                probe_start: start,
                probe_end: end,
            }),
            (Some(_), None) => Err(TemplateError::UnbalancedBrackets(raw.to_string())),
            (None, _) => Err(TemplateError::MissingProbe(raw.to_string())),
        }
    }

    /// Parses a pathsep-separated template list, in configuration order.
    /// Empty entries are ignored; any malformed entry fails the whole list.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, TemplateError> {
        list.split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// The original template string, untouched.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All segments of the template path, with the probe brackets stripped.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The segments inside the probe region. Rendering these with concrete
    /// token values yields a candidate's version string.
    pub fn probe_segments(&self) -> &[Segment] {
        self.segments
            .get(self.probe_start..self.probe_end)
            .unwrap_or_default()
    }

    /// Unique token names, in order of first appearance.
    pub fn tokens(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment
                && !seen.contains(&name.as_str())
            {
                seen.push(name.as_str());
            }
        }
        seen
    }

    /// Re-renders the parsed skeleton: placeholders and probe brackets are
    /// restored, reproducing the input string exactly.
    pub fn render_skeleton(&self) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for i in 0..=self.segments.len() {
            if i == self.probe_start {
                out.push('[');
            }
            if i == self.probe_end {
                out.push(']');
            }
            match self.segments.get(i) {
                Some(Segment::Literal(text)) => out.push_str(text),
                Some(Segment::Placeholder(name)) => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
                None => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_template() {
        let template = Template::parse("/apps/app-[{major}.{minor}]/bin").unwrap();
        assert_eq!(template.tokens(), vec!["major", "minor"]);
        assert_eq!(
            template.probe_segments(),
            &[
                Segment::Placeholder("major".to_string()),
                Segment::Literal(".".to_string()),
                Segment::Placeholder("minor".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_tokens_listed_once() {
        let template =
            Template::parse("/apps/nuke[{major}.{minor}]/nuke{major}.{minor}").unwrap();
        assert_eq!(template.tokens(), vec!["major", "minor"]);
    }

    #[test]
    fn test_render_skeleton_round_trips() {
        let inputs = [
            "/apps/app-[{major}.{minor}]/bin",
            "/apps/nuke[{major}.{minor}v{release}]/nuke{major}.{minor}",
            "~/tools/[{year}]/run",
            "prefix[{major}]",
            "[{major}]/suffix",
        ];
        for input in inputs {
            let template = Template::parse(input).unwrap();
            assert_eq!(template.render_skeleton(), input, "round-trip of '{input}'");
        }
    }

    #[test]
    fn test_missing_probe_is_rejected() {
        let err = Template::parse("/apps/app-{major}/bin").unwrap_err();
        assert!(matches!(err, TemplateError::MissingProbe(_)));
    }

    #[test]
    fn test_unbalanced_brackets_are_rejected() {
        assert!(matches!(
            Template::parse("/a/app-[{major}/bin").unwrap_err(),
            TemplateError::UnbalancedBrackets(_)
        ));
        assert!(matches!(
            Template::parse("/a/app-{major}]/bin").unwrap_err(),
            TemplateError::UnbalancedBrackets(_)
        ));
        assert!(matches!(
            Template::parse("/a/[[{major}]]/bin").unwrap_err(),
            TemplateError::UnbalancedBrackets(_)
        ));
    }

    #[test]
    fn test_multiple_probes_are_rejected() {
        let err = Template::parse("/a/[{major}]/[{minor}]/bin").unwrap_err();
        assert!(matches!(err, TemplateError::MultipleProbes(_)));
    }

    #[test]
    fn test_bad_placeholders_are_rejected() {
        assert!(matches!(
            Template::parse("/a/[{major]/bin").unwrap_err(),
            // ']' terminates nothing inside an open '{'
            TemplateError::InvalidTokenName { .. }
        ));
        assert!(matches!(
            Template::parse("/a/[{}]/bin").unwrap_err(),
            TemplateError::EmptyPlaceholder(_)
        ));
        assert!(matches!(
            Template::parse("/a/[{major").unwrap_err(),
            TemplateError::UnclosedPlaceholder(_)
        ));
        assert!(matches!(
            Template::parse("/a/[{Major}]/bin").unwrap_err(),
            TemplateError::InvalidTokenName { .. }
        ));
    }

    #[test]
    fn test_parse_list_splits_on_pathsep() {
        let list = format!(
            "/a/x-[{{major}}]/bin{sep}{sep}/b/y-[{{major}}]/bin",
            sep = LIST_SEPARATOR
        );
        let templates = Template::parse_list(&list).unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].raw(), "/a/x-[{major}]/bin");
        assert_eq!(templates[1].raw(), "/b/y-[{major}]/bin");
    }

    #[test]
    fn test_empty_template_is_rejected() {
        assert_eq!(Template::parse("  ").unwrap_err(), TemplateError::EmptyTemplate);
    }
}
