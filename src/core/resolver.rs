// src/core/resolver.rs

use crate::core::ranking::Ranker;
use crate::core::scanner;
use crate::core::template::{Template, TemplateError};
use crate::models::{Candidate, FinderConfig};
use crate::system::launcher;
use std::collections::HashMap;
use std::path::PathBuf;

/// The resolution pipeline: parse templates, scan the filesystem, keep only
/// launchable matches, rank them, and tag the result.
///
/// Construction parses every template eagerly, so a malformed template fails
/// fast; scanning failures at resolve time are per-template and non-fatal.
#[derive(Debug)]
pub struct Resolver {
    templates: Vec<Template>,
    ranker: Ranker,
    default_version: Option<String>,
}

impl Resolver {
    pub fn new(config: &FinderConfig) -> Result<Self, TemplateError> {
        let templates = config
            .templates
            .iter()
            .map(|raw| Template::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let sort_order = if config.sort_order.is_empty() {
            derive_sort_order(&templates)
        } else {
            config.sort_order.clone()
        };

        Ok(Self {
            templates,
            ranker: Ranker::new(sort_order, config.prerelease_tokens.clone()),
            default_version: config.default_version.clone(),
        })
    }

    /// Scans all templates and returns the launchable candidates, best-first
    /// and tagged. An empty result means nothing on disk matched.
    pub fn resolve(&self) -> Vec<Candidate> {
        let mut seen_paths: HashMap<PathBuf, usize> = HashMap::new();
        let mut found: Vec<Candidate> = Vec::new();

        for template in &self.templates {
            match scanner::scan(template) {
                Ok(candidates) => {
                    for candidate in candidates {
                        match seen_paths.get(&candidate.path) {
                            None => {
                                seen_paths.insert(candidate.path.clone(), found.len());
                                found.push(candidate);
                            }
                            // Overlapping templates can match the same path.
                            // Keep the more specific interpretation, i.e. the
                            // one that bound more tokens.
                            Some(&at) => {
                                if let Some(existing) = found.get_mut(at)
                                    && candidate.tokens.len() > existing.tokens.len()
                                {
                                    log::debug!(
                                        "re-interpreting '{}' with {} token(s)",
                                        candidate.path.display(),
                                        candidate.tokens.len()
                                    );
                                    *existing = candidate;
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    log::warn!("skipping template '{}': {}", template.raw(), e);
                }
            }
        }

        // Non-executable matches are dropped here, so selection naturally
        // falls through to the next-ranked launchable candidate.
        found.retain(|candidate| {
            let launchable = launcher::is_executable(&candidate.path);
            if !launchable {
                log::debug!("'{}' exists but is not executable", candidate.path.display());
            }
            launchable
        });

        let mut ranked = self.ranker.rank(found);
        self.ranker
            .apply_tags(&mut ranked, self.default_version.as_deref());
        ranked
    }

    /// Raw template strings, for diagnostics when nothing resolves.
    pub fn template_list(&self) -> Vec<String> {
        self.templates
            .iter()
            .map(|template| template.raw().to_string())
            .collect()
    }
}

/// Default token precedence when none is configured: the order tokens first
/// appear across the templates. Keeps comparisons numeric instead of falling
/// back to a lexical version-string sort.
fn derive_sort_order(templates: &[Template]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for template in templates {
        for token in template.tokens() {
            if !order.iter().any(|known| known == token) {
                order.push(token.to_string());
            }
        }
    }
    order
}
