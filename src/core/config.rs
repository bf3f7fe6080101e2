// src/core/config.rs

use crate::constants::{
    DEFAULT_VERSION_ENV, LIST_SEPARATOR, PR_TOKENS_ENV, TEMPLATES_ENV, TOKEN_SORT_ENV,
};
use crate::models::FinderConfig;
use anyhow::{Result, anyhow};
use std::env;

/// Splits a pathsep-separated list into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// CLI-level overrides for the `APPFIND_*` environment variables. Every field
/// wins over its environment counterpart when present.
#[derive(Debug, Default, Clone)]
pub struct FinderOverrides {
    pub templates: Option<String>,
    pub prerelease_tokens: Option<String>,
    pub sort_order: Option<String>,
    pub default_version: Option<String>,
}

/// Builds the explicit resolver configuration from CLI overrides and the
/// environment. Templates are mandatory; everything else is optional.
pub fn load_finder_config(overrides: FinderOverrides) -> Result<FinderConfig> {
    let raw_templates = overrides
        .templates
        .or_else(|| env::var(TEMPLATES_ENV).ok())
        .ok_or_else(|| {
            anyhow!(
                "no path templates configured: pass --templates or set {}",
                TEMPLATES_ENV
            )
        })?;

    let templates = split_list(&raw_templates);
    if templates.is_empty() {
        return Err(anyhow!("the configured template list is empty"));
    }

    let prerelease_tokens = overrides
        .prerelease_tokens
        .or_else(|| env::var(PR_TOKENS_ENV).ok())
        .map(|raw| split_list(&raw))
        .unwrap_or_default();

    let sort_order = overrides
        .sort_order
        .or_else(|| env::var(TOKEN_SORT_ENV).ok())
        .map(|raw| split_list(&raw))
        .unwrap_or_default();

    let default_version = overrides
        .default_version
        .or_else(|| env::var(DEFAULT_VERSION_ENV).ok())
        .filter(|version| !version.trim().is_empty());

    log::debug!(
        "resolver config: {} template(s), sort order {:?}, pre-release tokens {:?}, default version {:?}",
        templates.len(),
        sort_order,
        prerelease_tokens,
        default_version
    );

    Ok(FinderConfig {
        templates,
        sort_order,
        prerelease_tokens,
        default_version,
    })
}
