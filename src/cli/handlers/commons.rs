// src/cli/handlers/commons.rs

// This module contains shared functions used by multiple handlers.

use crate::constants::TAG_DEFAULT;
use crate::core::resolver::Resolver;
use crate::models::{Candidate, FinderConfig};
use crate::system::launcher::LaunchError;
use anyhow::{Result, anyhow};
use colored::Colorize;

/// Runs the full resolution pipeline and fails with the template list when
/// nothing launchable was found.
pub fn resolve_candidates(config: &FinderConfig) -> Result<Vec<Candidate>> {
    let resolver = Resolver::new(config)?;
    let matches = resolver.resolve();
    if matches.is_empty() {
        return Err(LaunchError::NoExecutableFound {
            templates: resolver.template_list(),
        }
        .into());
    }
    Ok(matches)
}

/// Finds the candidate a requested version refers to. Tags win over exact
/// version strings, so `beta` means "the beta tag" even if a version is
/// literally named that.
pub fn pick_version<'a>(matches: &'a [Candidate], appver: &str) -> Result<&'a Candidate> {
    if let Some(found) = matches.iter().find(|m| m.has_tag(appver)) {
        return Ok(found);
    }
    if let Some(found) = matches.iter().find(|m| m.version == appver) {
        return Ok(found);
    }
    if appver == TAG_DEFAULT {
        // Every match is a pre-release and no default was pinned; fall back
        // to the highest-ranked candidate rather than refuse to launch.
        log::warn!("no candidate carries the 'default' tag; using the highest-ranked version");
        return matches
            .first()
            .ok_or_else(|| anyhow!("no versions available"));
    }
    Err(anyhow!("no version found matching '{}'", appver))
}

/// Echoes the command line about to replace (or spawn from) this process.
pub fn announce_launch(candidate: &Candidate, args: &[String]) {
    let mut command_line = dunce::simplified(&candidate.path).display().to_string();
    for arg in args {
        command_line.push(' ');
        command_line.push_str(arg);
    }
    println!("{} {}", "Launching:".green().bold(), command_line);
}
