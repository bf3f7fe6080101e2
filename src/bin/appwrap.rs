// src/bin/appwrap.rs

use anyhow::{Result, anyhow};
use appfind::{
    constants::WRAP_TEMPLATES_ENV,
    core::{config, ranking, scanner, template::Template},
    models::Candidate,
    system::launcher::{self, LaunchError},
};
use clap::Parser;
use colored::*;
use std::env;

/// appwrap: the minimal variant of appfind.
///
/// Resolves the same path templates but without token ranking: versions sort
/// by their rendered version string alone, and the latest one launches unless
/// another is requested.
#[derive(Parser, Debug)]
#[command(author, version, about, trailing_var_arg = true)]
struct Cli {
    /// Version of the wrapped application to run.
    #[arg(long, default_value = "latest", value_name = "VERSION")]
    run_version: String,

    /// Lists all available versions instead of launching.
    #[arg(long)]
    list_versions: bool,

    /// Path templates to executable files, separated by the platform's PATH
    /// separator. Falls back to APPWRAP_EXEC_TEMPLATES.
    #[arg(long, value_name = "LIST")]
    templates: Option<String>,

    /// Arguments forwarded unchanged to the launched executable.
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        if let Some(launch_err) = e.downcast_ref::<LaunchError>()
            && matches!(launch_err, LaunchError::NoExecutableFound { .. })
        {
            eprintln!("\n{}: {}", "Error".red().bold(), e);
            std::process::exit(127);
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let raw_list = cli
        .templates
        .or_else(|| env::var(WRAP_TEMPLATES_ENV).ok())
        .ok_or_else(|| {
            anyhow!(
                "no exec templates configured: pass --templates or set {}",
                WRAP_TEMPLATES_ENV
            )
        })?;
    let raw_templates = config::split_list(&raw_list);

    let templates = raw_templates
        .iter()
        .map(|raw| Template::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut found: Vec<Candidate> = Vec::new();
    for template in &templates {
        match scanner::scan(template) {
            Ok(candidates) => found.extend(candidates),
            Err(e) => log::warn!("skipping template '{}': {}", template.raw(), e),
        }
    }
    found.retain(|candidate| launcher::is_executable(&candidate.path));

    let matches = ranking::rank_by_version(found);
    if matches.is_empty() {
        return Err(LaunchError::NoExecutableFound {
            templates: raw_templates,
        }
        .into());
    }

    if cli.list_versions {
        for candidate in &matches {
            println!("{}", candidate.version);
        }
        return Ok(());
    }

    let chosen = if cli.run_version == "latest" {
        matches
            .first()
            .ok_or_else(|| anyhow!("no versions available"))?
    } else {
        matches
            .iter()
            .find(|m| m.version == cli.run_version)
            .ok_or_else(|| anyhow!("no version found matching '{}'", cli.run_version))?
    };

    println!(
        "{} {}: {}",
        "Launching".green().bold(),
        chosen.version,
        dunce::simplified(&chosen.path).display()
    );
    let code = launcher::launch(chosen, &cli.args)?;
    std::process::exit(code)
}
