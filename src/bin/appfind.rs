// src/bin/appfind.rs

use anyhow::Result;
use appfind::{
    cli::{Cli, handlers},
    core::config::{self, FinderOverrides},
    models::FinderConfig,
    system::launcher::LaunchError,
};
use clap::Parser;
use colored::*;

// --- Command Definition and Registry ---

/// Defines a wrapper command, its aliases, and its handler function. The
/// handler signature is kept consistent across all commands for simplicity
/// in the registry.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &FinderConfig) -> Result<()>,
}

/// The single source of truth for all wrapper commands. `launch` doubles as
/// the implicit default when the first argument is not a known command.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "launch",
        aliases: &[],
        handler: handlers::launch::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// The main entry point of the `appfind` wrapper.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // --- Centralized Error Handling ---
        // A resolution miss gets the shell's "command not found" exit code so
        // callers can tell it apart from the target's own failures.
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

/// The main application dispatcher.
///
/// Builds the resolver configuration from flags and the `APPFIND_*`
/// environment, then routes the remaining arguments: a known command name
/// dispatches to its handler, anything else becomes an implicit `launch`.
fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let config = config::load_finder_config(FinderOverrides {
        templates: cli.templates,
        prerelease_tokens: cli.prtokens,
        sort_order: cli.tsort,
        default_version: cli.default_version,
    })?;

    let mut args = cli.args;
    let definition = args.first().and_then(|name| find_command(name));
    match definition {
        Some(definition) => {
            args.remove(0);
            (definition.handler)(args, &config)
        }
        // No command given: everything is input for the default `launch`.
        None => handlers::launch::handle(args, &config),
    }
}
