// src/cli/handlers/launch.rs

use crate::cli::args::LaunchArgs;
use crate::cli::handlers::commons;
use crate::models::FinderConfig;
use crate::system::launcher;
use anyhow::Result;
use clap::Parser;

/// The main handler for the `launch` command. This is the default command
/// and is invoked when no command is passed to appfind.
pub fn handle(args: Vec<String>, config: &FinderConfig) -> Result<()> {
    let launch_args = LaunchArgs::try_parse_from(&args)?;

    let matches = commons::resolve_candidates(config)?;
    let chosen = commons::pick_version(&matches, &launch_args.appver)?;

    let mut forwarded = launch_args.args;
    if launch_args.apphelp {
        forwarded.insert(0, "--help".to_string());
    }

    commons::announce_launch(chosen, &forwarded);

    // On Unix this replaces the process image and never returns; elsewhere
    // the child's exit code is propagated as our own.
    let code = launcher::launch(chosen, &forwarded)?;
    std::process::exit(code)
}
