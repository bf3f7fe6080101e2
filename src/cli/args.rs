// src/cli/args.rs
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true, // The command name is stripped before parsing.
    trailing_var_arg = true,
    about = "Launches the found app, latest by default."
)]
pub struct LaunchArgs {
    /// Version of the found app to run. Accepts a tag ('default', 'latest',
    /// or a pre-release token name like 'beta') or an exact version string.
    #[arg(long, default_value = "default")]
    pub appver: String,

    /// Passes --help through to the wrapped app, since the wrapper's own
    /// --help shadows it.
    #[arg(long)]
    pub apphelp: bool,

    /// Arguments forwarded unchanged to the launched executable.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Lists the versions found by appfind.")]
pub struct ListArgs {
    /// Also list the full executable paths.
    #[arg(long, short)]
    pub paths: bool,

    /// Prompt for the version to launch after listing.
    #[arg(long, short)]
    pub ask: bool,
}
