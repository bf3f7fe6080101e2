// src/cli/mod.rs

use clap::Parser;

pub mod args;
pub mod handlers;

/// appfind: a universal app finder and wrapper.
///
/// Finds all versions of the same application on disk using the configured
/// path templates, then launches the default or a requested version. With no
/// command, `launch` runs implicitly and unrecognized arguments are passed on
/// to the launched application.
#[derive(Parser, Debug)]
#[command(author, version, about, trailing_var_arg = true)]
pub struct Cli {
    /// Path templates to executable files, separated by the platform's PATH
    /// separator. Falls back to APPFIND_TEMPLATES. Token names stand in for
    /// version fields ('{major}'), and brackets mark the version region:
    /// '/apps/app[{major}.{minor}]/bin/app{major}.{minor}'.
    #[arg(long, value_name = "LIST")]
    pub templates: Option<String>,

    /// Names of pre-release tokens, separated by the PATH separator
    /// (e.g. 'alpha:beta:dev'). Falls back to APPFIND_PR_TOKENS. Matches
    /// carrying one of these tokens never become the default version.
    #[arg(long, value_name = "LIST")]
    pub prtokens: Option<String>,

    /// Token precedence used to sort versions, most significant first
    /// (e.g. 'year:month:major:minor'). Falls back to APPFIND_TOKEN_SORT.
    /// When unset, tokens sort in the order they appear in the templates.
    #[arg(long, value_name = "LIST")]
    pub tsort: Option<String>,

    /// Version to tag as 'default' instead of the latest release. Falls back
    /// to APPFIND_DEFAULT_VERSION.
    #[arg(long = "default-version", value_name = "VERSION")]
    pub default_version: Option<String>,

    /// A command ('launch', 'list') followed by its arguments, or directly
    /// the arguments for the implicit 'launch'.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
