// src/constants.rs

/// Environment variable holding the pathsep-separated template list for `appfind`.
pub const TEMPLATES_ENV: &str = "APPFIND_TEMPLATES";

/// Environment variable naming the pre-release tokens (e.g. "alpha:beta:dev").
pub const PR_TOKENS_ENV: &str = "APPFIND_PR_TOKENS";

/// Environment variable defining the token precedence used when ranking versions.
pub const TOKEN_SORT_ENV: &str = "APPFIND_TOKEN_SORT";

/// Environment variable pinning the version that gets the `default` tag.
pub const DEFAULT_VERSION_ENV: &str = "APPFIND_DEFAULT_VERSION";

/// Environment variable holding the template list for the `appwrap` variant.
pub const WRAP_TEMPLATES_ENV: &str = "APPWRAP_EXEC_TEMPLATES";

/// Separator between entries in template and token lists, matching the
/// platform's `PATH` separator.
#[cfg(windows)]
pub const LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const LIST_SEPARATOR: char = ':';

/// Tag applied to the version that launches when no explicit version is requested.
pub const TAG_DEFAULT: &str = "default";

/// Tag applied to the highest-ranked non-pre-release version.
pub const TAG_LATEST: &str = "latest";
