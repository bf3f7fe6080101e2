// src/system/launcher.rs

use crate::models::Candidate;
use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(
        "no executable found matching templates: {}",
        .templates.join(", ")
    )]
    NoExecutableFound { templates: Vec<String> },
    #[error("failed to launch '{path}': {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// True if the path points at a runnable file: a regular file with at least
/// one execute bit on Unix, any regular file elsewhere.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

/// Hands control to the candidate's executable, forwarding the given
/// arguments. The environment and working directory are inherited unchanged.
///
/// On Unix the current process image is replaced, so on success this never
/// returns. On other platforms the target runs as a child and its exit code
/// is returned for the caller to propagate.
pub fn launch(candidate: &Candidate, args: &[String]) -> Result<i32, LaunchError> {
    let path = dunce::simplified(&candidate.path);
    log::debug!(
        "launching version '{}' from '{}' with {} forwarded arg(s)",
        candidate.version,
        path.display(),
        args.len()
    );

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let error = StdCommand::new(path).args(args).exec();
        // exec only returns on failure.
        Err(LaunchError::Spawn {
            path: path.display().to_string(),
            source: error,
        })
    }

    #[cfg(not(unix))]
    {
        let status = StdCommand::new(path)
            .args(args)
            .status()
            .map_err(|e| LaunchError::Spawn {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(status.code().unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_is_executable_checks_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let plain = root.path().join("plain");
        let runnable = root.path().join("runnable");
        fs::write(&plain, "").unwrap();
        fs::write(&runnable, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&runnable, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(!is_executable(&plain));
        assert!(is_executable(&runnable));
        assert!(!is_executable(root.path()));
        assert!(!is_executable(&root.path().join("missing")));
    }

    #[test]
    fn test_launch_missing_target_fails() {
        let root = TempDir::new().unwrap();
        let candidate = Candidate {
            path: root.path().join("gone"),
            version: "1.0".to_string(),
            tokens: HashMap::new(),
            tags: Vec::new(),
        };
        let err = launch(&candidate, &[]).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
