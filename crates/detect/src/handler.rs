//! Default directory handler lookup.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// File managers probed on `PATH` when `xdg-mime` gives no answer.
pub const FALLBACK_FILE_MANAGERS: &[&str] = &["caja", "thunar", "nemo", "nautilus"];

/// Name of the system's default file manager, e.g. `"thunar"`.
pub fn default_file_manager() -> Option<String> {
    if let Some(name) = query_xdg_mime() {
        tracing::debug!(name, "default file manager from xdg-mime");
        return Some(name);
    }

    let path_var = std::env::var_os("PATH").unwrap_or_default();
    fallback_file_manager(&path_var)
}

fn query_xdg_mime() -> Option<String> {
    let output = Command::new("xdg-mime")
        .args(["query", "default", "inode/directory"])
        .output()
        .map_err(|e| tracing::debug!(error = %e, "xdg-mime unavailable"))
        .ok()?;

    if !output.status.success() {
        return None;
    }
    parse_xdg_mime_output(&String::from_utf8_lossy(&output.stdout))
}

/// Turn `xdg-mime` output such as `"thunar.desktop\n"` into `"thunar"`.
pub fn parse_xdg_mime_output(output: &str) -> Option<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.strip_suffix(".desktop") {
        Some(stem) => {
            let name = stem.rsplit_once('/').map(|(_, name)| name).unwrap_or(stem);
            (!name.is_empty()).then(|| name.to_string())
        }
        None => Some(trimmed.to_string()),
    }
}

/// First of [`FALLBACK_FILE_MANAGERS`] installed on the given search path.
pub fn fallback_file_manager(path_var: &OsStr) -> Option<String> {
    FALLBACK_FILE_MANAGERS
        .iter()
        .find(|name| find_program_in_path(name, path_var).is_some())
        .map(|name| name.to_string())
}

/// Locate an executable file named `program` in a `PATH`-style list.
pub fn find_program_in_path(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}
