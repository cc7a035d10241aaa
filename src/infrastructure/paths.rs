//! Path resolution following the XDG base directory conventions.
//!
//! `$XDG_CONFIG_HOME` and `$XDG_DATA_HOME` win when set to an absolute path;
//! otherwise the directories live under `$HOME`. Without a home directory the
//! current directory is used so the host still starts.

use std::env;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "provider-directory";

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").filter(|home| !home.is_empty()).map(PathBuf::from)
}

fn xdg_dir(variable: &str, fallback: &[&str]) -> PathBuf {
    if let Some(dir) = env::var_os(variable).map(PathBuf::from).filter(|dir| dir.is_absolute()) {
        return dir.join(APP_DIR);
    }
    let base = home_dir().unwrap_or_else(|| PathBuf::from("."));
    fallback.iter().fold(base, |path, part| path.join(part)).join(APP_DIR)
}

/// Returns the data directory, where trace files are written.
///
/// Resolves to `$XDG_DATA_HOME/provider-directory`, falling back to
/// `~/.local/share/provider-directory`.
#[must_use]
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// Returns the configuration directory holding `config.toml`.
///
/// Resolves to `$XDG_CONFIG_HOME/provider-directory`, falling back to
/// `~/.config/provider-directory`.
#[must_use]
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, and every path when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use provider_directory::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert_eq!(expand_tilde("relative/~"), PathBuf::from("relative/~"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = home_dir() else {
        return PathBuf::from(path);
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        Path::new(path).to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_paths_land_under_home() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/themes/dark.toml"), home.join("themes/dark.toml"));
        assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
    }

    #[test]
    fn directories_end_with_the_app_name() {
        assert!(data_dir().ends_with(APP_DIR));
        assert!(config_dir().ends_with(APP_DIR));
    }
}
