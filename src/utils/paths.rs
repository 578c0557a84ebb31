use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory name used under the platform config/data roots
pub const APP_DIR_NAME: &str = "tech-researcher";

/// Platform data directory for history, preferences and logs
///
/// - macOS: `~/Library/Application Support/tech-researcher/`
/// - Linux: `~/.local/share/tech-researcher/`
/// - Windows: `%APPDATA%\tech-researcher\`
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Location of the optional user config file, if the platform has a config root
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

/// Formats a path for display by replacing the home directory prefix with `~`
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use tech_researcher::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/.local/share/tech-researcher");
/// // Returns "~/.local/share/tech-researcher" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_name() {
        if let Some(path) = default_config_file() {
            assert!(path.ends_with("tech-researcher/config.toml"));
        }
    }

    #[test]
    fn test_format_path_with_tilde() {
        let path = PathBuf::from("/Users/testuser/.local/share/tech-researcher");
        let formatted = format_path_with_tilde_internal(&path, Some("/Users/testuser"));
        assert_eq!(formatted, "~/.local/share/tech-researcher");

        // Path not under home
        let path2 = PathBuf::from("/opt/local/bin");
        let formatted2 = format_path_with_tilde_internal(&path2, Some("/Users/testuser"));
        assert_eq!(formatted2, "/opt/local/bin");
    }

    #[test]
    fn test_format_path_with_empty_home() {
        let path = PathBuf::from("/var/data");
        assert_eq!(format_path_with_tilde_internal(&path, Some("")), "/var/data");
    }
}
