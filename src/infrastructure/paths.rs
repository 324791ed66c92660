//! Sandbox path helpers.

use std::path::PathBuf;

/// Returns the plugin's data directory.
///
/// Resolves to `/host/.local/share/zellij/cinescout`. `/host` is the cwd of
/// the last focused terminal (usually the home directory), so on the host
/// this is typically `~/.local/share/zellij/cinescout`. The local trending
/// store and the trace file live here.
///
/// ```
/// use cinescout::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/cinescout"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("cinescout")
}

/// Maps a `~`-prefixed path to its sandbox location under `/host`.
///
/// Used for the `theme_file` option.
///
/// ```
/// use cinescout::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
