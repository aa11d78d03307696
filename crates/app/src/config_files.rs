//! Config file discovery for the open-configs commands.
//!
//! Locates the user's shell startup files (honoring `$ZDOTDIR` for zsh) and
//! the masthead settings, template and configured extra folders. Only paths
//! that exist are returned; opening is the host's job.

use std::path::PathBuf;

use anyhow::Result;

use masthead_config::Config;

/// Existing shell startup files: zshrc/zshenv from `$ZDOTDIR` (or the home
/// directory), plus bashrc and bash_profile from the home directory.
pub fn shell_config_files() -> Vec<PathBuf> {
    let home = dirs::home_dir();
    let zsh_base = std::env::var("ZDOTDIR")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.clone());

    let mut candidates = Vec::new();
    if let Some(base) = zsh_base {
        candidates.push(base.join(".zshrc"));
        candidates.push(base.join(".zshenv"));
    }
    if let Some(home) = home {
        candidates.push(home.join(".bashrc"));
        candidates.push(home.join(".bash_profile"));
    }

    candidates.into_iter().filter(|p| p.exists()).collect()
}

/// The masthead settings file, header template file, and any configured
/// folders that exist on disk.
pub fn editor_config_files(config: &Config) -> Result<Vec<PathBuf>> {
    let mut paths = vec![Config::config_file_path()?, Config::template_file_path()?];
    paths.extend(config.general.folders_to_open.iter().map(PathBuf::from));
    Ok(paths.into_iter().filter(|p| p.exists()).collect())
}
