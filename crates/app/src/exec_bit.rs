//! Execution bit pass.
//!
//! After a save, a file whose text carries a shebang (`#!/...`) or a zsh
//! completion marker (`#compdef`) gets the owner rwx bits added, so scripts
//! are runnable straight out of the editor. Shell dotfiles are exempt: they
//! are sourced, never executed.

use std::path::Path;

use anyhow::Result;

/// Dotfiles that carry shebang-looking lines but must stay non-executable.
const IGNORED_BASENAMES: &[&str] = &[
    ".profile",
    ".bash_profile",
    ".bash_logout",
    ".bashrc",
    ".zshrc",
    ".zshenv",
    ".zlogin",
    ".zlogout",
];

/// Whether the saved text warrants the execution bit at all.
pub fn wants_execution_bit(path: &Path, text: &str) -> bool {
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if IGNORED_BASENAMES.contains(&basename.as_str()) {
        return false;
    }
    text.contains("#!/") || text.contains("#compdef")
}

/// Add owner rwx to the file's mode when the text warrants it.
///
/// Returns true when the bits were set. No-op on non-unix platforms.
#[cfg(unix)]
pub fn update_execution_bit(path: &Path, text: &str) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    if !wants_execution_bit(path, text) {
        return Ok(false);
    }

    let metadata = std::fs::metadata(path)?;
    let mode = metadata.permissions().mode() & 0o777;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode | 0o700))?;
    Ok(true)
}

#[cfg(not(unix))]
pub fn update_execution_bit(_path: &Path, _text: &str) -> Result<bool> {
    Ok(false)
}
