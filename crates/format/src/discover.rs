//! Formatter executable discovery.
//!
//! Runs once at startup: an explicitly configured path wins when it exists
//! on disk, otherwise `$PATH` is searched for the tool's default binary
//! name, otherwise the slot stays empty (unavailable). The caller persists
//! the resolved paths so later lookups are amortized across runs.

use std::path::{Path, PathBuf};

use masthead_config::Config;

use crate::registry::TOOLS;

/// Resolve every formatter slot in place.
///
/// Returns true when any slot changed, in which case the settings should be
/// saved back.
pub fn resolve_formatter_paths(config: &mut Config) -> bool {
    let mut changed = false;

    for spec in TOOLS {
        let Some(slot) = config.formatters.get_mut(spec.tool) else {
            continue;
        };

        if !slot.exec.is_empty() && Path::new(&slot.exec).is_file() {
            continue;
        }

        let resolved = find_in_path(spec.default_binary)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        if slot.exec != resolved {
            slot.exec = resolved;
            changed = true;
        }
    }

    changed
}

/// Search the process's executable search path for a binary name.
pub fn find_in_path(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}
