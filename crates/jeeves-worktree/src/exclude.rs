// SPDX-License-Identifier: MIT

//! Maintenance of `<worktreeDir>/.git/info/exclude`: append-only, with a
//! duplicate-line check so repeated reconciles (or another tool touching
//! the same file) never grow it unbounded.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

fn exclude_path(worktree_dir: &Path) -> std::path::PathBuf {
    worktree_dir.join(".git").join("info").join("exclude")
}

/// Ensure every pattern in `patterns` is present on its own line. Existing
/// lines are preserved in order; missing patterns are appended.
pub fn ensure_exclude_patterns(worktree_dir: &Path, patterns: &[String]) -> io::Result<()> {
    let path = exclude_path(worktree_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let existing = fs::read_to_string(&path).unwrap_or_default();
    let existing_lines: std::collections::HashSet<&str> = existing.lines().collect();

    let missing: Vec<&String> = patterns.iter().filter(|p| !existing_lines.contains(p.as_str())).collect();
    if missing.is_empty() {
        return Ok(());
    }

    let mut file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    for pattern in missing {
        writeln!(file, "{pattern}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "exclude_tests.rs"]
mod tests;
