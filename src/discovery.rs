// src/discovery.rs
//! Source-tree enumeration and ecosystem detection.

use crate::ecosystem::Ecosystem;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Enumerates candidate source files under `root` for an ecosystem.
///
/// Depth-first walk pruning the per-ecosystem deny-list. Unreadable
/// directories and broken links are counted and skipped; a single bad
/// subtree never aborts the scan. An unreadable root yields an empty list.
#[must_use]
pub fn enumerate_files(root: &Path, ecosystem: Ecosystem) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(move |entry| !should_prune(entry, ecosystem));

    let mut paths = Vec::new();
    let mut errors = 0usize;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), ecosystem) {
                    paths.push(entry.into_path());
                }
            }
            Err(_) => errors += 1,
        }
    }

    if errors > 0 {
        eprintln!(
            "WARN: skipped {errors} unreadable entries under {}",
            root.display()
        );
    }
    paths
}

fn has_extension(path: &Path, ecosystem: Ecosystem) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(ecosystem.source_extension()))
}

fn should_prune(entry: &walkdir::DirEntry, ecosystem: Ecosystem) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| ecosystem.prune_dirs().contains(&name))
}

/// Probes a directory tree for ecosystem build manifests, depth-first.
///
/// `.csproj`/`.sln` wins over `pom.xml`/`build.gradle` within a directory;
/// dot-directories are never descended into. Returns `None` when nothing
/// recognizable is found (including an unreadable root).
#[must_use]
pub fn detect_ecosystem(root: &Path) -> Option<Ecosystem> {
    let Ok(entries) = fs::read_dir(root) else {
        return None;
    };

    let mut subdirs = Vec::new();
    let mut names = Vec::new();
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if file_type.is_dir() {
            if !name.starts_with('.') {
                subdirs.push(entry.path());
            }
        } else {
            names.push(name);
        }
    }

    if names
        .iter()
        .any(|n| n.ends_with(".csproj") || n.ends_with(".sln"))
    {
        return Some(Ecosystem::DotNet);
    }
    if names.iter().any(|n| n == "pom.xml" || n == "build.gradle") {
        return Some(Ecosystem::Java);
    }

    subdirs.iter().find_map(|dir| detect_ecosystem(dir))
}
