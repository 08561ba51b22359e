// src/matcher.rs
//! Per-line application of compiled patterns to a single file.

use crate::context::ContextResolver;
use crate::rules::Pattern;
use crate::types::Finding;
use std::fs;
use std::path::Path;

/// Scans one file against the compiled patterns.
///
/// A read failure yields zero findings for that file and a stderr warning;
/// it never aborts the batch. Touches no shared mutable state, so per-file
/// calls are safe to fan out across worker threads.
#[must_use]
pub fn match_file(
    root: &Path,
    path: &Path,
    patterns: &[Pattern],
    resolver: &ContextResolver,
) -> Vec<Finding> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("WARN: could not read {}: {e}", path.display());
            return Vec::new();
        }
    };
    scan_lines(&relative_display(root, path), &content, patterns, resolver)
}

/// Matches every pattern against every line of `content`.
///
/// A line may hit zero, one, or several patterns; each hit produces its own
/// finding (no per-line dedup). Matching is purely textual: comments and
/// string literals are indistinguishable from code.
#[must_use]
pub fn scan_lines(
    file: &str,
    content: &str,
    patterns: &[Pattern],
    resolver: &ContextResolver,
) -> Vec<Finding> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut findings = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        for pattern in patterns {
            if pattern.is_match(line) {
                findings.push(Finding {
                    file: file.to_string(),
                    unit: resolver.resolve(&lines, index),
                    line: index + 1,
                    code: line.trim().to_string(),
                    category: pattern.category.clone(),
                    severity: pattern.severity,
                    remediation: pattern.remediation.clone(),
                });
            }
        }
    }
    findings
}

/// Root-relative path with forward slashes (cross-platform report output).
fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
