// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Parses the lowercase wire form. Returns `None` for anything else.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete pattern match at a specific file/line, attributed to an
/// enclosing code unit by the backward-scan heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Path relative to the scan root, forward slashes.
    pub file: String,
    /// Heuristic enclosing unit (`Property: X`, `ClassLevel: X`, or `Unknown`).
    pub unit: String,
    /// 1-based line number.
    pub line: usize,
    /// The matched line, trimmed.
    pub code: String,
    pub category: String,
    pub severity: Severity,
    pub remediation: String,
}
