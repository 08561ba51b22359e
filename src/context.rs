// src/context.rs
//! Heuristic attribution of a match to its enclosing code unit.
//!
//! Two phases: a bounded backward scan for a method/property declaration
//! (methods are expected to sit near their body), then an unbounded backward
//! scan for the enclosing class (which can be arbitrarily far above nested
//! content). The asymmetry is a design choice, not an oversight.

use crate::ecosystem::Ecosystem;
use regex::Regex;
use std::sync::LazyLock;

/// Default size of the bounded method-declaration window, in lines,
/// counting the match line itself.
pub const DEFAULT_METHOD_WINDOW: usize = 50;

/// Sentinel returned when no declaration is found anywhere above the match.
pub const UNKNOWN_UNIT: &str = "Unknown";

static DOTNET_METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:public|private|protected|internal)\s+(?:static\s+)?(?:async\s+)?[\w<>,\s]+\s+(\w+)\s*\(")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static DOTNET_PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:public|private|protected|internal)\s+(?:static\s+)?[\w<>,\s]+\s+(\w+)\s*\{")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static DOTNET_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:public|internal)\s+(?:partial\s+)?class\s+(\w+)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static JAVA_METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:public|private|protected)\s+(?:static\s+)?(?:synchronized\s+)?[\w<>,\[\]\s]+\s+(\w+)\s*\(")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static JAVA_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:public|)\s*class\s+(\w+)").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Resolves the enclosing method/property/class for a matched line.
///
/// Pure over its inputs: the same `(lines, index)` always yields the same
/// label, so resolution is safe to repeat and to run concurrently.
#[derive(Debug, Clone)]
pub struct ContextResolver {
    ecosystem: Ecosystem,
    window: usize,
}

impl ContextResolver {
    #[must_use]
    pub fn new(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            window: DEFAULT_METHOD_WINDOW,
        }
    }

    /// Overrides the bounded method-scan window. Clamped to at least one
    /// line so the match line itself is always inspected.
    #[must_use]
    pub fn with_window(mut self, lines: usize) -> Self {
        self.window = lines.max(1);
        self
    }

    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Returns the enclosing unit label for the match at `lines[index]`.
    #[must_use]
    pub fn resolve(&self, lines: &[&str], index: usize) -> String {
        let index = index.min(lines.len().saturating_sub(1));
        if lines.is_empty() {
            return UNKNOWN_UNIT.to_string();
        }

        // Phase 1: bounded scan, nearest line first, starting at the match.
        for line in lines[..=index].iter().rev().take(self.window) {
            if let Some(unit) = self.match_declaration(line) {
                return unit;
            }
        }

        // Phase 2: unbounded scan for the nearest enclosing class.
        let class_re: &Regex = match self.ecosystem {
            Ecosystem::DotNet => &DOTNET_CLASS_RE,
            Ecosystem::Java => &JAVA_CLASS_RE,
        };
        for line in lines[..=index].iter().rev() {
            if let Some(captures) = class_re.captures(line) {
                return format!("ClassLevel: {}", &captures[1]);
            }
        }

        UNKNOWN_UNIT.to_string()
    }

    fn match_declaration(&self, line: &str) -> Option<String> {
        match self.ecosystem {
            Ecosystem::DotNet => {
                if let Some(captures) = DOTNET_METHOD_RE.captures(line) {
                    return Some(captures[1].to_string());
                }
                if let Some(captures) = DOTNET_PROPERTY_RE.captures(line) {
                    return Some(format!("Property: {}", &captures[1]));
                }
                None
            }
            Ecosystem::Java => {
                // The broad return-type charset also matches type declarations,
                // so lines introducing classes/interfaces are rejected outright.
                let captures = JAVA_METHOD_RE.captures(line)?;
                if line.contains("class") || line.contains("interface") {
                    return None;
                }
                Some(captures[1].to_string())
            }
        }
    }
}
