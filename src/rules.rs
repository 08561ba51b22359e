// src/rules.rs
//! Pattern catalog loading and compilation.
//!
//! The registry is built once, is immutable afterwards, and is shared by
//! read-only reference across concurrent file tasks. Catalog problems are
//! fatal at construction time; nothing downstream can run on a bad rule set.

use crate::ecosystem::Ecosystem;
use crate::error::{EngineError, Result};
use crate::types::Severity;
use regex::Regex;
use serde::Deserialize;

const BUILTIN_RULES: &str = include_str!("../rules/stateful-patterns.json");

#[derive(Debug, Deserialize)]
struct RuleFile {
    patterns: Vec<RuleRecord>,
}

#[derive(Debug, Deserialize)]
struct RuleRecord {
    id: String,
    language: Ecosystem,
    regex: String,
    #[serde(default)]
    exclude: Option<String>,
    category: String,
    severity: Severity,
    remediation: String,
}

/// A compiled textual matcher plus its classification metadata.
#[derive(Debug)]
pub struct Pattern {
    pub id: String,
    pub ecosystem: Ecosystem,
    pub matcher: Regex,
    /// Suppresses a hit when it also matches. Stands in for negative
    /// lookahead, which the regex engine does not support.
    pub exclude: Option<Regex>,
    pub category: String,
    pub severity: Severity,
    pub remediation: String,
}

impl Pattern {
    fn compile(record: RuleRecord) -> Result<Self> {
        let matcher = Regex::new(&record.regex).map_err(|source| EngineError::Pattern {
            id: record.id.clone(),
            source,
        })?;
        let exclude = match record.exclude {
            Some(raw) => Some(Regex::new(&raw).map_err(|source| EngineError::Pattern {
                id: record.id.clone(),
                source,
            })?),
            None => None,
        };
        Ok(Self {
            id: record.id,
            ecosystem: record.language,
            matcher,
            exclude,
            category: record.category,
            severity: record.severity,
            remediation: record.remediation,
        })
    }

    /// Tests one line of source text. Purely textual: a hit inside a comment
    /// or string literal is indistinguishable from code.
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        self.matcher.is_match(line)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(line))
    }
}

/// The compiled pattern catalog, split per ecosystem in catalog order.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    dotnet: Vec<Pattern>,
    java: Vec<Pattern>,
}

impl RuleRegistry {
    /// Compiles the catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Catalog` / `EngineError::Pattern` if the embedded
    /// catalog is malformed; that indicates a packaging defect.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_RULES)
    }

    /// Parses and compiles a rule catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Catalog` for invalid JSON or an empty pattern
    /// list, `EngineError::Pattern` for an uncompilable expression.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: RuleFile = serde_json::from_str(raw)
            .map_err(|e| EngineError::Catalog(format!("rule catalog: {e}")))?;
        if file.patterns.is_empty() {
            return Err(EngineError::Catalog(
                "rule catalog contains no patterns".to_string(),
            ));
        }

        let mut registry = Self::default();
        for record in file.patterns {
            let pattern = Pattern::compile(record)?;
            match pattern.ecosystem {
                Ecosystem::DotNet => registry.dotnet.push(pattern),
                Ecosystem::Java => registry.java.push(pattern),
            }
        }
        Ok(registry)
    }

    #[must_use]
    pub fn patterns(&self, ecosystem: Ecosystem) -> &[Pattern] {
        match ecosystem {
            Ecosystem::DotNet => &self.dotnet,
            Ecosystem::Java => &self.java,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dotnet.len() + self.java.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
