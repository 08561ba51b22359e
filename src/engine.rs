// src/engine.rs
//! Orchestration: scan → parallel match → freeze → score → aggregate.

use crate::actions::{self, ActionReport, RemediationCatalog};
use crate::context::{ContextResolver, DEFAULT_METHOD_WINDOW};
use crate::discovery;
use crate::ecosystem::Ecosystem;
use crate::error::{EngineError, Result};
use crate::matcher;
use crate::rules::RuleRegistry;
use crate::scoring;
use crate::summary::{self, SummaryReport};
use crate::types::Finding;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// The detection-and-scoring engine.
///
/// Built once from an immutable registry and catalog, then shared by
/// read-only reference; per-file matching fans out across the rayon pool
/// with no locking.
pub struct Engine {
    registry: RuleRegistry,
    catalog: RemediationCatalog,
    method_window: usize,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub ecosystem: Ecosystem,
    pub complexity_factor: f64,
    pub findings: Vec<Finding>,
    pub summary: SummaryReport,
    pub actions: ActionReport,
}

impl Engine {
    #[must_use]
    pub fn new(registry: RuleRegistry, catalog: RemediationCatalog) -> Self {
        Self {
            registry,
            catalog,
            method_window: DEFAULT_METHOD_WINDOW,
        }
    }

    /// Overrides the context resolver's bounded method-scan window.
    #[must_use]
    pub fn with_method_window(mut self, lines: usize) -> Self {
        self.method_window = lines.max(1);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn catalog(&self) -> &RemediationCatalog {
        &self.catalog
    }

    /// Runs the full pipeline on a source tree.
    ///
    /// With no forced ecosystem the root is probed for build manifests.
    /// Per-file read failures reduce the finding count and log a warning;
    /// the aggregation passes only start once the flat finding list is
    /// complete, since their statistics depend on the whole set.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownEcosystem` when detection fails and no
    /// ecosystem was forced.
    pub fn analyze(&self, root: &Path, ecosystem: Option<Ecosystem>) -> Result<AnalysisOutcome> {
        let ecosystem = match ecosystem {
            Some(ecosystem) => ecosystem,
            None => discovery::detect_ecosystem(root)
                .ok_or_else(|| EngineError::UnknownEcosystem(root.to_path_buf()))?,
        };

        let files = discovery::enumerate_files(root, ecosystem);
        let patterns = self.registry.patterns(ecosystem);
        let resolver = ContextResolver::new(ecosystem).with_window(self.method_window);

        // Fan-out over files; collect is the barrier join and preserves
        // the enumeration order regardless of completion order.
        let findings: Vec<Finding> = files
            .par_iter()
            .flat_map_iter(|path| matcher::match_file(root, path, patterns, &resolver))
            .collect();

        let complexity_factor = scoring::complexity_factor(&findings, ecosystem);
        let summary = summary::summarize(&findings, complexity_factor, &self.catalog);
        let actions = actions::plan_actions(&findings, complexity_factor, &self.catalog);

        Ok(AnalysisOutcome {
            ecosystem,
            complexity_factor,
            findings,
            summary,
            actions,
        })
    }
}
