// src/ecosystem.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two supported source-code platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    #[value(name = "dotnet")]
    DotNet,
    #[value(name = "java")]
    Java,
}

impl Ecosystem {
    /// File extension scanned for this ecosystem.
    #[must_use]
    pub fn source_extension(self) -> &'static str {
        match self {
            Ecosystem::DotNet => ".cs",
            Ecosystem::Java => ".java",
        }
    }

    /// Directory names never descended into during the walk (build output,
    /// dependency caches, VCS/IDE metadata).
    #[must_use]
    pub fn prune_dirs(self) -> &'static [&'static str] {
        match self {
            Ecosystem::DotNet => &["node_modules", "bin", "obj", ".git", ".vs", "packages"],
            Ecosystem::Java => &["node_modules", "target", "build", ".git", ".idea", "out"],
        }
    }

    /// Additive contribution to the complexity factor. Java trees tend to
    /// carry more structural complexity per finding.
    #[must_use]
    pub fn complexity_weight(self) -> f64 {
        match self {
            Ecosystem::DotNet => 0.0,
            Ecosystem::Java => 0.1,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ecosystem::DotNet => write!(f, "dotnet"),
            Ecosystem::Java => write!(f, "java"),
        }
    }
}
