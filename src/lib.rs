pub mod actions;
pub mod context;
pub mod csv;
pub mod discovery;
pub mod ecosystem;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod rules;
pub mod scoring;
pub mod summary;
pub mod types;
