//! CLI Integration Test Modules

pub mod binary_runs;
pub mod toml_config;
