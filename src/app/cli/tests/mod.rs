//! Tests for the CLI module
//!
//! Argument parsing, TOML merging and configuration file loading.
