//! Common test utilities and helpers

pub mod pipeline_helpers;
