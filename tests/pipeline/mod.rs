//! Pipeline Integration Test Modules

pub mod handoff;
pub mod shutdown;
