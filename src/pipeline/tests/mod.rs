//! Test modules for the pipeline
//!
//! Most tests run on a paused tokio clock so the 250 ms / 500 ms cadence
//! costs no wall time and interleavings are deterministic.

mod helpers;
