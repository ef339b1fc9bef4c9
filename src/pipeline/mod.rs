//! Producer -> transform -> consumer pipeline
//!
//! Three execution units cooperate through two [`HandoffQueue`]s:
//!
//! ```text
//! ┌───────────┐  put  ┌─────────┐ take ┌──────────────┐ put ┌──────────┐ take ┌──────────┐
//! │ Generator │──────▶│  input  │─────▶│ Orchestrator │────▶│  output  │─────▶│ Consumer │
//! └───────────┘       └─────────┘      └──────┬───────┘     └──────────┘      └────▲─────┘
//!   detached,                                 │          cancel (one-shot)         │
//!   never joined                              └────────────────────────────────────┘
//! ```
//!
//! Shutdown is asymmetric. The orchestrator stops on its exit condition and
//! cancels the consumer, which drains the output queue once and terminates.
//! The generator is simply abandoned. Messages put to the output queue after
//! the consumer's drain snapshot are dropped; that race is accepted.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use drainpipe::core::shutdown::CancellationSignal;
//! use drainpipe::pipeline::api::{MemorySink, Pipeline, PipelineSettings};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(PipelineSettings::default())?;
//! let sink = Arc::new(MemorySink::new());
//!
//! let report = pipeline.run(sink.clone(), &CancellationSignal::new()).await?;
//! assert!(report.sunk() >= 6);
//! # Ok(())
//! # }
//! ```
//!
//! [`HandoffQueue`]: crate::queue::HandoffQueue

pub mod api;
mod collaborators;
mod consumer;
mod error;
mod generator;
mod orchestrator;
mod runner;
mod settings;
mod traits;
mod types;

pub use error::{PipelineError, PipelineResult};

#[cfg(test)]
mod tests;
