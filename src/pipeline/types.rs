//! State and report types shared across the pipeline

use serde::Serialize;
use std::fmt;

/// Consumer lifecycle: `Running` -> `Draining` -> `Terminated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerState {
    Running,
    Draining,
    Terminated,
}

impl ConsumerState {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            ConsumerState::Running => 0,
            ConsumerState::Draining => 1,
            ConsumerState::Terminated => 2,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => ConsumerState::Running,
            1 => ConsumerState::Draining,
            _ => ConsumerState::Terminated,
        }
    }
}

impl fmt::Display for ConsumerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsumerState::Running => "running",
            ConsumerState::Draining => "draining",
            ConsumerState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Why the orchestrator stopped pulling from the input queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The exit condition held for a message
    ExitCondition,
    /// The host asked the process to stop
    HostShutdown,
}

/// What the consumer sank before terminating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerReport {
    /// Messages taken one at a time while running
    pub taken: usize,
    /// Messages sunk from the drain snapshot
    pub drained: usize,
}

impl ConsumerReport {
    pub fn sunk(&self) -> usize {
        self.taken + self.drained
    }
}

/// What the orchestrator forwarded before requesting cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrchestratorReport {
    /// Messages taken from input and forwarded to output
    pub processed: usize,
    pub stop_reason: StopReason,
}

/// Summary of one complete run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub processed: usize,
    pub taken: usize,
    pub drained: usize,
    /// Best-effort puts made after cancellation was requested
    pub late_puts: usize,
    pub stop_reason: StopReason,
}

impl PipelineReport {
    /// Total messages the sink received
    pub fn sunk(&self) -> usize {
        self.taken + self.drained
    }
}
