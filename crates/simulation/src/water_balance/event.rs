use stormflow_core::Snapshot;

use super::{StepInput, StepOutput};

/// Event emitted by the water balance after each timestep.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    /// Zero-based timestep index.
    pub step: usize,

    /// Input and output of this timestep.
    pub snapshot: Snapshot<StepInput, StepOutput>,
}
