use stormflow_core::Snapshot;

use super::{StepInput, StepOutput};

/// The result of running a water balance over a rainfall series.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// One snapshot per timestep, in order.
    pub history: Vec<Snapshot<StepInput, StepOutput>>,
}

impl Solution {
    /// Ponded water depth per timestep, in millimetres.
    #[must_use]
    pub fn water_depths_mm(&self) -> Vec<f64> {
        self.history
            .iter()
            .map(|snapshot| snapshot.output.water_depth_mm)
            .collect()
    }

    /// Largest ponded depth reached, or zero for an empty run.
    #[must_use]
    pub fn peak_water_depth_mm(&self) -> f64 {
        self.history
            .iter()
            .map(|snapshot| snapshot.output.water_depth_mm)
            .fold(0.0, f64::max)
    }

    /// Final state, or `None` for an empty run.
    #[must_use]
    pub fn final_state(&self) -> Option<super::SimulationState> {
        self.history.last().map(|snapshot| snapshot.output.state)
    }
}
