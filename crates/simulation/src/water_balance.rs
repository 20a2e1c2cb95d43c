//! Timestep water balance coupling catchment runoff to channel conveyance.
//!
//! Each timestep runs the same transition on the state left by the previous
//! one:
//!
//! ```text
//! runoff   = C × rainfall × catchment_area
//! incoming = runoff + channel_storage + surface_storage
//! channel  = min(incoming, channel_capacity)      surface = incoming − channel
//! outflow  = min(manning(flow_depth(channel)) × Δt, channel)
//! channel  = channel − outflow
//! depth    = surface / (catchment_area × flood_area_factor)
//! ```
//!
//! This is the [`BalancePolicy::PartitionThenFill`] policy.
//! [`BalancePolicy::ContinuityPonding`] drains the channel before deciding
//! how much water ponds. Both keep `0 ≤ channel ≤ capacity` and
//! `surface ≥ 0` after every step.
//!
//! The transition is a [`Model`], and [`WaterBalance::simulate`] drives it
//! across a rainfall series, emitting an [`Event`] per step.

mod event;
mod solution;

pub use event::Event;
pub use solution::Solution;

use std::convert::Infallible;

use stormflow_components::{ChannelGeometry, ManningConveyance, RunoffCoefficient};
use stormflow_core::{Model, Observer, Snapshot, round_to};
use tracing::{debug, info, warn};
use uom::{
    ConstZero,
    si::{
        area::square_meter,
        f64::{Area, Length, Time, Volume},
        volume::cubic_meter,
    },
};

use crate::{BalancePolicy, SimulationConfig};

/// Water held in the system between timesteps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Water in the channel, never above its capacity.
    pub channel_storage: Volume,

    /// Water ponded on the catchment surface.
    pub surface_storage: Volume,
}

impl SimulationState {
    /// No stored water, the state at the start of every run.
    pub const EMPTY: Self = Self {
        channel_storage: Volume::ZERO,
        surface_storage: Volume::ZERO,
    };
}

/// Input to one water balance step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    /// State left by the previous step.
    pub state: SimulationState,

    /// Rain depth falling during this step.
    pub rainfall: Length,
}

/// Result of one water balance step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    /// State after this step's update.
    pub state: SimulationState,

    /// Runoff generated by this step's rainfall.
    pub runoff: Volume,

    /// Depth used to evaluate Manning conveyance.
    pub flow_depth: Length,

    /// Volume conveyed out of the channel.
    pub outflow: Volume,

    /// Ponded water depth in millimetres, rounded to 2 decimals.
    pub water_depth_mm: f64,
}

/// Single-channel water balance for one catchment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterBalance {
    channel: ChannelGeometry,
    catchment_area: Area,
    runoff_coefficient: RunoffCoefficient,
    conveyance: ManningConveyance,
    flood_area: Area,
    timestep: Time,
    policy: BalancePolicy,
}

impl WaterBalance {
    /// Creates a water balance for a catchment draining into `channel`.
    #[must_use]
    pub fn new(
        channel: ChannelGeometry,
        catchment_area: Area,
        runoff_coefficient: RunoffCoefficient,
        timestep: Time,
        config: &SimulationConfig,
    ) -> Self {
        Self {
            channel,
            catchment_area,
            runoff_coefficient,
            conveyance: config.conveyance(),
            flood_area: catchment_area * config.flood_area_factor(),
            timestep,
            policy: config.balance(),
        }
    }

    #[must_use]
    pub fn channel(&self) -> &ChannelGeometry {
        &self.channel
    }

    /// Area over which ponded water spreads.
    #[must_use]
    pub fn flood_area(&self) -> Area {
        self.flood_area
    }

    #[must_use]
    pub fn policy(&self) -> BalancePolicy {
        self.policy
    }

    /// Runs the balance over a rainfall series, one step per depth.
    ///
    /// Steps run strictly in order from [`SimulationState::EMPTY`]; every
    /// depth produces exactly one snapshot. The observer sees each step as it
    /// completes but cannot stop the run.
    pub fn simulate<Obs>(&self, rainfall: &[Length], mut observer: Obs) -> Solution
    where
        Obs: Observer<Event, Infallible>,
    {
        info!(
            timesteps = rainfall.len(),
            policy = ?self.policy,
            capacity_m3 = self.channel.max_storage_volume().get::<cubic_meter>(),
            "starting water balance"
        );

        let mut history = Vec::with_capacity(rainfall.len());
        let mut state = SimulationState::EMPTY;
        let mut overtopped = false;

        for (step, &rainfall) in rainfall.iter().enumerate() {
            let input = StepInput { state, rainfall };
            let Ok(output) = self.call(&input);

            debug!(
                step,
                runoff_m3 = output.runoff.get::<cubic_meter>(),
                channel_m3 = output.state.channel_storage.get::<cubic_meter>(),
                surface_m3 = output.state.surface_storage.get::<cubic_meter>(),
                outflow_m3 = output.outflow.get::<cubic_meter>(),
                water_depth_mm = output.water_depth_mm,
                "water balance step"
            );

            if !overtopped && output.state.surface_storage > Volume::ZERO {
                overtopped = true;
                warn!(step, "channel capacity exceeded; surface ponding begins");
            }

            let snapshot = Snapshot::new(input, output);
            let _ = observer.observe(&Event { step, snapshot });

            state = output.state;
            history.push(snapshot);
        }

        let solution = Solution { history };
        info!(
            peak_water_depth_mm = solution.peak_water_depth_mm(),
            "water balance complete"
        );
        solution
    }

    /// Runs the balance without observation.
    pub fn simulate_unobserved(&self, rainfall: &[Length]) -> Solution {
        self.simulate(rainfall, ())
    }

    fn runoff(&self, rainfall: Length) -> Volume {
        rainfall * self.catchment_area * self.runoff_coefficient.into_inner()
    }

    fn partition_then_fill(&self, incoming: Volume) -> (SimulationState, Length, Volume) {
        let capacity = self.channel.max_storage_volume();
        let channel_storage = incoming.min(capacity);
        let surface_storage = incoming - channel_storage;

        let flow_depth = self.channel.flow_depth(channel_storage);
        let outflow = self
            .conveyance
            .outflow_volume(&self.channel, flow_depth, self.timestep)
            .min(channel_storage);

        let state = SimulationState {
            channel_storage: channel_storage - outflow,
            surface_storage,
        };
        (state, flow_depth, outflow)
    }

    fn continuity_ponding(&self, incoming: Volume) -> (SimulationState, Length, Volume) {
        let capacity = self.channel.max_storage_volume();
        let held = incoming.min(capacity);

        let flow_depth = self.channel.flow_depth(held);
        let outflow = self
            .conveyance
            .outflow_volume(&self.channel, flow_depth, self.timestep)
            .min(held);

        let remaining = incoming - outflow;
        let channel_storage = remaining.min(capacity);
        let state = SimulationState {
            channel_storage,
            surface_storage: remaining - channel_storage,
        };
        (state, flow_depth, outflow)
    }

    /// Ponded depth in millimetres, rounded to 2 decimals.
    fn water_depth_mm(&self, surface_storage: Volume) -> f64 {
        let depth_m =
            surface_storage.get::<cubic_meter>() / self.flood_area.get::<square_meter>();
        round_to(depth_m * 1000.0, 2)
    }
}

impl Model for WaterBalance {
    type Input = StepInput;
    type Output = StepOutput;
    type Error = Infallible;

    fn call(&self, input: &StepInput) -> Result<StepOutput, Infallible> {
        let StepInput { state, rainfall } = *input;

        let runoff = self.runoff(rainfall);
        let incoming = runoff + state.channel_storage + state.surface_storage;

        let (state, flow_depth, outflow) = match self.policy {
            BalancePolicy::PartitionThenFill => self.partition_then_fill(incoming),
            BalancePolicy::ContinuityPonding => self.continuity_ponding(incoming),
        };

        Ok(StepOutput {
            state,
            runoff,
            flow_depth,
            outflow,
            water_depth_mm: self.water_depth_mm(state.surface_storage),
        })
    }
}
