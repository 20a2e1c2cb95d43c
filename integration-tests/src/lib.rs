//! Shared fixtures for the end-to-end tests.

use stormflow_simulation::{Parameters, Scenario, ScenarioError};

/// The 100 mm design storm over the surveyed roadside drain.
pub const REFERENCE_DRAIN: &str = include_str!("../scenarios/reference_drain.toml");

/// A three-way land-use breakdown with non-default configuration.
pub const MIXED_LAND_USE: &str = include_str!("../scenarios/mixed_land_use.json");

/// Loads the reference drain scenario with a different storm.
///
/// # Errors
///
/// Returns a [`ScenarioError`] if the storm is invalid.
pub fn reference_drain_with_storm(
    total_depth_mm: f64,
    duration_hours: f64,
    timesteps: usize,
) -> Result<Parameters, ScenarioError> {
    let mut scenario = Scenario::from_toml_str(REFERENCE_DRAIN)?;
    scenario.storm.total_depth_mm = total_depth_mm;
    scenario.storm.duration_hours = duration_hours;
    scenario.storm.timesteps = timesteps;
    scenario.parameters()
}
