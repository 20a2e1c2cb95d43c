//! Runtime configuration for a simulation run.
//!
//! Every field has a default, so a scenario file only needs to name the values
//! it changes:
//!
//! ```toml
//! [config]
//! roughness = 0.013
//! balance = "continuity_ponding"
//! ```

use serde::{Deserialize, Serialize};
use stormflow_components::{
    ManningConveyance, Sampling, TriangularStorm, conveyance::DEFAULT_ROUGHNESS,
    hyetograph::DEFAULT_FALLING_LIMB_FLOOR_HOURS,
};
use thiserror::Error;
use uom::si::{f64::Time, time::hour};

/// Default share of the catchment assumed to pond surface water.
pub const DEFAULT_FLOOD_AREA_FACTOR: f64 = 0.2;

/// How runoff is split between the channel and the catchment surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalancePolicy {
    /// Fill the channel to capacity first, pond the excess, then drain the
    /// channel. Ponded water waits for the next timestep to re-enter.
    #[default]
    PartitionThenFill,

    /// Drain the channel from everything that can enter it, then pond
    /// whatever remains above capacity.
    ContinuityPonding,
}

/// Validated simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFile", into = "ConfigFile")]
pub struct SimulationConfig {
    conveyance: ManningConveyance,
    flood_area_factor: f64,
    storm: TriangularStorm,
    balance: BalancePolicy,
}

/// Errors that can occur when validating a [`SimulationConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("roughness must be finite and strictly positive")]
    Roughness,

    #[error("flood_area_factor must be greater than 0 and at most 1")]
    FloodAreaFactor,

    #[error("falling_limb_floor_hours must be finite and strictly positive")]
    FallingLimbFloor,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(
            DEFAULT_ROUGHNESS,
            DEFAULT_FLOOD_AREA_FACTOR,
            DEFAULT_FALLING_LIMB_FLOOR_HOURS,
        )
        .unwrap()
    }
}

impl SimulationConfig {
    /// Creates a config with validated numeric settings.
    ///
    /// Sampling and balance policy start at their defaults; see
    /// [`with_sampling`](Self::with_sampling) and
    /// [`with_balance`](Self::with_balance).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid setting.
    pub fn new(
        roughness: f64,
        flood_area_factor: f64,
        falling_limb_floor_hours: f64,
    ) -> Result<Self, ConfigError> {
        if !roughness.is_finite() {
            return Err(ConfigError::Roughness);
        }
        let conveyance = ManningConveyance::new(roughness).map_err(|_| ConfigError::Roughness)?;

        if flood_area_factor.is_nan() || flood_area_factor <= 0.0 || flood_area_factor > 1.0 {
            return Err(ConfigError::FloodAreaFactor);
        }

        if !falling_limb_floor_hours.is_finite() || falling_limb_floor_hours <= 0.0 {
            return Err(ConfigError::FallingLimbFloor);
        }

        Ok(Self {
            conveyance,
            flood_area_factor,
            storm: TriangularStorm {
                sampling: Sampling::default(),
                falling_limb_floor: Time::new::<hour>(falling_limb_floor_hours),
            },
            balance: BalancePolicy::default(),
        })
    }

    /// Returns this config with a different hyetograph sampling.
    #[must_use]
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.storm.sampling = sampling;
        self
    }

    /// Returns this config with a different water balance policy.
    #[must_use]
    pub fn with_balance(mut self, balance: BalancePolicy) -> Self {
        self.balance = balance;
        self
    }

    /// Manning conveyance with the configured roughness.
    #[must_use]
    pub fn conveyance(&self) -> ManningConveyance {
        self.conveyance
    }

    #[must_use]
    pub fn roughness(&self) -> f64 {
        self.conveyance.roughness()
    }

    /// Fraction of the catchment area over which surface water ponds.
    #[must_use]
    pub fn flood_area_factor(&self) -> f64 {
        self.flood_area_factor
    }

    /// Design storm generator with the configured sampling and floor.
    #[must_use]
    pub fn storm_generator(&self) -> TriangularStorm {
        self.storm
    }

    #[must_use]
    pub fn balance(&self) -> BalancePolicy {
        self.balance
    }
}

/// Serialized form of [`SimulationConfig`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    roughness: f64,
    flood_area_factor: f64,
    falling_limb_floor_hours: f64,
    sampling: Sampling,
    balance: BalancePolicy,
}

impl Default for ConfigFile {
    fn default() -> Self {
        SimulationConfig::default().into()
    }
}

impl TryFrom<ConfigFile> for SimulationConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        Ok(
            Self::new(file.roughness, file.flood_area_factor, file.falling_limb_floor_hours)?
                .with_sampling(file.sampling)
                .with_balance(file.balance),
        )
    }
}

impl From<SimulationConfig> for ConfigFile {
    fn from(config: SimulationConfig) -> Self {
        Self {
            roughness: config.roughness(),
            flood_area_factor: config.flood_area_factor,
            falling_limb_floor_hours: config.storm.falling_limb_floor.get::<hour>(),
            sampling: config.storm.sampling,
            balance: config.balance,
        }
    }
}
