//! Scenario files and the validated parameter bundle a run consumes.
//!
//! A scenario describes one run in reporting units (mm, h, m, m²) and may be
//! written as TOML or JSON:
//!
//! ```toml
//! [storm]
//! total_depth_mm = 100.0
//! duration_hours = 3.0
//! timesteps = 6
//!
//! [channel]
//! length_m = 176.16
//! width_m = 0.3045
//! height_m = 0.33
//! slope = 0.01047
//!
//! [[runoff.land_use]]
//! label = "Residential"
//! coefficient = 0.5
//! area_m2 = 12000.0
//!
//! [[runoff.land_use]]
//! label = "Commercial"
//! coefficient = 0.85
//! area_m2 = 7274.25
//! ```
//!
//! A single `[runoff]` table with `coefficient` and `area_m2` may replace the
//! land-use list when no breakdown is available.

use serde::{Deserialize, Serialize};
use stormflow_components::{
    Catchment, ChannelConfig, ChannelGeometry, LandUseAllocation, LandUseError,
    RunoffCoefficient, StormConfig, StormSpec,
};
use stormflow_core::constraint::{
    Constrained, Constraint, ConstraintError, NonNegative, StrictlyPositive, UnitInterval,
};
use thiserror::Error;
use uom::si::{
    area::square_meter,
    f64::{Area, Length, Ratio, Time},
    length::{meter, millimeter},
    ratio::ratio,
    time::hour,
};

use crate::SimulationConfig;

/// Errors raised while reading or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid {field}: {source}")]
    Invalid {
        field: &'static str,
        source: ConstraintError,
    },

    #[error("invalid land use `{label}`: {source}")]
    LandUseEntry {
        label: String,
        source: ConstraintError,
    },

    #[error(transparent)]
    LandUse(#[from] LandUseError),

    #[error("failed to parse TOML scenario: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON scenario: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized description of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub storm: StormSection,
    pub channel: ChannelSection,
    pub runoff: RunoffSection,
    #[serde(default)]
    pub config: SimulationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StormSection {
    pub total_depth_mm: f64,
    pub duration_hours: f64,
    pub timesteps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSection {
    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,
    pub slope: f64,
}

/// Either a land-use breakdown or a single catchment-wide coefficient.
///
/// Both forms reject unknown keys, so a misspelled key fails to parse
/// instead of being ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunoffSection {
    LandUse(LandUseTable),
    Fixed(FixedRunoff),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandUseTable {
    pub land_use: Vec<LandUseEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedRunoff {
    pub coefficient: f64,
    pub area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandUseEntry {
    pub label: String,
    pub coefficient: f64,
    pub area_m2: f64,
}

/// Where the runoff coefficient and catchment area come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RunoffSource {
    /// One coefficient applied to the whole catchment.
    Fixed {
        coefficient: RunoffCoefficient,
        area: Constrained<Area, StrictlyPositive>,
    },

    /// Area-weighted coefficient of a land-use breakdown.
    LandUse(Catchment),
}

impl RunoffSource {
    /// Creates a fixed-coefficient source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the coefficient is outside `[0, 1]` or
    /// the area is not strictly positive.
    pub fn fixed(coefficient: f64, area: Area) -> Result<Self, ConstraintError> {
        Ok(Self::Fixed {
            coefficient: Constrained::new(coefficient)?,
            area: Constrained::new(area)?,
        })
    }

    #[must_use]
    pub fn coefficient(&self) -> RunoffCoefficient {
        match self {
            Self::Fixed { coefficient, .. } => *coefficient,
            Self::LandUse(catchment) => catchment.runoff_coefficient(),
        }
    }

    /// Total catchment area.
    #[must_use]
    pub fn area(&self) -> Area {
        match self {
            Self::Fixed { area, .. } => area.into_inner(),
            Self::LandUse(catchment) => catchment.total_area(),
        }
    }
}

/// Validated inputs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub storm: StormSpec,
    pub channel: ChannelGeometry,
    pub runoff: RunoffSource,
    pub config: SimulationConfig,
}

impl Scenario {
    /// Parses a scenario from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Toml`] if the text is not a valid scenario.
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(text)?)
    }

    /// Parses a scenario from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Json`] if the text is not a valid scenario.
    pub fn from_json_str(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validates every field and builds the parameters for a run.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] naming the first invalid field.
    pub fn parameters(&self) -> Result<Parameters, ScenarioError> {
        Ok(Parameters {
            storm: self.storm.validate()?,
            channel: self.channel.validate()?,
            runoff: self.runoff.validate()?,
            config: self.config,
        })
    }
}

impl StormSection {
    fn validate(&self) -> Result<StormSpec, ScenarioError> {
        let total_depth = check::<NonNegative>("storm.total_depth_mm", self.total_depth_mm)?;
        let duration = check::<StrictlyPositive>("storm.duration_hours", self.duration_hours)?;
        if self.timesteps == 0 {
            return Err(invalid("storm.timesteps", ConstraintError::Zero));
        }

        StormSpec::new(StormConfig {
            total_depth: Length::new::<millimeter>(total_depth),
            duration: Time::new::<hour>(duration),
            timesteps: self.timesteps,
        })
        .map_err(|source| invalid("storm", source))
    }
}

impl ChannelSection {
    fn validate(&self) -> Result<ChannelGeometry, ScenarioError> {
        let length = check::<StrictlyPositive>("channel.length_m", self.length_m)?;
        let width = check::<StrictlyPositive>("channel.width_m", self.width_m)?;
        let height = check::<StrictlyPositive>("channel.height_m", self.height_m)?;
        let slope = check::<StrictlyPositive>("channel.slope", self.slope)?;

        ChannelGeometry::new(ChannelConfig {
            length: Length::new::<meter>(length),
            width: Length::new::<meter>(width),
            height: Length::new::<meter>(height),
            slope: Ratio::new::<ratio>(slope),
        })
        .map_err(|source| invalid("channel", source))
    }
}

impl RunoffSection {
    fn validate(&self) -> Result<RunoffSource, ScenarioError> {
        match self {
            Self::Fixed(FixedRunoff {
                coefficient,
                area_m2,
            }) => {
                let coefficient = check::<UnitInterval>("runoff.coefficient", *coefficient)?;
                let area = check::<StrictlyPositive>("runoff.area_m2", *area_m2)?;
                RunoffSource::fixed(coefficient, Area::new::<square_meter>(area))
                    .map_err(|source| invalid("runoff", source))
            }
            Self::LandUse(LandUseTable { land_use }) => {
                let allocations = land_use
                    .iter()
                    .map(|entry| {
                        finite(entry.area_m2)
                            .and_then(|area_m2| {
                                LandUseAllocation::new(
                                    entry.label.clone(),
                                    entry.coefficient,
                                    Area::new::<square_meter>(area_m2),
                                )
                            })
                            .map_err(|source| ScenarioError::LandUseEntry {
                                label: entry.label.clone(),
                                source,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(RunoffSource::LandUse(Catchment::new(allocations)?))
            }
        }
    }
}

fn invalid(field: &'static str, source: ConstraintError) -> ScenarioError {
    ScenarioError::Invalid { field, source }
}

/// Applies `C`, then rejects infinities that pass it.
fn check<C: Constraint<f64>>(field: &'static str, value: f64) -> Result<f64, ScenarioError> {
    C::check(&value)
        .and_then(|()| finite(value))
        .map_err(|source| invalid(field, source))
}

fn finite(value: f64) -> Result<f64, ConstraintError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConstraintError::NotFinite)
    }
}
