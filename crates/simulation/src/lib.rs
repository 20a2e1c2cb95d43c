//! Flood response of a catchment drained by a single open channel.
//!
//! A run turns a validated [`Parameters`] bundle into a [`Report`]:
//!
//! 1. The runoff source yields the catchment coefficient and area.
//! 2. The Kirpich formula yields the time of concentration.
//! 3. A triangular design storm yields rainfall depth per timestep.
//! 4. The [`WaterBalance`] routes runoff through the channel, one timestep at
//!    a time, and reports ponded water depth.
//! 5. The [`report`] module packages per-step records and summary metrics.
//!
//! ```
//! use stormflow_simulation::{Scenario, run};
//!
//! let scenario = Scenario::from_toml_str(r#"
//!     [storm]
//!     total_depth_mm = 100.0
//!     duration_hours = 3.0
//!     timesteps = 6
//!
//!     [channel]
//!     length_m = 176.16
//!     width_m = 0.3045
//!     height_m = 0.33
//!     slope = 0.01047
//!
//!     [runoff]
//!     coefficient = 0.61
//!     area_m2 = 19274.25
//! "#).unwrap();
//!
//! let report = run(&scenario.parameters().unwrap()).unwrap();
//! assert_eq!(report.records.len(), 6);
//! ```

pub mod config;
pub mod report;
mod run;
pub mod scenario;
pub mod water_balance;

pub use config::{BalancePolicy, ConfigError, SimulationConfig};
pub use report::{Report, SimulationSummary, TimestepRecord};
pub use run::{SimulationError, run, run_observed};
pub use scenario::{Parameters, RunoffSource, Scenario, ScenarioError};
pub use water_balance::{SimulationState, WaterBalance};
