//! Hydrologic and hydraulic components for single-channel catchments.
//!
//! Each module is a self-contained calculation that the water balance
//! simulator composes:
//!
//! - [`land_use`]: area-weighted runoff coefficient for a catchment
//! - [`concentration`]: Kirpich time of concentration
//! - [`hyetograph`]: synthetic triangular design storm
//! - [`conveyance`]: Manning discharge for a rectangular channel
//! - [`severity`]: flood severity rating from ponded water depth
//! - [`channel`] and [`storm`]: validated geometry and storm descriptions

pub mod channel;
pub mod concentration;
pub mod conveyance;
pub mod hyetograph;
pub mod land_use;
pub mod severity;
pub mod storm;

pub use channel::{ChannelConfig, ChannelGeometry};
pub use concentration::{ConcentrationError, kirpich};
pub use conveyance::ManningConveyance;
pub use hyetograph::{Hyetograph, Sampling, TriangularStorm};
pub use land_use::{Catchment, LandUseAllocation, LandUseError, RunoffCoefficient};
pub use severity::FloodSeverity;
pub use storm::{StormConfig, StormSpec};
