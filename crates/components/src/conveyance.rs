//! Open-channel conveyance by the Manning equation.
//!
//! For a rectangular section of width `b` flowing at depth `y`:
//!
//! ```text
//! A = b·y        P = b + 2y        R = A / P
//! Q = (1/n) · A · R^(2/3) · √S
//! ```
//!
//! with `Q` in m³/s when lengths are in metres.

use stormflow_core::constraint::{Constrained, ConstraintError, StrictlyPositive};
use uom::{
    ConstZero,
    si::{
        f64::{Length, Ratio, Time, Volume, VolumeRate},
        length::meter,
        ratio::ratio,
        volume_rate::cubic_meter_per_second,
    },
};

use crate::ChannelGeometry;

/// Manning roughness representative of an earthen or concrete drain.
pub const DEFAULT_ROUGHNESS: f64 = 0.015;

/// Uniform-flow conveyance of a rectangular channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManningConveyance {
    roughness: Constrained<f64, StrictlyPositive>,
}

impl Default for ManningConveyance {
    fn default() -> Self {
        Self {
            // DEFAULT_ROUGHNESS is positive, unwrap is safe
            roughness: Constrained::new(DEFAULT_ROUGHNESS).unwrap(),
        }
    }
}

impl ManningConveyance {
    /// Creates a conveyance model with the given Manning roughness `n`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `roughness` is not strictly positive.
    pub fn new(roughness: f64) -> Result<Self, ConstraintError> {
        Ok(Self {
            roughness: Constrained::new(roughness)?,
        })
    }

    #[must_use]
    pub fn roughness(&self) -> f64 {
        self.roughness.into_inner()
    }

    /// Discharge through a rectangular section at the given flow depth.
    ///
    /// Returns zero when the depth is zero or negative.
    #[must_use]
    pub fn discharge(&self, width: Length, flow_depth: Length, slope: Ratio) -> VolumeRate {
        if flow_depth <= Length::ZERO {
            return VolumeRate::ZERO;
        }

        let width = width.get::<meter>();
        let depth = flow_depth.get::<meter>();

        let area = width * depth;
        let wetted_perimeter = width + 2.0 * depth;
        let hydraulic_radius = area / wetted_perimeter;

        let flow_rate = (1.0 / self.roughness())
            * area
            * hydraulic_radius.powf(2.0 / 3.0)
            * slope.get::<ratio>().sqrt();

        VolumeRate::new::<cubic_meter_per_second>(flow_rate)
    }

    /// Volume the channel conveys during one timestep at the given flow depth.
    ///
    /// Returns exactly zero when the depth is zero or negative.
    #[must_use]
    pub fn outflow_volume(
        &self,
        channel: &ChannelGeometry,
        flow_depth: Length,
        timestep: Time,
    ) -> Volume {
        if flow_depth <= Length::ZERO {
            return Volume::ZERO;
        }
        self.discharge(channel.width(), flow_depth, channel.slope()) * timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{time::hour, volume::cubic_meter};

    use crate::ChannelConfig;

    fn drain() -> ChannelGeometry {
        ChannelGeometry::new(ChannelConfig {
            length: Length::new::<meter>(176.16),
            width: Length::new::<meter>(0.3045),
            height: Length::new::<meter>(0.33),
            slope: Ratio::new::<ratio>(0.01047),
        })
        .unwrap()
    }

    #[test]
    fn no_depth_means_no_flow() {
        let manning = ManningConveyance::default();
        let channel = drain();
        let timestep = Time::new::<hour>(0.5);

        assert_eq!(
            manning.outflow_volume(&channel, Length::ZERO, timestep),
            Volume::ZERO
        );
        assert_eq!(
            manning.outflow_volume(&channel, Length::new::<meter>(-0.1), timestep),
            Volume::ZERO
        );
    }

    #[test]
    fn wide_channel_discharge_matches_hand_calculation() {
        // b = 2 m, y = 1 m: A = 2 m², P = 4 m, R = 0.5 m.
        let manning = ManningConveyance::default();
        let q = manning.discharge(
            Length::new::<meter>(2.0),
            Length::new::<meter>(1.0),
            Ratio::new::<ratio>(0.01),
        );
        let expected = 2.0 * 0.5_f64.powf(2.0 / 3.0) * 0.1 / 0.015;

        assert_relative_eq!(q.get::<cubic_meter_per_second>(), expected, epsilon = 1e-9);
        assert_relative_eq!(expected * 3600.0, 30_238.105_197_476_958, epsilon = 1e-6);
    }

    #[test]
    fn full_drain_passes_about_273_cubic_meters_per_half_hour() {
        let manning = ManningConveyance::default();
        let channel = drain();
        let volume =
            manning.outflow_volume(&channel, channel.height(), Time::new::<hour>(0.5));

        assert_relative_eq!(volume.get::<cubic_meter>(), 273.183_937_455_718_6, epsilon = 1e-6);
    }

    #[test]
    fn rougher_channels_convey_less() {
        let channel = drain();
        let depth = Length::new::<meter>(0.2);
        let timestep = Time::new::<hour>(1.0);

        let smooth = ManningConveyance::new(0.012).unwrap();
        let rough = ManningConveyance::new(0.035).unwrap();

        assert!(
            rough.outflow_volume(&channel, depth, timestep)
                < smooth.outflow_volume(&channel, depth, timestep)
        );
    }

    #[test]
    fn roughness_must_be_positive() {
        assert_eq!(ManningConveyance::new(0.0), Err(ConstraintError::Zero));
    }
}
