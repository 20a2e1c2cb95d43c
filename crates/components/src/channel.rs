//! Rectangular open-channel geometry.
//!
//! The channel stores water as a prism over its bed:
//!
//! ```text
//! capacity   = length × width × height
//! flow depth = min(storage / (length × width), height)
//! ```

use stormflow_core::constraint::{Constrained, ConstraintError, StrictlyPositive};
use uom::si::f64::{Area, Length, Ratio, Volume};

/// A rectangular open channel draining the catchment.
///
/// The geometry is fixed for a run. Every dimension and the bed slope are
/// strictly positive, which keeps the Kirpich and Manning formulas finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelGeometry {
    length: Constrained<Length, StrictlyPositive>,
    width: Constrained<Length, StrictlyPositive>,
    height: Constrained<Length, StrictlyPositive>,
    slope: Constrained<Ratio, StrictlyPositive>,
}

/// Unvalidated channel dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    pub length: Length,
    pub width: Length,
    pub height: Length,
    /// Bed slope as a dimensionless rise over run (m/m).
    pub slope: Ratio,
}

impl ChannelGeometry {
    /// Creates a channel from its dimensions.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if any dimension or the slope is not
    /// strictly positive.
    pub fn new(config: ChannelConfig) -> Result<Self, ConstraintError> {
        let ChannelConfig {
            length,
            width,
            height,
            slope,
        } = config;

        Ok(Self {
            length: Constrained::new(length)?,
            width: Constrained::new(width)?,
            height: Constrained::new(height)?,
            slope: Constrained::new(slope)?,
        })
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length.into_inner()
    }

    #[must_use]
    pub fn width(&self) -> Length {
        self.width.into_inner()
    }

    #[must_use]
    pub fn height(&self) -> Length {
        self.height.into_inner()
    }

    #[must_use]
    pub fn slope(&self) -> Ratio {
        self.slope.into_inner()
    }

    /// Bed area of the channel (`length × width`).
    #[must_use]
    pub fn plan_area(&self) -> Area {
        self.length() * self.width()
    }

    /// Volume the channel holds when full (`length × width × height`).
    #[must_use]
    pub fn max_storage_volume(&self) -> Volume {
        self.plan_area() * self.height()
    }

    /// Uniform flow depth for a stored volume, capped at the channel height.
    #[must_use]
    pub fn flow_depth(&self, storage: Volume) -> Length {
        let depth: Length = storage / self.plan_area();
        depth.min(self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{length::meter, ratio::ratio, volume::cubic_meter};

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
    fn capacity_is_length_times_width_times_height() {
        assert_relative_eq!(
            drain().max_storage_volume().get::<cubic_meter>(),
            176.16 * 0.3045 * 0.33,
            epsilon = 1e-12
        );
    }

    #[test]
    fn flow_depth_is_capped_at_channel_height() {
        let channel = drain();
        let half_full = channel.max_storage_volume() * 0.5;
        let overfull = channel.max_storage_volume() * 3.0;

        assert_relative_eq!(channel.flow_depth(half_full).get::<meter>(), 0.165, epsilon = 1e-12);
        assert_relative_eq!(channel.flow_depth(overfull).get::<meter>(), 0.33, epsilon = 1e-12);
        assert_eq!(channel.flow_depth(Volume::new::<cubic_meter>(0.0)).get::<meter>(), 0.0);
    }

    #[test]
    fn rejects_flat_or_degenerate_channels() {
        let config = ChannelConfig {
            length: Length::new::<meter>(10.0),
            width: Length::new::<meter>(1.0),
            height: Length::new::<meter>(1.0),
            slope: Ratio::new::<ratio>(0.0),
        };
        assert_eq!(ChannelGeometry::new(config), Err(ConstraintError::Zero));

        let config = ChannelConfig {
            width: Length::new::<meter>(-1.0),
            slope: Ratio::new::<ratio>(0.01),
            ..config
        };
        assert_eq!(ChannelGeometry::new(config), Err(ConstraintError::Negative));
    }
}
