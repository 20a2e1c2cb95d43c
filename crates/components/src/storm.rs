use std::num::NonZeroUsize;

use stormflow_core::constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive};
use uom::si::{
    f64::{Length, Time},
    length::millimeter,
    time::hour,
};

/// A design storm: total rainfall depth spread over a duration.
///
/// The storm is discretized into `timesteps` equal intervals. A zero total
/// depth is valid and models a dry run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormSpec {
    total_depth: Constrained<Length, NonNegative>,
    duration: Constrained<Time, StrictlyPositive>,
    timesteps: NonZeroUsize,
}

/// Unvalidated storm parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormConfig {
    pub total_depth: Length,
    pub duration: Time,
    pub timesteps: usize,
}

impl StormSpec {
    /// Creates a storm from its parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the depth is negative, the duration is
    /// not strictly positive, or the timestep count is zero.
    pub fn new(config: StormConfig) -> Result<Self, ConstraintError> {
        let StormConfig {
            total_depth,
            duration,
            timesteps,
        } = config;

        Ok(Self {
            total_depth: Constrained::new(total_depth)?,
            duration: Constrained::new(duration)?,
            timesteps: NonZeroUsize::new(timesteps).ok_or(ConstraintError::Zero)?,
        })
    }

    #[must_use]
    pub fn total_depth(&self) -> Length {
        self.total_depth.into_inner()
    }

    #[must_use]
    pub fn duration(&self) -> Time {
        self.duration.into_inner()
    }

    #[must_use]
    pub fn timesteps(&self) -> NonZeroUsize {
        self.timesteps
    }

    /// Length of one timestep (`duration / timesteps`).
    #[must_use]
    pub fn timestep_duration(&self) -> Time {
        #[allow(clippy::cast_precision_loss)]
        let count = self.timesteps.get() as f64;
        self.duration() / count
    }

    /// Mean rainfall intensity over the storm, in mm/h.
    #[must_use]
    pub fn average_intensity_mm_per_hour(&self) -> f64 {
        self.total_depth().get::<millimeter>() / self.duration().get::<hour>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn storm(depth_mm: f64, hours: f64, timesteps: usize) -> Result<StormSpec, ConstraintError> {
        StormSpec::new(StormConfig {
            total_depth: Length::new::<millimeter>(depth_mm),
            duration: Time::new::<hour>(hours),
            timesteps,
        })
    }

    #[test]
    fn timestep_duration_divides_the_storm_evenly() {
        let storm = storm(100.0, 3.0, 6).unwrap();
        assert_relative_eq!(storm.timestep_duration().get::<hour>(), 0.5);
        assert_relative_eq!(storm.average_intensity_mm_per_hour(), 100.0 / 3.0);
    }

    #[test]
    fn dry_storms_are_valid() {
        let storm = storm(0.0, 2.0, 4).unwrap();
        assert_eq!(storm.average_intensity_mm_per_hour(), 0.0);
    }

    #[test]
    fn invalid_storms_are_rejected() {
        assert_eq!(storm(-1.0, 3.0, 6), Err(ConstraintError::Negative));
        assert_eq!(storm(10.0, 0.0, 6), Err(ConstraintError::Zero));
        assert_eq!(storm(10.0, 3.0, 0), Err(ConstraintError::Zero));
    }
}
