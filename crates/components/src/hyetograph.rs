//! Synthetic triangular design storms.
//!
//! Rainfall intensity rises linearly from zero at the start of the storm to a
//! peak, then falls linearly back to zero at the end:
//!
//! ```text
//!   i ▲
//! i_p │    ╱╲
//!     │   ╱   ╲
//!     │  ╱      ╲
//!     │ ╱         ╲
//!     └─┴──┴────────┴──▶ t
//!       0  t_p       D
//! ```
//!
//! The time to peak `t_p` is the catchment's time of concentration, capped at
//! half the storm so the rising limb never exceeds half of it. The peak
//! intensity `i_p = 2·P / D` makes the area under the triangle equal the
//! total depth `P`.

use serde::{Deserialize, Serialize};
use uom::{
    ConstZero,
    si::{
        f64::{Length, Time},
        length::millimeter,
        time::hour,
    },
};

use crate::StormSpec;

/// Default floor for the falling-limb duration, in hours.
pub const DEFAULT_FALLING_LIMB_FLOOR_HOURS: f64 = 1e-4;

/// How per-timestep depths are taken from the triangular intensity curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Intensity at the midpoint of each interval times the interval length.
    ///
    /// Matches the triangle's area exactly only when the peak falls on an
    /// interval boundary.
    #[default]
    Midpoint,

    /// Exact area under the triangle within each interval.
    ///
    /// Depths always add up to the storm's total depth.
    Integrated,
}

/// Generator for triangular hyetographs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangularStorm {
    pub sampling: Sampling,
    /// Smallest falling-limb duration used as a divisor.
    pub falling_limb_floor: Time,
}

impl Default for TriangularStorm {
    fn default() -> Self {
        Self {
            sampling: Sampling::default(),
            falling_limb_floor: Time::new::<hour>(DEFAULT_FALLING_LIMB_FLOOR_HOURS),
        }
    }
}

/// Rainfall depth per timestep of a design storm.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyetograph {
    depths: Vec<Length>,
    timestep: Time,
    peak_time: Time,
}

impl Hyetograph {
    /// Depth of rain falling in each timestep, in timestep order.
    #[must_use]
    pub fn depths(&self) -> &[Length] {
        &self.depths
    }

    /// Depths in millimetres.
    #[must_use]
    pub fn depths_mm(&self) -> Vec<f64> {
        self.depths.iter().map(|d| d.get::<millimeter>()).collect()
    }

    #[must_use]
    pub fn timestep(&self) -> Time {
        self.timestep
    }

    /// Time at which intensity peaks.
    #[must_use]
    pub fn peak_time(&self) -> Time {
        self.peak_time
    }

    /// Sum of all timestep depths.
    #[must_use]
    pub fn total_depth(&self) -> Length {
        self.depths
            .iter()
            .fold(Length::ZERO, |total, &depth| total + depth)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

impl TriangularStorm {
    /// Generates the hyetograph for a storm peaking at the time of concentration.
    ///
    /// Produces exactly one depth per storm timestep. Every depth is
    /// non-negative, and a storm with zero total depth yields all zeros.
    #[must_use]
    pub fn generate(&self, storm: &StormSpec, time_of_concentration: Time) -> Hyetograph {
        let duration = storm.duration().get::<hour>();
        let timestep = storm.timestep_duration().get::<hour>();
        let total = storm.total_depth().get::<millimeter>();

        let triangle = Triangle {
            duration,
            peak_time: time_of_concentration
                .get::<hour>()
                .min(0.5 * duration)
                .max(0.0),
            peak_intensity: 2.0 * total / duration,
            falling_limb: self.falling_limb_floor.get::<hour>(),
        };

        let depths = (0..storm.timesteps().get())
            .map(|step| {
                #[allow(clippy::cast_precision_loss)]
                let start = step as f64 * timestep;
                let depth = match self.sampling {
                    Sampling::Midpoint => triangle.midpoint_depth(start, timestep),
                    Sampling::Integrated => triangle.integrated_depth(start, timestep),
                };
                Length::new::<millimeter>(depth)
            })
            .collect();

        Hyetograph {
            depths,
            timestep: storm.timestep_duration(),
            peak_time: Time::new::<hour>(triangle.peak_time),
        }
    }
}

/// Triangle parameters in hours, mm, and mm/h.
struct Triangle {
    duration: f64,
    peak_time: f64,
    peak_intensity: f64,
    falling_limb: f64,
}

impl Triangle {
    /// Falling-limb duration, floored to keep the division finite.
    fn fall(&self) -> f64 {
        (self.duration - self.peak_time).max(self.falling_limb)
    }

    /// Fraction of peak intensity at time `t`, clamped at zero.
    fn factor(&self, t: f64) -> f64 {
        let factor = if t <= self.peak_time {
            t / self.peak_time
        } else {
            (self.duration - t) / self.fall()
        };
        factor.max(0.0)
    }

    fn midpoint_depth(&self, start: f64, timestep: f64) -> f64 {
        self.peak_intensity * self.factor(start + 0.5 * timestep) * timestep
    }

    fn integrated_depth(&self, start: f64, timestep: f64) -> f64 {
        (self.cumulative(start + timestep) - self.cumulative(start)).max(0.0)
    }

    /// Depth fallen between the start of the storm and time `t`.
    fn cumulative(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, self.duration);
        let p = self.peak_intensity;

        if t <= self.peak_time {
            if self.peak_time <= 0.0 {
                return 0.0;
            }
            return p * t * t / (2.0 * self.peak_time);
        }

        let rising = p * self.peak_time / 2.0;
        let remaining_at_peak = self.duration - self.peak_time;
        let remaining = self.duration - t;
        let falling = remaining_at_peak * remaining_at_peak - remaining * remaining;
        rising + p * falling / (2.0 * self.fall())
    }
}
