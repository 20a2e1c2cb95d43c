//! Time of concentration by the Kirpich formula.
//!
//! ```text
//! Tc [min] = 0.01947 × L^0.77 × S^-0.385
//! ```
//!
//! with `L` the flow path length in metres and `S` the slope in m/m.

use thiserror::Error;
use uom::si::{
    f64::{Length, Ratio, Time},
    length::meter,
    ratio::ratio,
    time::hour,
};

/// Metric Kirpich coefficient (minutes, metres).
pub const KIRPICH_COEFFICIENT: f64 = 0.01947;

/// Exponent applied to the flow path length.
pub const LENGTH_EXPONENT: f64 = 0.77;

/// Exponent applied to the slope.
pub const SLOPE_EXPONENT: f64 = -0.385;

/// Errors from inputs outside the formula's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConcentrationError {
    #[error("flow path length must be strictly positive")]
    NonPositiveLength,

    #[error("slope must be strictly positive")]
    NonPositiveSlope,
}

/// Estimates the time of concentration for a flow path.
///
/// # Errors
///
/// Returns a [`ConcentrationError`] if the length or slope is zero, negative,
/// or NaN. A zero slope would otherwise yield an infinite time.
pub fn kirpich(length: Length, slope: Ratio) -> Result<Time, ConcentrationError> {
    let length = length.get::<meter>();
    let slope = slope.get::<ratio>();

    if length.is_nan() || length <= 0.0 {
        return Err(ConcentrationError::NonPositiveLength);
    }
    if slope.is_nan() || slope <= 0.0 {
        return Err(ConcentrationError::NonPositiveSlope);
    }

    let minutes =
        KIRPICH_COEFFICIENT * length.powf(LENGTH_EXPONENT) * slope.powf(SLOPE_EXPONENT);

    Ok(Time::new::<hour>(minutes / 60.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn roadside_drain_concentrates_in_about_six_minutes() {
        let tc = kirpich(Length::new::<meter>(176.16), Ratio::new::<ratio>(0.01047)).unwrap();

        assert_relative_eq!(tc.get::<hour>(), 0.100_666_240_794_606, epsilon = 1e-9);
    }

    #[test]
    fn steeper_channels_concentrate_faster() {
        let length = Length::new::<meter>(500.0);
        let gentle = kirpich(length, Ratio::new::<ratio>(0.005)).unwrap();
        let steep = kirpich(length, Ratio::new::<ratio>(0.05)).unwrap();

        assert!(steep < gentle);
    }

    #[test]
    fn flat_or_negative_slopes_are_rejected() {
        let length = Length::new::<meter>(100.0);

        assert_eq!(
            kirpich(length, Ratio::new::<ratio>(0.0)),
            Err(ConcentrationError::NonPositiveSlope)
        );
        assert_eq!(
            kirpich(length, Ratio::new::<ratio>(-0.01)),
            Err(ConcentrationError::NonPositiveSlope)
        );
    }

    #[test]
    fn zero_length_is_rejected() {
        assert_eq!(
            kirpich(Length::new::<meter>(0.0), Ratio::new::<ratio>(0.01)),
            Err(ConcentrationError::NonPositiveLength)
        );
    }
}
