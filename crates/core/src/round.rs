/// Rounds a value to the given number of decimal places.
///
/// Ties are rounded half away from zero, so `round_to(0.125, 2)` is `0.13`
/// and `round_to(-0.125, 2)` is `-0.13`. Non-finite values pass through.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.0, 2), 2.0);
        assert_eq!(round_to(0.61, 2), 0.61);
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(round_to(0.5, 0), 1.0);
        assert_eq!(round_to(-0.5, 0), -1.0);
        assert_eq!(round_to(2.25, 1), 2.3);
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }
}
