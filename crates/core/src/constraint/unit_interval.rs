use super::{Constrained, Constraint, ConstraintError};

/// Types with well-defined lower and upper unit bounds.
pub trait UnitBounds: PartialOrd + Sized {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for f32 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

/// Marker type enforcing that a value lies in the closed unit interval: `0 ≤ x ≤ 1`.
///
/// Runoff coefficients and the ponding area fraction are constrained this way.
///
/// # Examples
///
/// ```
/// use stormflow_core::constraint::UnitInterval;
///
/// let c = UnitInterval::new(0.61).unwrap();
/// assert_eq!(c.into_inner(), 0.61);
///
/// assert!(UnitInterval::new(1.0).is_ok());
/// assert!(UnitInterval::new(1.01).is_err());
/// assert!(UnitInterval::new(-0.01).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs `Constrained<T, UnitInterval>` if `0 ≤ value ≤ 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::BelowMinimum`], [`ConstraintError::AboveMaximum`],
    /// or [`ConstraintError::NotANumber`].
    pub fn new<T: UnitBounds>(value: T) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.partial_cmp(&T::zero()).is_none() {
            return Err(ConstraintError::NotANumber);
        }
        if *value < T::zero() {
            return Err(ConstraintError::BelowMinimum);
        }
        if *value > T::one() {
            return Err(ConstraintError::AboveMaximum);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_included() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(
            UnitInterval::new(1.5).map(Constrained::into_inner),
            Err(ConstraintError::AboveMaximum)
        );
        assert_eq!(
            UnitInterval::new(-0.5).map(Constrained::into_inner),
            Err(ConstraintError::BelowMinimum)
        );
        assert_eq!(
            UnitInterval::new(f64::NAN).map(Constrained::into_inner),
            Err(ConstraintError::NotANumber)
        );
    }
}
