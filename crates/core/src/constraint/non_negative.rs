use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is zero or greater.
///
/// Used for quantities such as storm depth, where a dry run (zero depth) is
/// valid but a negative depth is not.
///
/// # Examples
///
/// ```
/// use stormflow_core::constraint::{Constrained, NonNegative};
///
/// let depth = NonNegative::new(0.0).unwrap();
/// assert_eq!(depth.into_inner(), 0.0);
///
/// assert!(Constrained::<f64, NonNegative>::new(-1.0).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs `Constrained<T, NonNegative>` if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::Negative`] for negative values and
    /// [`ConstraintError::NotANumber`] for unordered values such as NaN.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Length, length::millimeter};

    #[test]
    fn accepts_zero_and_positive_values() {
        assert!(NonNegative::new(0.0).is_ok());
        assert!(NonNegative::new(12.5).is_ok());
        assert!(NonNegative::new(Length::new::<millimeter>(0.0)).is_ok());
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert_eq!(NonNegative::new(-0.1), Err(ConstraintError::Negative));
        assert_eq!(
            NonNegative::new(Length::new::<millimeter>(-3.0)).map(Constrained::into_inner),
            Err(ConstraintError::Negative)
        );
        assert_eq!(
            NonNegative::new(f64::NAN).map(Constrained::into_inner),
            Err(ConstraintError::NotANumber)
        );
    }
}
