//! Catchment land-use composition and the area-weighted runoff coefficient.
//!
//! A catchment is divided into allocations, each with a rational-method
//! runoff coefficient `C` and an area. The catchment coefficient is the
//! area-weighted mean:
//!
//! ```text
//! C = Σ(area_i × C_i) / Σ area_i
//! ```
//!
//! rounded to two decimal places.

use stormflow_core::{
    constraint::{Constrained, ConstraintError, StrictlyPositive, UnitInterval},
    round_to,
};
use thiserror::Error;
use uom::{
    ConstZero,
    si::{area::square_meter, f64::Area},
};

/// Fraction of rainfall that becomes surface runoff, in `[0, 1]`.
pub type RunoffCoefficient = Constrained<f64, UnitInterval>;

/// Errors that prevent a runoff coefficient from being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LandUseError {
    /// No land-use allocations were provided.
    #[error("catchment has no land-use allocations")]
    Empty,

    /// The allocations add up to no area at all.
    #[error("catchment has zero total area")]
    ZeroArea,

    /// The weighted coefficient fell outside `[0, 1]`.
    #[error("weighted runoff coefficient is invalid: {0}")]
    Coefficient(#[from] ConstraintError),
}

/// One land-use subdivision of a catchment.
#[derive(Debug, Clone, PartialEq)]
pub struct LandUseAllocation {
    label: String,
    coefficient: RunoffCoefficient,
    area: Constrained<Area, StrictlyPositive>,
}

impl LandUseAllocation {
    /// Creates an allocation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the coefficient is outside `[0, 1]` or
    /// the area is not strictly positive.
    pub fn new(
        label: impl Into<String>,
        coefficient: f64,
        area: Area,
    ) -> Result<Self, ConstraintError> {
        Ok(Self {
            label: label.into(),
            coefficient: Constrained::new(coefficient)?,
            area: Constrained::new(area)?,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn coefficient(&self) -> f64 {
        self.coefficient.into_inner()
    }

    #[must_use]
    pub fn area(&self) -> Area {
        self.area.into_inner()
    }
}

/// Sum of the allocation areas.
#[must_use]
pub fn total_area(allocations: &[LandUseAllocation]) -> Area {
    allocations
        .iter()
        .fold(Area::ZERO, |total, allocation| total + allocation.area())
}

/// Computes the area-weighted runoff coefficient, rounded to 2 decimals.
///
/// # Errors
///
/// Returns [`LandUseError::Empty`] for an empty slice and
/// [`LandUseError::ZeroArea`] if the total area is not positive. Callers must
/// treat both as a failed precondition rather than a zero coefficient.
pub fn weighted_coefficient(
    allocations: &[LandUseAllocation],
) -> Result<RunoffCoefficient, LandUseError> {
    if allocations.is_empty() {
        return Err(LandUseError::Empty);
    }

    let total = total_area(allocations).get::<square_meter>();
    if total.partial_cmp(&0.0) != Some(std::cmp::Ordering::Greater) {
        return Err(LandUseError::ZeroArea);
    }

    let weighted: f64 = allocations
        .iter()
        .map(|allocation| allocation.area().get::<square_meter>() * allocation.coefficient())
        .sum();

    Ok(Constrained::new(round_to(weighted / total, 2))?)
}

/// A non-empty set of land-use allocations with its derived totals.
///
/// The collection is owned by the caller and fixed once built, so a
/// simulation run always sees the same composition.
#[derive(Debug, Clone, PartialEq)]
pub struct Catchment {
    allocations: Vec<LandUseAllocation>,
    total_area: Area,
    coefficient: RunoffCoefficient,
}

impl Catchment {
    /// Builds a catchment and computes its weighted runoff coefficient.
    ///
    /// # Errors
    ///
    /// Returns a [`LandUseError`] if the allocations are empty.
    pub fn new<I>(allocations: I) -> Result<Self, LandUseError>
    where
        I: IntoIterator<Item = LandUseAllocation>,
    {
        let allocations: Vec<_> = allocations.into_iter().collect();
        let coefficient = weighted_coefficient(&allocations)?;
        let total_area = total_area(&allocations);

        Ok(Self {
            allocations,
            total_area,
            coefficient,
        })
    }

    #[must_use]
    pub fn allocations(&self) -> &[LandUseAllocation] {
        &self.allocations
    }

    #[must_use]
    pub fn total_area(&self) -> Area {
        self.total_area
    }

    #[must_use]
    pub fn runoff_coefficient(&self) -> RunoffCoefficient {
        self.coefficient
    }
}
