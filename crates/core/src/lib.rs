//! Core traits and types for stormflow.
//!
//! This crate defines the shared abstractions that the hydrologic components
//! and the water balance simulator build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives simulation events and optionally returns control actions
//! - [`constraint`]: type-level numeric invariants checked at construction
//! - [`round_to`]: decimal rounding used for reported values

pub mod constraint;
mod model;
mod observer;
mod round;

pub use observer::Observer;
pub use round::round_to;
pub use {model::Model, model::Snapshot};
