//! Numeric constraints checked once at construction.
//!
//! Ground heat exchanger inputs are mostly physical sizes and material
//! properties that only make sense when positive. [`Constrained<T, C>`] carries
//! that guarantee with the value so it is checked where the value enters the
//! crate rather than in every formula that divides by it.
//!
//! Two markers are provided:
//!
//! - [`StrictlyPositive`]: greater than zero
//! - [`NonNegative`]: zero or greater
//!
//! Both reject `NaN`. The checks work for any `T: PartialOrd + Zero`, which
//! includes plain floats and [`uom`] quantities.
//!
//! ```
//! use twine_ghe::support::constraint::{NonNegative, StrictlyPositive};
//! use uom::si::{f64::Length, length::meter};
//!
//! let spacing = StrictlyPositive::new(Length::new::<meter>(5.0)).unwrap();
//! assert_eq!(spacing.into_inner().get::<meter>(), 5.0);
//!
//! assert!(StrictlyPositive::new(0.0).is_err());
//! assert!(NonNegative::new(0.0).is_ok());
//! ```

use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;
use thiserror::Error;

/// A numeric invariant that a value can be checked against.
pub trait Constraint<T> {
    /// Checks that `value` satisfies the constraint.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// Why a value failed a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
}

/// A value known to satisfy the constraint `C`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker for values greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Wraps `value` if it is greater than zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker for values of zero or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Wraps `value` if it is zero or greater.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or `NaN`.
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
