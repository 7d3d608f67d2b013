//! Coefficient rings

use crate::error::{Error, Result};
use num_traits::{FromPrimitive, Num};
use std::{fmt, ops::Neg};

/// Commutative ring in which the components take their values
///
/// This is implemented for every [num_traits::Num] type with negation and
/// integer coercion, e.g. `f64`, `i64`, `num::rational::Rational64`
/// or `num::complex::Complex64`.
/// Exact rings are preferable whenever components are averaged,
/// as in [Components::symmetrize](crate::Components::symmetrize).
pub trait Ring: Num + Neg<Output = Self> + FromPrimitive + Clone + fmt::Debug {
    /// Image of an integer in the ring
    fn from_scalar(value: i64) -> Option<Self> {
        Self::from_i64(value)
    }

    /// Additive identity test
    fn equals_zero(&self) -> bool {
        self.is_zero()
    }
}

impl<T> Ring for T where T: Num + Neg<Output = T> + FromPrimitive + Clone + fmt::Debug {}

pub(crate) fn coerce<T: Ring>(value: i64) -> Result<T> {
    T::from_scalar(value).ok_or(Error::ScalarCoercion { value })
}
