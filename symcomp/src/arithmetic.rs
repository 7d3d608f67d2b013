//! Linear operations and tensor product of component stores

use crate::{components::Components, error::Result, ring::Ring};
use std::ops::{Div, Mul, Neg};
use symcomp_index::SymmetrySpec;
use tracing::debug;

impl<T: Ring> Components<T> {
    /// Sum of two stores on the same frame, number of indices and start index
    ///
    /// When the symmetries differ, the result keeps only what both operands
    /// share, see [SymmetrySpec::common], and every component is read back
    /// through [Components::get].
    ///
    /// ```
    /// use symcomp::{Basis, Components, FrameRef, Variant};
    ///
    /// let e = FrameRef::new(Basis::new("e", 2));
    /// let mut s = Components::<i64>::fully_symmetric(e.clone(), 2, 0);
    /// s.set(&[0, 1], 1).unwrap();
    /// let mut a = Components::<i64>::fully_antisymmetric(e, 2, 0);
    /// a.set(&[0, 1], 2).unwrap();
    ///
    /// let sum = s.try_add(&a).unwrap();
    /// assert_eq!(sum.variant(), Variant::Plain);
    /// assert_eq!(sum.get(&[0, 1]).unwrap(), 3);
    /// assert_eq!(sum.get(&[1, 0]).unwrap(), -1);
    /// ```
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other, true)?;
        if self.symmetry() == other.symmetry() {
            let mut result = self.copy();
            for (ind, value) in other.entries() {
                let sum = match result.stored(ind) {
                    Some(current) => current.clone() + value.clone(),
                    None => value.clone(),
                };
                result.insert(ind.to_vec(), sum);
            }
            return Ok(result);
        }

        let spec = self.symmetry().common(other.symmetry());
        debug!(
            lhs = %self.symmetry(),
            rhs = %other.symmetry(),
            result = %spec,
            "adding components with different symmetries"
        );
        let mut result = self.with_spec(spec.clone());
        for ind in self.space().canonical_range(&spec) {
            let sum = self.get(&ind)? + other.get(&ind)?;
            result.insert(ind, sum);
        }
        Ok(result)
    }

    /// Difference, i.e. the sum with the negated right operand
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.try_add(&-other)
    }

    /// Every component multiplied by `factor`
    pub fn scale(&self, factor: &T) -> Self {
        let mut result = self.new_instance();
        if factor.equals_zero() {
            return result;
        }
        for (ind, value) in self.entries() {
            result.insert(ind.to_vec(), value.clone() * factor.clone());
        }
        result
    }

    /// Every component divided by `factor`
    ///
    /// Division by zero behaves as it does in the ring.
    pub fn divide(&self, factor: &T) -> Self {
        let mut result = self.new_instance();
        for (ind, value) in self.entries() {
            result.insert(ind.to_vec(), value.clone() / factor.clone());
        }
        result
    }

    /// Tensor product $a \otimes b$
    ///
    /// The indices of `other` follow those of `self`, and so do its
    /// symmetries; no symmetry crosses between the two operands.
    /// The square $v \otimes v$ of a single-index store is fully symmetric.
    ///
    /// ```
    /// use symcomp::{Basis, Components, FrameRef, Variant};
    ///
    /// let e = FrameRef::new(Basis::new("e", 2));
    /// let mut v = Components::<i64>::new(e, 1, 0);
    /// v.set(&[0], 2).unwrap();
    /// v.set(&[1], 3).unwrap();
    ///
    /// let vv = v.tensor_product(&v).unwrap();
    /// assert_eq!(vv.variant(), Variant::FullySym);
    /// assert_eq!(vv.get(&[1, 0]).unwrap(), 6);
    /// ```
    #[tracing::instrument(level = "debug", skip_all, fields(nid = self.nid() + other.nid()))]
    pub fn tensor_product(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other, false)?;
        let spec = if self.nid() == 1 && std::ptr::eq(self, other) {
            SymmetrySpec::fully_symmetric(2)
        } else {
            self.symmetry().concat(other.symmetry())
        };
        let mut result = self.with_spec(spec);
        for (lhs, lvalue) in self.entries() {
            for (rhs, rvalue) in other.entries() {
                let ind: Vec<usize> = lhs.iter().chain(rhs).copied().collect();
                if !result.symmetry().is_canonical(&ind) {
                    continue;
                }
                result.insert(ind, lvalue.clone() * rvalue.clone());
            }
        }
        Ok(result)
    }
}

impl<'a, T: Ring> Neg for &'a Components<T> {
    type Output = Components<T>;
    fn neg(self) -> Components<T> {
        let mut result = self.new_instance();
        for (ind, value) in self.entries() {
            result.insert(ind.to_vec(), -value.clone());
        }
        result
    }
}

impl<T: Ring> Neg for Components<T> {
    type Output = Components<T>;
    fn neg(self) -> Components<T> {
        -&self
    }
}

impl<'a, T: Ring> Mul<T> for &'a Components<T> {
    type Output = Components<T>;
    fn mul(self, factor: T) -> Components<T> {
        self.scale(&factor)
    }
}

impl<T: Ring> Mul<T> for Components<T> {
    type Output = Components<T>;
    fn mul(self, factor: T) -> Components<T> {
        self.scale(&factor)
    }
}

impl<'a, T: Ring> Div<T> for &'a Components<T> {
    type Output = Components<T>;
    fn div(self, factor: T) -> Components<T> {
        self.divide(&factor)
    }
}

impl<T: Ring> Div<T> for Components<T> {
    type Output = Components<T>;
    fn div(self, factor: T) -> Components<T> {
        self.divide(&factor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Basis, Components, Error, FrameRef, Variant};
    use num::rational::Rational64;

    fn frame(dim: usize) -> FrameRef {
        FrameRef::new(Basis::new("e", dim))
    }

    fn r(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    #[test]
    fn add_same_symmetry() -> anyhow::Result<()> {
        let e = frame(3);
        let mut a = Components::<i64>::fully_antisymmetric(e.clone(), 2, 0);
        a.set(&[0, 1], 1)?;
        a.set(&[1, 2], 2)?;
        let mut b = Components::<i64>::fully_antisymmetric(e, 2, 0);
        b.set(&[1, 0], 1)?;
        b.set(&[0, 2], 4)?;

        let c = a.try_add(&b)?;
        assert_eq!(c.variant(), Variant::FullyAntiSym);
        // [0, 1] cancels and is not stored
        assert_eq!(c.stored_len(), 2);
        assert_eq!(c.get(&[2, 0])?, -4);
        assert_eq!(c.get(&[2, 1])?, -2);
        Ok(())
    }

    #[test]
    fn add_keeps_common_groups() -> anyhow::Result<()> {
        let e = frame(2);
        let mut a = Components::<i64>::with_groups(e.clone(), 3, 0, vec![vec![0, 1, 2]], vec![])?;
        a.set(&[0, 0, 1], 1)?;
        let mut b = Components::<i64>::with_groups(e, 3, 0, vec![vec![0, 1]], vec![])?;
        b.set(&[1, 0, 0], 2)?;

        let c = a.try_add(&b)?;
        assert_eq!(c.symmetry().to_string(), "sym(0,1)");
        assert_eq!(c.get(&[0, 0, 1])?, 1);
        assert_eq!(c.get(&[0, 1, 0])?, 3);
        assert_eq!(c.get(&[1, 0, 0])?, 3);
        Ok(())
    }

    #[test]
    fn incompatible_operands() {
        let a = Components::<i64>::new(frame(2), 2, 0);
        let other_frame = Components::<i64>::new(frame(2), 2, 0);
        let other_nid = Components::<i64>::new(a.frame().clone(), 3, 0);
        let other_start = Components::<i64>::new(a.frame().clone(), 2, 1);
        for other in [&other_frame, &other_nid, &other_start] {
            assert!(matches!(
                a.try_add(other),
                Err(Error::IncompatibleOperands { .. })
            ));
        }
        assert!(a.tensor_product(&other_nid).is_ok());
        assert!(matches!(
            a.tensor_product(&other_start),
            Err(Error::IncompatibleOperands { .. })
        ));
    }

    #[test]
    fn subtract_self() -> anyhow::Result<()> {
        let mut a = Components::new(frame(3), 2, 1);
        a.set(&[1, 3], r(1, 2))?;
        a.set(&[2, 2], r(-3, 4))?;
        let zero = a.try_sub(&a)?;
        assert!(zero.is_zero());
        assert_eq!(zero.stored_len(), 0);
        assert_eq!(zero, a.scale(&r(0, 1)));
        Ok(())
    }

    #[test]
    fn scalar_operations() -> anyhow::Result<()> {
        let mut a = Components::with_groups(frame(3), 3, 0, vec![vec![1, 2]], vec![])?;
        a.set(&[0, 2, 1], r(3, 1))?;

        let b = &a * r(2, 3);
        assert_eq!(b.symmetry(), a.symmetry());
        assert_eq!(b.get(&[0, 1, 2])?, r(2, 1));

        let c = &a / r(6, 1);
        assert_eq!(c.get(&[0, 1, 2])?, r(1, 2));

        let zero = a.clone() * r(0, 1);
        assert_eq!(zero.stored_len(), 0);
        assert_eq!(zero.symmetry(), a.symmetry());

        let minus = -a.clone();
        assert_eq!(minus.get(&[0, 2, 1])?, r(-3, 1));
        Ok(())
    }

    #[test]
    fn tensor_product_shifts_groups() -> anyhow::Result<()> {
        let e = frame(3);
        let mut a = Components::<i64>::fully_antisymmetric(e.clone(), 2, 0);
        a.set(&[0, 2], 5)?;
        let mut b = Components::<i64>::fully_symmetric(e, 2, 0);
        b.set(&[1, 1], 2)?;
        b.set(&[0, 1], 3)?;

        let p = a.tensor_product(&b)?;
        assert_eq!(p.nid(), 4);
        assert_eq!(p.symmetry().to_string(), "sym(2,3) antisym(0,1)");
        assert_eq!(p.get(&[0, 2, 1, 1])?, 10);
        assert_eq!(p.get(&[2, 0, 1, 0])?, -15);
        assert_eq!(p.stored_len(), 2);
        Ok(())
    }

    #[test]
    fn square_of_vector() -> anyhow::Result<()> {
        let e = frame(3);
        let mut v = Components::<i64>::new(e.clone(), 1, 0);
        v.set(&[0], 1)?;
        v.set(&[2], 4)?;
        let vv = v.tensor_product(&v)?;
        assert_eq!(vv.variant(), Variant::FullySym);
        assert_eq!(vv.stored_len(), 3);
        assert_eq!(vv.get(&[2, 0])?, 4);
        assert_eq!(vv.get(&[0, 2])?, 4);
        assert_eq!(vv.get(&[2, 2])?, 16);

        // equal but distinct stores are not squared
        let w = v.copy();
        let vw = v.tensor_product(&w)?;
        assert_eq!(vw.variant(), Variant::Plain);
        assert_eq!(vw, vv);
        Ok(())
    }
}
