//! Kronecker delta

use crate::{
    components::Components,
    error::{Error, Result},
    frame::FrameRef,
    ring::Ring,
};
use ndarray::ArrayD;
use std::{fmt, ops::Deref};

/// Immutable components $\delta_{ij}$ of the identity with respect to a frame
///
/// Reading goes through [Deref] to the underlying fully symmetric
/// [Components]; every attempt to write fails with [Error::Frozen].
///
/// ```
/// use symcomp::{Basis, Error, FrameRef, KroneckerDelta};
///
/// let e = FrameRef::new(Basis::new("e", 3));
/// let mut delta = KroneckerDelta::<i64>::new(e, 1);
/// assert_eq!(delta.get(&[2, 2]).unwrap(), 1);
/// assert_eq!(delta.get(&[1, 3]).unwrap(), 0);
/// assert_eq!(delta.set(&[1, 3], 2), Err(Error::Frozen));
/// assert_eq!(delta.to_string(), "Kronecker delta of size 3x3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KroneckerDelta<T: Ring> {
    comp: Components<T>,
}

impl<T: Ring> KroneckerDelta<T> {
    pub fn new(frame: FrameRef, start_index: usize) -> Self {
        let mut comp = Components::fully_symmetric(frame, 2, start_index);
        for i in comp.space().range() {
            comp.insert(vec![i, i], T::one());
        }
        KroneckerDelta { comp }
    }

    pub fn set(&mut self, _indices: &[usize], _value: T) -> Result<()> {
        Err(Error::Frozen)
    }

    pub fn set_from_array(&mut self, _array: &ArrayD<T>) -> Result<()> {
        Err(Error::Frozen)
    }

    pub fn components(&self) -> &Components<T> {
        &self.comp
    }

    /// Mutable copy of the components
    pub fn into_components(self) -> Components<T> {
        self.comp
    }
}

impl<T: Ring> Deref for KroneckerDelta<T> {
    type Target = Components<T>;
    fn deref(&self) -> &Components<T> {
        &self.comp
    }
}

impl<T: Ring> fmt::Display for KroneckerDelta<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dim = self.comp.dim();
        write!(f, "Kronecker delta of size {}x{}", dim, dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Basis, Variant};
    use maplit::btreemap;
    use std::collections::BTreeMap;

    #[test]
    fn diagonal_is_stored() {
        let delta = KroneckerDelta::<f64>::new(FrameRef::new(Basis::new("e", 3)), 0);
        assert_eq!(delta.variant(), Variant::FullySym);
        let stored: BTreeMap<Vec<usize>, f64> = delta
            .entries()
            .map(|(ind, value)| (ind.to_vec(), *value))
            .collect();
        assert_eq!(
            stored,
            btreemap! {
                vec![0, 0] => 1.0,
                vec![1, 1] => 1.0,
                vec![2, 2] => 1.0,
            }
        );
    }

    #[test]
    fn frozen() {
        let mut delta = KroneckerDelta::<i64>::new(FrameRef::new(Basis::new("e", 2)), 0);
        let array = delta.to_array().unwrap();
        assert_eq!(delta.set_from_array(&array), Err(Error::Frozen));
        assert_eq!(delta.set(&[0, 0], 1), Err(Error::Frozen));

        // a copy of the components can be modified
        let mut comp = delta.into_components();
        comp.set(&[0, 1], 4).unwrap();
        assert_eq!(comp.get(&[1, 0]).unwrap(), 4);
    }

    #[test]
    fn contraction_with_delta() -> anyhow::Result<()> {
        let e = FrameRef::new(Basis::new("e", 3));
        let delta = KroneckerDelta::<i64>::new(e.clone(), 0);
        let mut a = Components::<i64>::new(e, 2, 0);
        a.set(&[0, 2], 5)?;
        a.set(&[1, 1], 7)?;
        let b = a.contract(1, &delta, 0)?.into_components().unwrap();
        assert_eq!(b, a);
        Ok(())
    }

    #[test]
    fn description() {
        let delta = KroneckerDelta::<i64>::new(FrameRef::new(Basis::new("e", 4)), 1);
        insta::assert_snapshot!(delta.to_string(), @"Kronecker delta of size 4x4");
        insta::assert_snapshot!(
            delta.components().to_string(),
            @"fully symmetric 2-indices components w.r.t. (e_0,e_1,e_2,e_3)"
        );
    }
}
