//! Contraction over pairs of index positions

use crate::{
    components::Components,
    error::{Error, Result},
    ring::Ring,
};
use std::collections::BTreeMap;
use symcomp_index::IndexSpace;

/// Result of a contraction: a scalar when no index is left
#[derive(Debug, Clone)]
pub enum Contraction<T> {
    Scalar(T),
    Components(Components<T>),
}

impl<T> Contraction<T> {
    pub fn scalar(&self) -> Option<&T> {
        match self {
            Contraction::Scalar(value) => Some(value),
            Contraction::Components(_) => None,
        }
    }

    pub fn components(&self) -> Option<&Components<T>> {
        match self {
            Contraction::Scalar(_) => None,
            Contraction::Components(comp) => Some(comp),
        }
    }

    pub fn into_scalar(self) -> Option<T> {
        match self {
            Contraction::Scalar(value) => Some(value),
            Contraction::Components(_) => None,
        }
    }

    pub fn into_components(self) -> Option<Components<T>> {
        match self {
            Contraction::Scalar(_) => None,
            Contraction::Components(comp) => Some(comp),
        }
    }
}

impl<T: Ring> PartialEq for Contraction<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Contraction::Scalar(a), Contraction::Scalar(b)) => a == b,
            (Contraction::Components(a), Contraction::Components(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Ring> Components<T> {
    /// Contract the index positions `pos1` and `pos2` of `self`
    ///
    /// $$
    /// c_{\ldots} = \sum_{i} a_{\ldots i \ldots i \ldots}
    /// $$
    ///
    /// The positions after the contracted ones move down, and symmetries
    /// not involving them survive. A 2-index store contracts to its trace.
    ///
    /// ```
    /// use symcomp::{Basis, Components, FrameRef};
    ///
    /// let e = FrameRef::new(Basis::new("e", 2));
    /// let mut a = Components::<i64>::new(e, 2, 0);
    /// a.set(&[0, 0], 3).unwrap();
    /// a.set(&[1, 1], 4).unwrap();
    /// a.set(&[0, 1], 10).unwrap();
    /// assert_eq!(a.self_contract(0, 1).unwrap().into_scalar(), Some(7));
    /// ```
    #[tracing::instrument(level = "debug", skip(self), fields(nid = self.nid()))]
    pub fn self_contract(&self, pos1: usize, pos2: usize) -> Result<Contraction<T>> {
        let nid = self.nid();
        if nid < 2 {
            return Err(Error::InvalidPositions {
                reason: format!("contraction requires at least 2 indices, got {}", nid),
            });
        }
        if pos1 == pos2 || pos1 >= nid || pos2 >= nid {
            return Err(Error::InvalidPositions {
                reason: format!(
                    "cannot contract the positions {} and {} among {} indices",
                    pos1, pos2, nid
                ),
            });
        }
        let (pos1, pos2) = if pos1 < pos2 { (pos1, pos2) } else { (pos2, pos1) };

        if nid == 2 {
            let mut trace = T::zero();
            for i in self.space().range() {
                trace = trace + self.get(&[i, i])?;
            }
            return Ok(Contraction::Scalar(trace));
        }

        let spec = self.symmetry().contracted(pos1, pos2);
        let mut result = self.with_spec(spec.clone());

        if self.symmetry().is_trivial() {
            // Only stored diagonal entries contribute
            let mut sums: BTreeMap<Vec<usize>, T> = BTreeMap::new();
            for (ind, value) in self.entries() {
                if ind[pos1] != ind[pos2] {
                    continue;
                }
                let reduced: Vec<usize> = ind
                    .iter()
                    .enumerate()
                    .filter(|&(pos, _)| pos != pos1 && pos != pos2)
                    .map(|(_, &i)| i)
                    .collect();
                let sum = sums.entry(reduced).or_insert_with(T::zero);
                *sum = sum.clone() + value.clone();
            }
            for (ind, sum) in sums {
                result.insert(ind, sum);
            }
            return Ok(Contraction::Components(result));
        }

        let reduced_space = IndexSpace::new(nid - 2, self.dim(), self.start_index());
        for ind in reduced_space.canonical_range(&spec) {
            let mut full = Vec::with_capacity(nid);
            full.extend_from_slice(&ind[..pos1]);
            full.push(0);
            full.extend_from_slice(&ind[pos1..pos2 - 1]);
            full.push(0);
            full.extend_from_slice(&ind[pos2 - 1..]);

            let mut sum = T::zero();
            for i in self.space().range() {
                full[pos1] = i;
                full[pos2] = i;
                sum = sum + self.get(&full)?;
            }
            result.insert(ind, sum);
        }
        Ok(Contraction::Components(result))
    }

    /// Contract the position `pos1` of `self` with the position `pos2` of `other`
    ///
    /// Computed as the contraction of the tensor product at `(pos1, self.nid() + pos2)`.
    pub fn contract(&self, pos1: usize, other: &Self, pos2: usize) -> Result<Contraction<T>> {
        if pos1 >= self.nid() || pos2 >= other.nid() {
            return Err(Error::InvalidPositions {
                reason: format!(
                    "cannot contract the position {} of {} indices with the position {} of {} indices",
                    pos1,
                    self.nid(),
                    pos2,
                    other.nid()
                ),
            });
        }
        self.tensor_product(other)?
            .self_contract(pos1, pos2 + self.nid())
    }
}
