//! Symmetrization and antisymmetrization over index positions

use crate::{
    components::Components,
    error::{Error, Result},
    ring::{coerce, Ring},
};
use std::collections::BTreeSet;
use symcomp_index::{factorial, Extension, GroupKind, Permutations, SymmetrySpec};
use tracing::debug;

impl<T: Ring> Components<T> {
    /// Symmetric part over `positions`, every position if `None`
    ///
    /// $$
    /// a_{(i_1 \cdots i_n)} = \frac{1}{n!} \sum_{\sigma \in S_n} a_{i_{\sigma(1)} \cdots i_{\sigma(n)}}
    /// $$
    ///
    /// ```
    /// use num::rational::Rational64;
    /// use symcomp::{Basis, Components, FrameRef, Variant};
    ///
    /// let e = FrameRef::new(Basis::new("e", 2));
    /// let mut a = Components::new(e, 2, 0);
    /// a.set(&[0, 1], Rational64::from_integer(3)).unwrap();
    ///
    /// let s = a.symmetrize(None).unwrap();
    /// assert_eq!(s.variant(), Variant::FullySym);
    /// assert_eq!(s.get(&[1, 0]).unwrap(), Rational64::new(3, 2));
    /// ```
    #[tracing::instrument(level = "debug", skip(self), fields(nid = self.nid()))]
    pub fn symmetrize(&self, positions: Option<&[usize]>) -> Result<Self> {
        self.average_over(positions, GroupKind::Symmetric)
    }

    /// Antisymmetric part over `positions`, every position if `None`
    ///
    /// $$
    /// a_{[i_1 \cdots i_n]} = \frac{1}{n!} \sum_{\sigma \in S_n} \epsilon(\sigma) a_{i_{\sigma(1)} \cdots i_{\sigma(n)}}
    /// $$
    #[tracing::instrument(level = "debug", skip(self), fields(nid = self.nid()))]
    pub fn antisymmetrize(&self, positions: Option<&[usize]>) -> Result<Self> {
        self.average_over(positions, GroupKind::Antisymmetric)
    }

    fn average_over(&self, positions: Option<&[usize]>, kind: GroupKind) -> Result<Self> {
        let nid = self.nid();
        let positions: Vec<usize> = match positions {
            Some(positions) => positions.to_vec(),
            None => (0..nid).collect(),
        };
        check_positions(&positions, nid)?;

        let spec = match self.symmetry().extend(&positions, kind) {
            Extension::Unchanged => return Ok(self.copy()),
            Extension::Vanishes => {
                debug!(symmetry = %self.symmetry(), ?positions, "result vanishes identically");
                let spec = match kind {
                    GroupKind::Symmetric => SymmetrySpec::fully_symmetric(nid),
                    GroupKind::Antisymmetric => SymmetrySpec::fully_antisymmetric(nid),
                };
                return Ok(self.with_spec(spec));
            }
            Extension::Extended(spec) => spec,
        };

        let n = positions.len();
        let count = factorial(n).ok_or_else(|| Error::InvalidPositions {
            reason: format!("cannot average over the {}! permutations of {:?}", n, positions),
        })?;
        let count: T = coerce(count)?;
        let perms: Vec<_> = Permutations::new(n).collect();

        let mut result = self.with_spec(spec.clone());
        for ind in self.space().canonical_range(&spec) {
            let mut permuted = ind.clone();
            let mut sum = T::zero();
            for (perm, sign) in &perms {
                for (k, &pos) in positions.iter().enumerate() {
                    permuted[pos] = ind[positions[perm[k]]];
                }
                let value = self.get(&permuted)?;
                sum = sum
                    + match kind {
                        GroupKind::Symmetric => value,
                        GroupKind::Antisymmetric => sign.apply(value),
                    };
            }
            result.insert(ind, sum / count.clone());
        }
        Ok(result)
    }
}

fn check_positions(positions: &[usize], nid: usize) -> Result<()> {
    let reason = if positions.len() < 2 {
        format!("at least two index positions must be provided, got {:?}", positions)
    } else if positions.len() > nid {
        format!("{:?} has more positions than the {} indices", positions, nid)
    } else if let Some(pos) = positions.iter().find(|&&pos| pos >= nid) {
        format!("{} is not a position among {} indices", pos, nid)
    } else if positions.iter().collect::<BTreeSet<_>>().len() != positions.len() {
        format!("repeated position in {:?}", positions)
    } else {
        return Ok(());
    };
    Err(Error::InvalidPositions { reason })
}
