//! Symmetry declarations among index positions

use crate::{
    error::{IndexError, Result},
    parser,
    permutation::{sorting_sign, Sign},
};
use std::{collections::BTreeSet, fmt};

/// Index positions forming one symmetric or antisymmetric group
///
/// Positions are counted from 0 for the first index.
pub type Group = Vec<usize>;

/// Whether the values of a group are interchangeable with sign `+1`,
/// or with the sign of the permutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Symmetric,
    Antisymmetric,
}

/// Shape of a [SymmetrySpec]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// No symmetry at all
    Plain,
    /// Some symmetries or antisymmetries among the indices
    WithSym,
    /// A single symmetric group spanning every index
    FullySym,
    /// A single antisymmetric group spanning every index
    FullyAntiSym,
}

/// Result of adding a new group to an existing [SymmetrySpec]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// The new group is already implied by an existing one
    Unchanged,
    /// The new group conflicts with an opposite group: the tensor vanishes
    Vanishes,
    /// Symmetries of the resulting tensor
    Extended(SymmetrySpec),
}

/// Symmetric and antisymmetric groups of index positions
///
/// No position belongs to more than one group. Groups are kept normalized,
/// positions ascending within a group and groups ordered by their first
/// position, so that two specs declaring the same symmetries compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymmetrySpec {
    nid: usize,
    sym: Vec<Group>,
    antisym: Vec<Group>,
}

impl SymmetrySpec {
    /// No symmetry among `nid` indices
    pub fn none(nid: usize) -> Self {
        SymmetrySpec {
            nid,
            sym: Vec::new(),
            antisym: Vec::new(),
        }
    }

    /// Validate and normalize groups of positions
    ///
    /// ```
    /// use symcomp_index::SymmetrySpec;
    ///
    /// let spec = SymmetrySpec::new(4, vec![vec![3, 1]], vec![vec![0, 2]]).unwrap();
    /// assert_eq!(spec.sym(), &[vec![1, 3]]);
    ///
    /// // position 1 appears twice
    /// assert!(SymmetrySpec::new(4, vec![vec![0, 1]], vec![vec![1, 2]]).is_err());
    /// ```
    pub fn new(nid: usize, sym: Vec<Group>, antisym: Vec<Group>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for group in sym.iter().chain(antisym.iter()) {
            if group.len() < 2 {
                return Err(IndexError::InvalidSymmetrySpec {
                    reason: format!(
                        "At least two index positions must be provided, got {:?}",
                        group
                    ),
                });
            }
            for &pos in group {
                if pos >= nid {
                    return Err(IndexError::InvalidSymmetrySpec {
                        reason: format!("Invalid index position: {} not in [0,{})", pos, nid),
                    });
                }
                if !seen.insert(pos) {
                    return Err(IndexError::InvalidSymmetrySpec {
                        reason: format!("The index position {} appears more than once", pos),
                    });
                }
            }
        }
        Ok(Self::normalized(nid, sym, antisym))
    }

    /// Symmetry among every index
    pub fn fully_symmetric(nid: usize) -> Self {
        if nid < 2 {
            return Self::none(nid);
        }
        Self::normalized(nid, vec![(0..nid).collect()], Vec::new())
    }

    /// Antisymmetry among every index
    pub fn fully_antisymmetric(nid: usize) -> Self {
        if nid < 2 {
            return Self::none(nid);
        }
        Self::normalized(nid, Vec::new(), vec![(0..nid).collect()])
    }

    /// Read the notation produced by [fmt::Display], e.g. `sym(0,1) antisym(2,3)`
    ///
    /// ```
    /// use symcomp_index::{SymmetrySpec, Variant};
    ///
    /// let spec = SymmetrySpec::parse(4, "sym(0,1) antisym(2,3)").unwrap();
    /// assert_eq!(spec.variant(), Variant::WithSym);
    /// assert_eq!(spec.to_string(), "sym(0,1) antisym(2,3)");
    ///
    /// assert_eq!(SymmetrySpec::parse(3, "").unwrap(), SymmetrySpec::none(3));
    /// ```
    pub fn parse(nid: usize, input: &str) -> Result<Self> {
        use nom::{combinator::all_consuming, Finish};
        let (_, groups) = all_consuming(parser::declaration)(input)
            .finish()
            .map_err(|_| IndexError::InvalidSyntax(input.to_string()))?;
        let mut sym = Vec::new();
        let mut antisym = Vec::new();
        for group in groups {
            match group.kind {
                GroupKind::Symmetric => sym.push(group.positions),
                GroupKind::Antisymmetric => antisym.push(group.positions),
            }
        }
        Self::new(nid, sym, antisym)
    }

    // Caller guarantees the groups are disjoint, in range, and of length >= 2
    fn normalized(nid: usize, mut sym: Vec<Group>, mut antisym: Vec<Group>) -> Self {
        for group in sym.iter_mut().chain(antisym.iter_mut()) {
            group.sort_unstable();
        }
        sym.sort();
        antisym.sort();
        SymmetrySpec { nid, sym, antisym }
    }

    pub fn nid(&self) -> usize {
        self.nid
    }

    /// Symmetric groups
    pub fn sym(&self) -> &[Group] {
        &self.sym
    }

    /// Antisymmetric groups
    pub fn antisym(&self) -> &[Group] {
        &self.antisym
    }

    fn groups(&self, kind: GroupKind) -> &[Group] {
        match kind {
            GroupKind::Symmetric => &self.sym,
            GroupKind::Antisymmetric => &self.antisym,
        }
    }

    pub fn is_trivial(&self) -> bool {
        self.sym.is_empty() && self.antisym.is_empty()
    }

    /// The most specific variant describing these symmetries
    pub fn variant(&self) -> Variant {
        match (self.sym.as_slice(), self.antisym.as_slice()) {
            ([], []) => Variant::Plain,
            ([group], []) if group.len() == self.nid => Variant::FullySym,
            ([], [group]) if group.len() == self.nid => Variant::FullyAntiSym,
            _ => Variant::WithSym,
        }
    }

    /// Canonical representative of `indices` and its sign
    ///
    /// Values are sorted within every symmetric group, then within every
    /// antisymmetric group, the sign collecting the parity of each
    /// antisymmetric sort. Returns `None` when two values coincide within an
    /// antisymmetric group, i.e. when the component is forced to vanish.
    /// `indices` must hold `nid` values.
    ///
    /// ```
    /// use symcomp_index::{SymmetrySpec, Sign};
    ///
    /// let spec = SymmetrySpec::parse(4, "sym(0,1) antisym(2,3)").unwrap();
    /// assert_eq!(spec.canonicalize(&[2, 1, 3, 0]), Some((Sign::Minus, vec![1, 2, 0, 3])));
    /// assert_eq!(spec.canonicalize(&[2, 1, 3, 3]), None);
    /// ```
    pub fn canonicalize(&self, indices: &[usize]) -> Option<(Sign, Vec<usize>)> {
        debug_assert_eq!(indices.len(), self.nid);
        let mut ind = indices.to_vec();
        for group in &self.sym {
            let mut values: Vec<usize> = group.iter().map(|&pos| ind[pos]).collect();
            values.sort_unstable();
            for (&pos, value) in group.iter().zip(values) {
                ind[pos] = value;
            }
        }
        let mut sign = Sign::Plus;
        for group in &self.antisym {
            let mut values: Vec<usize> = group.iter().map(|&pos| ind[pos]).collect();
            sign = sign * sorting_sign(&values)?;
            values.sort_unstable();
            for (&pos, value) in group.iter().zip(values) {
                ind[pos] = value;
            }
        }
        Some((sign, ind))
    }

    /// Whether `indices` is its own canonical representative
    pub fn is_canonical(&self, indices: &[usize]) -> bool {
        let ascending = |group: &Group, strict: bool| {
            group.windows(2).all(|w| {
                let (a, b) = (indices[w[0]], indices[w[1]]);
                if strict {
                    a < b
                } else {
                    a <= b
                }
            })
        };
        self.sym.iter().all(|g| ascending(g, false))
            && self.antisym.iter().all(|g| ascending(g, true))
    }

    /// Symmetries shared by two specs on the same number of indices
    ///
    /// Every pair of groups of the same kind contributes its intersection,
    /// provided it keeps at least two positions.
    ///
    /// ```
    /// use symcomp_index::SymmetrySpec;
    ///
    /// let a = SymmetrySpec::parse(4, "sym(0,1,2)").unwrap();
    /// let b = SymmetrySpec::parse(4, "sym(1,2,3)").unwrap();
    /// assert_eq!(a.common(&b).to_string(), "sym(1,2)");
    /// ```
    pub fn common(&self, other: &SymmetrySpec) -> SymmetrySpec {
        debug_assert_eq!(self.nid, other.nid);
        fn intersections(a: &[Group], b: &[Group]) -> Vec<Group> {
            a.iter()
                .flat_map(|ga| {
                    b.iter().map(move |gb| {
                        ga.iter()
                            .copied()
                            .filter(|pos| gb.contains(pos))
                            .collect::<Group>()
                    })
                })
                .filter(|group| group.len() >= 2)
                .collect()
        }
        Self::normalized(
            self.nid,
            intersections(&self.sym, &other.sym),
            intersections(&self.antisym, &other.antisym),
        )
    }

    /// Symmetries of a tensor product: the groups of `other` are shifted
    /// past the indices of `self`, nothing crosses the seam
    pub fn concat(&self, other: &SymmetrySpec) -> SymmetrySpec {
        let shift = |groups: &[Group]| -> Vec<Group> {
            groups
                .iter()
                .map(|g| g.iter().map(|pos| pos + self.nid).collect())
                .collect()
        };
        let mut sym = self.sym.clone();
        sym.extend(shift(&other.sym));
        let mut antisym = self.antisym.clone();
        antisym.extend(shift(&other.antisym));
        Self::normalized(self.nid + other.nid, sym, antisym)
    }

    /// Symmetries left after contracting the positions `pos1 < pos2`
    ///
    /// Both positions leave their groups, groups falling below two positions
    /// are dropped, and the remaining positions move down to close the gaps.
    ///
    /// ```
    /// use symcomp_index::SymmetrySpec;
    ///
    /// let spec = SymmetrySpec::parse(5, "sym(0,1,4) antisym(2,3)").unwrap();
    /// assert_eq!(spec.contracted(1, 2).to_string(), "sym(0,2)");
    /// ```
    pub fn contracted(&self, pos1: usize, pos2: usize) -> SymmetrySpec {
        debug_assert!(pos1 < pos2 && pos2 < self.nid);
        let reduce = |groups: &[Group]| -> Vec<Group> {
            groups
                .iter()
                .map(|g| {
                    g.iter()
                        .filter(|&&pos| pos != pos1 && pos != pos2)
                        .map(|&pos| {
                            if pos < pos1 {
                                pos
                            } else if pos < pos2 {
                                pos - 1
                            } else {
                                pos - 2
                            }
                        })
                        .collect::<Group>()
                })
                .filter(|g| g.len() >= 2)
                .collect()
        };
        Self::normalized(self.nid - 2, reduce(&self.sym), reduce(&self.antisym))
    }

    /// Move every position `p` to `new_position[p]`
    ///
    /// `new_position` must be a permutation of `0..nid`.
    pub fn permuted(&self, new_position: &[usize]) -> SymmetrySpec {
        debug_assert_eq!(new_position.len(), self.nid);
        let map = |groups: &[Group]| -> Vec<Group> {
            groups
                .iter()
                .map(|g| g.iter().map(|&pos| new_position[pos]).collect())
                .collect()
        };
        Self::normalized(self.nid, map(&self.sym), map(&self.antisym))
    }

    /// Symmetries of the tensor obtained by (anti)symmetrizing over `positions`
    ///
    /// `positions` must be distinct and lie in `[0, nid - 1]`.
    ///
    /// - An existing group of the same kind containing every position makes
    ///   the operation the identity.
    /// - Two or more positions inside an existing group of the opposite kind
    ///   make the result vanish.
    /// - Existing groups contained in `positions` are absorbed by the new
    ///   group; the other groups lose the positions they share with it.
    ///
    /// ```
    /// use symcomp_index::{Extension, GroupKind, SymmetrySpec};
    ///
    /// let spec = SymmetrySpec::parse(4, "antisym(0,1) sym(2,3)").unwrap();
    /// assert_eq!(spec.extend(&[0, 1], GroupKind::Symmetric), Extension::Vanishes);
    /// assert_eq!(spec.extend(&[3, 2], GroupKind::Symmetric), Extension::Unchanged);
    ///
    /// let Extension::Extended(ext) = spec.extend(&[1, 2, 3], GroupKind::Symmetric) else {
    ///     unreachable!()
    /// };
    /// assert_eq!(ext.to_string(), "sym(1,2,3)");
    /// ```
    pub fn extend(&self, positions: &[usize], kind: GroupKind) -> Extension {
        let pos: BTreeSet<usize> = positions.iter().copied().collect();
        let opposite_kind = match kind {
            GroupKind::Symmetric => GroupKind::Antisymmetric,
            GroupKind::Antisymmetric => GroupKind::Symmetric,
        };
        if self
            .groups(kind)
            .iter()
            .any(|g| pos.iter().all(|p| g.contains(p)))
        {
            return Extension::Unchanged;
        }

        let mut opposite = Vec::new();
        for group in self.groups(opposite_kind) {
            let remaining: Group = group.iter().copied().filter(|p| !pos.contains(p)).collect();
            match group.len() - remaining.len() {
                0 => opposite.push(remaining),
                1 => {
                    if remaining.len() >= 2 {
                        opposite.push(remaining)
                    }
                }
                _ => return Extension::Vanishes,
            }
        }

        let mut same = vec![pos.iter().copied().collect::<Group>()];
        for group in self.groups(kind) {
            let remaining: Group = group.iter().copied().filter(|p| !pos.contains(p)).collect();
            if remaining.len() >= 2 {
                same.push(remaining);
            }
        }

        let spec = match kind {
            GroupKind::Symmetric => Self::normalized(self.nid, same, opposite),
            GroupKind::Antisymmetric => Self::normalized(self.nid, opposite, same),
        };
        Extension::Extended(spec)
    }
}

/// `sym(0,1) antisym(2,3)` notation, empty if there is no symmetry
impl fmt::Display for SymmetrySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self
            .sym
            .iter()
            .map(|g| ("sym", g))
            .chain(self.antisym.iter().map(|g| ("antisym", g)));
        for (n, (name, group)) in groups.enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}(", name)?;
            for (k, pos) in group.iter().enumerate() {
                if k > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", pos)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_specs() {
        let too_short = SymmetrySpec::new(3, vec![vec![0]], vec![]);
        assert!(matches!(too_short, Err(IndexError::InvalidSymmetrySpec { .. })));

        let out_of_range = SymmetrySpec::new(3, vec![vec![0, 3]], vec![]);
        assert!(matches!(out_of_range, Err(IndexError::InvalidSymmetrySpec { .. })));

        let overlapping = SymmetrySpec::new(4, vec![vec![0, 1], vec![1, 2]], vec![]);
        assert!(matches!(overlapping, Err(IndexError::InvalidSymmetrySpec { .. })));

        let repeated = SymmetrySpec::new(4, vec![vec![0, 0]], vec![]);
        assert!(matches!(repeated, Err(IndexError::InvalidSymmetrySpec { .. })));
    }

    #[test]
    fn variants() {
        assert_eq!(SymmetrySpec::none(3).variant(), Variant::Plain);
        assert_eq!(SymmetrySpec::fully_symmetric(3).variant(), Variant::FullySym);
        assert_eq!(
            SymmetrySpec::fully_antisymmetric(3).variant(),
            Variant::FullyAntiSym
        );
        assert_eq!(SymmetrySpec::fully_symmetric(1).variant(), Variant::Plain);
        let spec = SymmetrySpec::new(3, vec![vec![0, 2]], vec![]).unwrap();
        assert_eq!(spec.variant(), Variant::WithSym);
        // a single group spanning all positions is the fully symmetric case
        let spec = SymmetrySpec::new(3, vec![vec![2, 0, 1]], vec![]).unwrap();
        assert_eq!(spec, SymmetrySpec::fully_symmetric(3));
    }

    #[test]
    fn canonicalize_symmetric() {
        let spec = SymmetrySpec::fully_symmetric(3);
        assert_eq!(
            spec.canonicalize(&[2, 0, 1]),
            Some((Sign::Plus, vec![0, 1, 2]))
        );
        assert_eq!(
            spec.canonicalize(&[1, 1, 0]),
            Some((Sign::Plus, vec![0, 1, 1]))
        );
    }

    #[test]
    fn canonicalize_antisymmetric() {
        let spec = SymmetrySpec::fully_antisymmetric(3);
        assert_eq!(
            spec.canonicalize(&[0, 1, 2]),
            Some((Sign::Plus, vec![0, 1, 2]))
        );
        assert_eq!(
            spec.canonicalize(&[1, 0, 2]),
            Some((Sign::Minus, vec![0, 1, 2]))
        );
        assert_eq!(
            spec.canonicalize(&[2, 0, 1]),
            Some((Sign::Plus, vec![0, 1, 2]))
        );
        assert_eq!(spec.canonicalize(&[1, 0, 1]), None);
    }

    #[test]
    fn canonical_forms_are_canonical() {
        let spec = SymmetrySpec::parse(4, "sym(0,2) antisym(1,3)").unwrap();
        for ind in crate::full_index_range(4, 3, 0) {
            match spec.canonicalize(&ind) {
                Some((_, canonical)) => {
                    assert!(spec.is_canonical(&canonical));
                    assert_eq!(spec.is_canonical(&ind), ind == canonical);
                }
                None => assert_eq!(ind[1], ind[3]),
            }
        }
    }

    #[test]
    fn common_groups() {
        let a = SymmetrySpec::parse(4, "sym(0,1) antisym(2,3)").unwrap();
        let b = SymmetrySpec::parse(4, "sym(0,1)").unwrap();
        assert_eq!(a.common(&b), b);
        assert_eq!(a.common(&SymmetrySpec::none(4)), SymmetrySpec::none(4));
        let c = SymmetrySpec::parse(4, "sym(1,2)").unwrap();
        assert!(a.common(&c).is_trivial());
    }

    #[test]
    fn concat_shifts_other() {
        let a = SymmetrySpec::fully_antisymmetric(2);
        let b = SymmetrySpec::parse(3, "sym(0,2)").unwrap();
        insta::assert_snapshot!(a.concat(&b).to_string(), @"sym(2,4) antisym(0,1)");
        assert_eq!(a.concat(&b).nid(), 5);
    }

    #[test]
    fn contracted_variants() {
        let spec = SymmetrySpec::fully_symmetric(4);
        assert_eq!(spec.contracted(0, 3), SymmetrySpec::fully_symmetric(2));
        let spec = SymmetrySpec::parse(4, "sym(0,1) antisym(2,3)").unwrap();
        assert!(spec.contracted(1, 2).is_trivial());
        assert_eq!(spec.contracted(0, 1), SymmetrySpec::fully_antisymmetric(2));
    }

    #[test]
    fn extend_symmetric() {
        let spec = SymmetrySpec::none(3);
        assert_eq!(
            spec.extend(&[0, 1, 2], GroupKind::Symmetric),
            Extension::Extended(SymmetrySpec::fully_symmetric(3))
        );

        // the antisymmetry loses the position shared with the new symmetry
        let spec = SymmetrySpec::parse(4, "antisym(1,2,3)").unwrap();
        assert_eq!(
            spec.extend(&[0, 1], GroupKind::Symmetric),
            Extension::Extended(SymmetrySpec::parse(4, "sym(0,1) antisym(2,3)").unwrap())
        );

        // an existing symmetry inside the new one is absorbed
        let spec = SymmetrySpec::parse(4, "sym(0,1)").unwrap();
        assert_eq!(
            spec.extend(&[0, 1, 2], GroupKind::Symmetric),
            Extension::Extended(SymmetrySpec::parse(4, "sym(0,1,2)").unwrap())
        );

        // a partially overlapping symmetry keeps its outside positions
        let spec = SymmetrySpec::parse(5, "sym(0,1,2)").unwrap();
        assert_eq!(
            spec.extend(&[2, 3], GroupKind::Symmetric),
            Extension::Extended(SymmetrySpec::parse(5, "sym(0,1) sym(2,3)").unwrap())
        );
    }

    #[test]
    fn extend_antisymmetric() {
        let spec = SymmetrySpec::fully_symmetric(2);
        assert_eq!(
            spec.extend(&[0, 1], GroupKind::Antisymmetric),
            Extension::Vanishes
        );
        let spec = SymmetrySpec::parse(3, "antisym(0,1,2)").unwrap();
        assert_eq!(
            spec.extend(&[0, 2], GroupKind::Antisymmetric),
            Extension::Unchanged
        );
        let spec = SymmetrySpec::parse(3, "sym(0,1)").unwrap();
        assert_eq!(
            spec.extend(&[1, 2], GroupKind::Antisymmetric),
            Extension::Extended(SymmetrySpec::parse(3, "antisym(1,2)").unwrap())
        );
    }

    #[test]
    fn permuted_groups() {
        // exchange the blocks [0, 2) and [2, 3): 0 -> 1, 1 -> 2, 2 -> 0
        let spec = SymmetrySpec::parse(3, "antisym(1,2)").unwrap();
        assert_eq!(
            spec.permuted(&[1, 2, 0]),
            SymmetrySpec::parse(3, "antisym(0,2)").unwrap()
        );
    }
}
