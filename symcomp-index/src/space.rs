//! Index ranges and their enumeration

use crate::{
    error::{IndexError, Result},
    symmetry::SymmetrySpec,
};
use std::ops::Range;

/// Valid index tuples of a set of components
///
/// Each of the `nid` slots takes a value in `start..start + dim`,
/// where `dim` is the length of the frame the components refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexSpace {
    nid: usize,
    dim: usize,
    start: usize,
}

impl IndexSpace {
    pub fn new(nid: usize, dim: usize, start: usize) -> Self {
        IndexSpace { nid, dim, start }
    }

    /// Number of indices, i.e. the length of a valid tuple
    pub fn nid(&self) -> usize {
        self.nid
    }

    /// Number of values a single slot can take
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Range of values a single slot can take
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.dim
    }

    /// Total number of index tuples, `dim^nid`, or `None` on overflow
    pub fn size(&self) -> Option<usize> {
        u32::try_from(self.nid)
            .ok()
            .and_then(|nid| self.dim.checked_pow(nid))
    }

    /// Check the length of `indices` and the range of every value
    ///
    /// ```
    /// use symcomp_index::{IndexSpace, IndexError};
    ///
    /// let space = IndexSpace::new(2, 3, 1);
    /// assert!(space.check(&[1, 3]).is_ok());
    /// assert_eq!(
    ///     space.check(&[0, 3]),
    ///     Err(IndexError::IndexOutOfRange { index: 0, start: 1, end: 4 })
    /// );
    /// assert_eq!(
    ///     space.check(&[1]),
    ///     Err(IndexError::WrongIndexCount { expected: 2, found: 1 })
    /// );
    /// ```
    pub fn check(&self, indices: &[usize]) -> Result<()> {
        if indices.len() != self.nid {
            return Err(IndexError::WrongIndexCount {
                expected: self.nid,
                found: indices.len(),
            });
        }
        let range = self.range();
        for &index in indices {
            if !range.contains(&index) {
                return Err(IndexError::IndexOutOfRange {
                    index,
                    start: range.start,
                    end: range.end,
                });
            }
        }
        Ok(())
    }

    /// Every index tuple, in lexicographic order
    pub fn full_range(&self) -> FullIndices {
        FullIndices::new(*self)
    }

    /// Index tuples which are canonical under `spec`
    ///
    /// This is the non-redundant enumeration: every symmetry class of tuples
    /// is visited exactly once through its representative, and classes
    /// forced to vanish by an antisymmetry are skipped.
    pub fn canonical_range<'spec>(
        &self,
        spec: &'spec SymmetrySpec,
    ) -> impl Iterator<Item = Vec<usize>> + 'spec {
        debug_assert_eq!(spec.nid(), self.nid);
        self.full_range()
            .filter(move |indices| spec.is_canonical(indices))
    }
}

/// All `nid`-tuples over `start..start + dim`, in lexicographic order
///
/// ```
/// use symcomp_index::full_index_range;
///
/// let all: Vec<_> = full_index_range(2, 2, 1).collect();
/// assert_eq!(all, vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
/// ```
pub fn full_index_range(nid: usize, dim: usize, start: usize) -> FullIndices {
    IndexSpace::new(nid, dim, start).full_range()
}

/// Canonical tuples of `space` under `spec`
///
/// ```
/// use symcomp_index::{canonical_index_range, IndexSpace, SymmetrySpec};
///
/// let spec = SymmetrySpec::fully_antisymmetric(2);
/// let pairs: Vec<_> = canonical_index_range(IndexSpace::new(2, 3, 0), &spec).collect();
/// assert_eq!(pairs, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
/// ```
pub fn canonical_index_range(
    space: IndexSpace,
    spec: &SymmetrySpec,
) -> impl Iterator<Item = Vec<usize>> + '_ {
    space.canonical_range(spec)
}

/// Odometer over an [IndexSpace]
///
/// The last slot runs fastest. With `nid = 0` the single empty tuple is
/// produced; with `dim = 0` and `nid > 0` nothing is produced.
#[derive(Debug, Clone)]
pub struct FullIndices {
    current: Option<Vec<usize>>,
    start: usize,
    end: usize,
}

impl FullIndices {
    fn new(space: IndexSpace) -> Self {
        let range = space.range();
        let current = if range.is_empty() && space.nid > 0 {
            None
        } else {
            Some(vec![range.start; space.nid])
        };
        FullIndices {
            current,
            start: range.start,
            end: range.end,
        }
    }
}

impl Iterator for FullIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let mut next = current.clone();
        for pos in (0..next.len()).rev() {
            if next[pos] + 1 < self.end {
                next[pos] += 1;
                self.current = Some(next);
                return Some(current);
            }
            next[pos] = self.start;
        }
        // every slot wrapped around: this was the last tuple
        Some(current)
    }
}
