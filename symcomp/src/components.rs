//! Sparse storage of components with respect to a frame

use crate::{
    error::{Error, Result},
    formatter::OutputFormatter,
    frame::FrameRef,
    ring::Ring,
};
use ndarray::{ArrayD, Dimension, IxDyn};
use std::{collections::BTreeMap, fmt};
use symcomp_index::{FullIndices, Group, IndexError, IndexSpace, SymmetrySpec, Variant};

/// Components of a tensor, or of any indexed quantity, with respect to a frame
///
/// Only nonzero components are stored, keyed by their canonical index tuple
/// under the symmetries of the store, see [SymmetrySpec::canonicalize].
/// A missing key means the component is zero.
///
/// ```
/// use symcomp::{Basis, Components, FrameRef};
///
/// let e = FrameRef::new(Basis::new("e", 3));
/// let mut a = Components::<i64>::fully_antisymmetric(e, 2, 1);
/// a.set(&[1, 2], 3).unwrap();
/// assert_eq!(a.get(&[2, 1]).unwrap(), -3);
/// assert_eq!(a.get(&[2, 2]).unwrap(), 0);
/// assert_eq!(a.stored_len(), 1);
/// ```
#[derive(Clone)]
pub struct Components<T> {
    frame: FrameRef,
    space: IndexSpace,
    spec: SymmetrySpec,
    formatter: Option<OutputFormatter<T>>,
    comp: BTreeMap<Vec<usize>, T>,
}

impl<T: Ring> Components<T> {
    /// Components without any symmetry, all zero
    pub fn new(frame: FrameRef, nid: usize, start_index: usize) -> Self {
        Self::from_spec(frame, start_index, SymmetrySpec::none(nid))
    }

    /// Components with the given symmetries, all zero
    pub fn with_symmetry(
        frame: FrameRef,
        nid: usize,
        start_index: usize,
        spec: SymmetrySpec,
    ) -> Result<Self> {
        if spec.nid() != nid {
            return Err(IndexError::InvalidSymmetrySpec {
                reason: format!(
                    "declared for {} indices, while the components have {}",
                    spec.nid(),
                    nid
                ),
            }
            .into());
        }
        Ok(Self::from_spec(frame, start_index, spec))
    }

    /// Components with symmetric groups `sym` and antisymmetric groups `antisym`
    ///
    /// ```
    /// use symcomp::{Basis, Components, FrameRef, Variant};
    ///
    /// let e = FrameRef::new(Basis::new("e", 3));
    /// let c = Components::<f64>::with_groups(e.clone(), 3, 0, vec![vec![0, 1]], vec![]).unwrap();
    /// assert_eq!(c.variant(), Variant::WithSym);
    ///
    /// // position 1 declared twice
    /// assert!(Components::<f64>::with_groups(e, 3, 0, vec![vec![0, 1]], vec![vec![1, 2]]).is_err());
    /// ```
    pub fn with_groups(
        frame: FrameRef,
        nid: usize,
        start_index: usize,
        sym: Vec<Group>,
        antisym: Vec<Group>,
    ) -> Result<Self> {
        let spec = SymmetrySpec::new(nid, sym, antisym)?;
        Ok(Self::from_spec(frame, start_index, spec))
    }

    /// Fully symmetric components, all zero
    pub fn fully_symmetric(frame: FrameRef, nid: usize, start_index: usize) -> Self {
        Self::from_spec(frame, start_index, SymmetrySpec::fully_symmetric(nid))
    }

    /// Fully antisymmetric components, all zero
    pub fn fully_antisymmetric(frame: FrameRef, nid: usize, start_index: usize) -> Self {
        Self::from_spec(frame, start_index, SymmetrySpec::fully_antisymmetric(nid))
    }

    fn from_spec(frame: FrameRef, start_index: usize, spec: SymmetrySpec) -> Self {
        let space = IndexSpace::new(spec.nid(), frame.len(), start_index);
        Components {
            frame,
            space,
            spec,
            formatter: None,
            comp: BTreeMap::new(),
        }
    }

    /// Attach a formatter used by [Components::display_component]
    pub fn with_formatter(mut self, formatter: OutputFormatter<T>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Empty components sharing frame, start index and formatter with `self`
    pub(crate) fn with_spec(&self, spec: SymmetrySpec) -> Self {
        let mut result = Self::from_spec(self.frame.clone(), self.start_index(), spec);
        result.formatter = self.formatter.clone();
        result
    }

    /// Empty components of the same shape and symmetries
    pub(crate) fn new_instance(&self) -> Self {
        self.with_spec(self.spec.clone())
    }

    pub fn frame(&self) -> &FrameRef {
        &self.frame
    }

    /// Number of indices
    pub fn nid(&self) -> usize {
        self.space.nid()
    }

    /// Range size of a single index, i.e. the length of the frame
    pub fn dim(&self) -> usize {
        self.space.dim()
    }

    pub fn start_index(&self) -> usize {
        self.space.start()
    }

    pub fn space(&self) -> IndexSpace {
        self.space
    }

    pub fn symmetry(&self) -> &SymmetrySpec {
        &self.spec
    }

    pub fn variant(&self) -> Variant {
        self.spec.variant()
    }

    pub fn formatter(&self) -> Option<&OutputFormatter<T>> {
        self.formatter.as_ref()
    }

    /// Component at `indices`
    pub fn get(&self, indices: &[usize]) -> Result<T> {
        self.space.check(indices)?;
        if self.spec.is_trivial() {
            return Ok(self.comp.get(indices).cloned().unwrap_or_else(T::zero));
        }
        Ok(match self.spec.canonicalize(indices) {
            Some((sign, ind)) => self
                .comp
                .get(&ind)
                .map(|value| sign.apply(value.clone()))
                .unwrap_or_else(T::zero),
            None => T::zero(),
        })
    }

    /// Set the component at `indices`
    ///
    /// The signed value is stored under the canonical index, so that reading
    /// any index related by symmetry gives back the value with the right sign.
    /// Setting zero removes the entry. A nonzero value at an index with
    /// repeated values inside an antisymmetric group is rejected.
    ///
    /// ```
    /// use symcomp::{Basis, Components, Error, FrameRef};
    ///
    /// let e = FrameRef::new(Basis::new("e", 2));
    /// let mut a = Components::<i64>::fully_antisymmetric(e, 2, 0);
    /// assert!(matches!(a.set(&[1, 1], 5), Err(Error::AntisymmetryConflict { .. })));
    /// assert!(a.set(&[1, 1], 0).is_ok());
    /// ```
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        self.space.check(indices)?;
        match self.spec.canonicalize(indices) {
            Some((sign, ind)) => {
                self.insert(ind, sign.apply(value));
                Ok(())
            }
            None if value.equals_zero() => Ok(()),
            None => Err(Error::AntisymmetryConflict {
                indices: indices.to_vec(),
            }),
        }
    }

    /// Store `value` at the canonical index `ind`, dropping zeros
    pub(crate) fn insert(&mut self, ind: Vec<usize>, value: T) {
        if value.equals_zero() {
            self.comp.remove(&ind);
        } else {
            self.comp.insert(ind, value);
        }
    }

    pub(crate) fn stored(&self, ind: &[usize]) -> Option<&T> {
        self.comp.get(ind)
    }

    /// Stored (canonical index, value) pairs in lexicographic order
    pub fn entries(&self) -> impl Iterator<Item = (&[usize], &T)> {
        self.comp.iter().map(|(ind, value)| (ind.as_slice(), value))
    }

    /// Number of stored components
    pub fn stored_len(&self) -> usize {
        self.comp.len()
    }

    /// Exact copy, every value cloned
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Whether every component vanishes
    pub fn is_zero(&self) -> bool {
        self.comp.values().all(|value| value.equals_zero())
    }

    /// Every index tuple in lexicographic order
    pub fn full_index_range(&self) -> FullIndices {
        self.space.full_range()
    }

    /// Canonical index tuples only, one per symmetry class
    pub fn canonical_index_range(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        self.space.canonical_range(&self.spec)
    }

    /// Component at `indices` rendered by the formatter, or by [fmt::Debug]
    pub fn display_component(&self, indices: &[usize], format: Option<&str>) -> Result<String> {
        let value = self.get(indices)?;
        Ok(match &self.formatter {
            Some(formatter) => formatter.format(&value, format),
            None => format!("{:?}", value),
        })
    }

    pub(crate) fn check_compatible(&self, other: &Self, same_nid: bool) -> Result<()> {
        let reason = if other.frame != self.frame {
            "The two sets of components are not defined on the same frame".to_string()
        } else if same_nid && other.nid() != self.nid() {
            format!(
                "The two sets of components do not have the same number of indices: {} and {}",
                self.nid(),
                other.nid()
            )
        } else if other.start_index() != self.start_index() {
            format!(
                "The two sets of components do not have the same starting index: {} and {}",
                self.start_index(),
                other.start_index()
            )
        } else {
            return Ok(());
        };
        Err(Error::IncompatibleOperands { reason })
    }

    /// Exchange the index block `pos1..pos2` with the adjacent block `pos2..pos3`
    ///
    /// Symmetries follow the positions they were declared on.
    ///
    /// ```
    /// use symcomp::{Basis, Components, FrameRef};
    ///
    /// let e = FrameRef::new(Basis::new("e", 3));
    /// let mut c = Components::<i64>::new(e, 3, 0);
    /// c.set(&[0, 1, 2], 7).unwrap();
    /// let s = c.swap_adjacent_indices(0, 1, 3).unwrap();
    /// assert_eq!(s.get(&[1, 2, 0]).unwrap(), 7);
    /// ```
    pub fn swap_adjacent_indices(&self, pos1: usize, pos2: usize, pos3: usize) -> Result<Self> {
        let nid = self.nid();
        if !(pos1 < pos2 && pos2 < pos3 && pos3 <= nid) {
            return Err(Error::InvalidPositions {
                reason: format!(
                    "({}, {}, {}) do not delimit two adjacent index blocks among {} indices",
                    pos1, pos2, pos3, nid
                ),
            });
        }
        let reorder = |ind: &[usize]| -> Vec<usize> {
            ind[..pos1]
                .iter()
                .chain(&ind[pos2..pos3])
                .chain(&ind[pos1..pos2])
                .chain(&ind[pos3..])
                .copied()
                .collect()
        };
        // reordered[new] = old, inverted into new_position[old] = new
        let identity: Vec<usize> = (0..nid).collect();
        let reordered = reorder(&identity);
        let mut new_position = vec![0; nid];
        for (new, &old) in reordered.iter().enumerate() {
            new_position[old] = new;
        }
        let mut result = self.with_spec(self.spec.permuted(&new_position));
        for (ind, value) in &self.comp {
            result.set(&reorder(ind.as_slice()), value.clone())?;
        }
        Ok(result)
    }

    /// Every component as a dense array of shape `[dim; nid]`
    ///
    /// The array position `k` corresponds to the index `k + start_index`.
    ///
    /// ```
    /// use ndarray::array;
    /// use symcomp::{Basis, Components, FrameRef};
    ///
    /// let e = FrameRef::new(Basis::new("e", 2));
    /// let mut s = Components::<i64>::fully_symmetric(e, 2, 1);
    /// s.set(&[1, 2], 4).unwrap();
    /// assert_eq!(s.to_array().unwrap(), array![[0, 4], [4, 0]].into_dyn());
    /// ```
    pub fn to_array(&self) -> Result<ArrayD<T>> {
        let shape = vec![self.dim(); self.nid()];
        let values = self
            .full_index_range()
            .map(|ind| self.get(&ind))
            .collect::<Result<Vec<T>>>()?;
        let actual = values.len();
        ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| Error::ShapeMismatch {
            expected: shape.clone(),
            actual: vec![actual],
        })
    }

    /// Set every component from a dense array of shape `[dim; nid]`
    pub fn set_from_array(&mut self, array: &ArrayD<T>) -> Result<()> {
        let expected = vec![self.dim(); self.nid()];
        if array.shape() != expected.as_slice() {
            return Err(Error::ShapeMismatch {
                expected,
                actual: array.shape().to_vec(),
            });
        }
        let start = self.start_index();
        for (position, value) in array.indexed_iter() {
            let ind: Vec<usize> = position.slice().iter().map(|k| k + start).collect();
            self.set(&ind, value.clone())?;
        }
        Ok(())
    }
}

impl<T: Ring> PartialEq for Components<T> {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.nid() == other.nid()
            && self.start_index() == other.start_index()
            && self.formatter == other.formatter
            && self
                .try_sub(other)
                .map(|diff| diff.is_zero())
                .unwrap_or(false)
    }
}

impl<T: fmt::Debug> fmt::Debug for Components<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Components")
            .field("frame", &self.frame)
            .field("space", &self.space)
            .field("symmetry", &self.spec.to_string())
            .field("comp", &self.comp)
            .finish()
    }
}

fn position_tuple(group: &[usize]) -> String {
    let positions: Vec<String> = group.iter().map(|pos| pos.to_string()).collect();
    format!("({})", positions.join(", "))
}

/// Description, e.g. `2-indices components w.r.t. (e_0,e_1,e_2)`
impl<T> fmt::Display for Components<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nid = self.space.nid();
        let indices = if nid == 1 {
            "1-index".to_string()
        } else {
            format!("{}-indices", nid)
        };
        match self.spec.variant() {
            Variant::FullySym => write!(
                f,
                "fully symmetric {} components w.r.t. {}",
                indices, self.frame
            ),
            Variant::FullyAntiSym => write!(
                f,
                "fully antisymmetric {} components w.r.t. {}",
                indices, self.frame
            ),
            Variant::Plain | Variant::WithSym => {
                write!(f, "{} components w.r.t. {}", indices, self.frame)?;
                for group in self.spec.sym() {
                    write!(
                        f,
                        ", with symmetry on the index positions {}",
                        position_tuple(group)
                    )?;
                }
                for group in self.spec.antisym() {
                    write!(
                        f,
                        ", with antisymmetry on the index positions {}",
                        position_tuple(group)
                    )?;
                }
                Ok(())
            }
        }
    }
}
