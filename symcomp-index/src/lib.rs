#![cfg_attr(
    doc,
    feature(prelude_import, custom_inner_attributes, proc_macro_hygiene)
)]
#![cfg_attr(doc, katexit::katexit)]
//! Index bookkeeping for sparse tensor components
//!
//! Components of a tensor $T$ with respect to a frame of length $n$ are labelled
//! by tuples $(i_1, \ldots, i_p)$ where every $i_k$ runs over
//! $\\{ s, s + 1, \ldots, s + n - 1 \\}$ for some start index $s$.
//! This crate enumerates such tuples ([IndexSpace]) and describes
//! symmetries among index positions ([SymmetrySpec]).
//!
//! Symmetries and canonical forms
//! ------------------------------
//! A symmetric group of positions, e.g. positions 0 and 1, states
//! $$
//! T_{ij\ldots} = T_{ji\ldots},
//! $$
//! and an antisymmetric one states
//! $$
//! T_{ij\ldots} = - T_{ji\ldots}.
//! $$
//! More generally, permuting the values inside an antisymmetric group
//! multiplies the component by the sign of the permutation, so that
//! $T_{ii\ldots} = 0$.
//!
//! Only one representative per class of tuples related by these identities
//! needs to be stored. We choose the *canonical* one: values ascending within
//! every symmetric group and strictly ascending within every antisymmetric
//! group. [SymmetrySpec::canonicalize] maps any tuple to its canonical form and
//! the sign relating both components, or reports that the component vanishes.
//!
//! Counting
//! --------
//! With $p$ indices, the fully symmetric case keeps
//! $\binom{n + p - 1}{p}$ canonical tuples out of $n^p$,
//! and the fully antisymmetric case keeps $\binom{n}{p}$.
//!

pub mod error;
pub mod parser;
pub mod permutation;
pub mod space;
pub mod symmetry;

pub use error::{IndexError, Result};
pub use permutation::{factorial, sorting_sign, Permutations, Sign};
pub use space::{canonical_index_range, full_index_range, FullIndices, IndexSpace};
pub use symmetry::{Extension, Group, GroupKind, SymmetrySpec, Variant};
