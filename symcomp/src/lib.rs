#![cfg_attr(
    doc,
    feature(prelude_import, custom_inner_attributes, proc_macro_hygiene)
)]
#![cfg_attr(doc, katexit::katexit)]
//! Sparse tensor components with symmetries
//!
//! Introduction
//! ------------
//! Once a frame $(e_1, \ldots, e_n)$ is fixed, a tensor with $p$ indices is
//! described by its $n^p$ components $T_{i_1 \cdots i_p}$. Most of them are
//! often zero, and many others are related by symmetries, e.g. a metric
//! $$
//! g_{ij} = g_{ji}
//! $$
//! or a 2-form
//! $$
//! \omega_{ij} = - \omega_{ji}.
//! $$
//! [Components] stores only the nonzero components with a canonical index
//! tuple, see [symcomp_index::SymmetrySpec::canonicalize], and derives every
//! other component on reading.
//!
//! Operations
//! ----------
//! - Reading and writing single components: [Components::get], [Components::set]
//! - Linear operations: [Components::try_add], [Components::try_sub],
//!   [Components::scale], [Components::divide], negation
//! - Tensor product $a \otimes b$: [Components::tensor_product]
//! - Contraction $\sum_i a_{\ldots i \ldots i \ldots}$:
//!   [Components::self_contract], [Components::contract]
//! - Symmetric and antisymmetric parts:
//!   [Components::symmetrize], [Components::antisymmetrize]
//!
//! Every binary operation requires both operands to share the same frame
//! (as an object, see [FrameRef]) and start index.
//!
//! ```
//! use num::rational::Rational64;
//! use symcomp::{Basis, Components, FrameRef};
//!
//! let e = FrameRef::new(Basis::new("e", 3));
//! let mut a = Components::new(e, 2, 1);
//! for i in 1..=3 {
//!     for j in 1..=3 {
//!         a.set(&[i, j], Rational64::from_integer((3 * (i - 1) + j) as i64)).unwrap();
//!     }
//! }
//! let trace = a.self_contract(0, 1).unwrap();
//! assert_eq!(trace.into_scalar(), Some(Rational64::from_integer(15)));
//! ```
//!

mod arithmetic;
mod components;
mod contraction;
mod delta;
mod error;
mod formatter;
mod frame;
mod ring;
mod symmetrize;

pub use components::Components;
pub use contraction::Contraction;
pub use delta::KroneckerDelta;
pub use error::{Error, Result};
pub use formatter::OutputFormatter;
pub use frame::{Basis, Frame, FrameRef};
pub use ring::Ring;
pub use symcomp_index::{
    canonical_index_range, full_index_range, IndexError, IndexSpace, Sign, SymmetrySpec, Variant,
};
