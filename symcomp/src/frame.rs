//! Frames with respect to which components are defined

use std::{fmt, sync::Arc};

/// Ordered finite family, e.g. a basis of a vector space or a vector frame
///
/// Only its length matters for the components: it fixes the range of every
/// index.
pub trait Frame: fmt::Debug + fmt::Display + Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared handle to a [Frame]
///
/// Two handles are equal only if they refer to the same frame object,
/// structurally identical frames created separately are different.
///
/// ```
/// use symcomp::{Basis, FrameRef};
///
/// let e = FrameRef::new(Basis::new("e", 3));
/// assert_eq!(e, e.clone());
/// assert_ne!(e, FrameRef::new(Basis::new("e", 3)));
/// ```
#[derive(Clone)]
pub struct FrameRef(Arc<dyn Frame>);

impl FrameRef {
    pub fn new<F: Frame + 'static>(frame: F) -> Self {
        FrameRef(Arc::new(frame))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for FrameRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl Eq for FrameRef {}

impl fmt::Debug for FrameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for FrameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Frame of `dim` vectors named after a common symbol, `(e_0,e_1,e_2)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    symbol: String,
    dim: usize,
}

impl Basis {
    pub fn new(symbol: impl Into<String>, dim: usize) -> Self {
        Basis {
            symbol: symbol.into(),
            dim,
        }
    }
}

impl Frame for Basis {
    fn len(&self) -> usize {
        self.dim
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for i in 0..self.dim {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}_{}", self.symbol, i)?;
        }
        write!(f, ")")
    }
}
