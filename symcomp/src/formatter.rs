//! Presentation hook for component values

use std::{fmt, sync::Arc};

/// Function formatting a component value, with an optional format name
///
/// Formatters compare equal only if they are clones of the same formatter.
pub struct OutputFormatter<T>(Arc<dyn Fn(&T, Option<&str>) -> String + Send + Sync>);

impl<T> OutputFormatter<T> {
    pub fn new(f: impl Fn(&T, Option<&str>) -> String + Send + Sync + 'static) -> Self {
        OutputFormatter(Arc::new(f))
    }

    pub fn format(&self, value: &T, format: Option<&str>) -> String {
        (self.0)(value, format)
    }
}

impl<T> Clone for OutputFormatter<T> {
    fn clone(&self) -> Self {
        OutputFormatter(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for OutputFormatter<T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl<T> fmt::Debug for OutputFormatter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutputFormatter({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}
