//! Opaque leaf payloads.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value the merge engine never looks inside.
///
/// Dates, compiled patterns, handles and class-like instances belong here.
/// Opaque values compare by identity and always classify as
/// [`crate::Kind::Other`], even when the payload happens to be a
/// [`crate::Record`].
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wrap `payload`.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            payload: Arc::new(payload),
        }
    }

    /// Name of the wrapped type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the payload as `T` when it has that type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Returns `true` when both handles share one payload.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.payload).cast::<()>().addr()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}
