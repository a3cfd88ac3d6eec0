use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An opaque, executor-defined handle describing how to resolve a field.
///
/// The schema only stores and forwards resolvers: it never calls them.
/// Two resolvers are equal if they are clones of the same handle.
#[derive(Clone)]
pub struct Resolver(Arc<dyn Any + Send + Sync>);

impl Resolver {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns the wrapped value if it has type `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Returns whether two resolvers are clones of the same handle
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Resolver {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Resolver {}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resolver({:p})", Arc::as_ptr(&self.0))
    }
}
