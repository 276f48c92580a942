//! Constructor descriptors.
//!
//! A [`CtorDescriptor`] is the capability a provider binds once: given an
//! [`ArgList`] of the declared arity it produces one element. How the
//! element is actually built (a closure, a registry lookup, a copy of a
//! source element) is up to the [`ElementConstructor`] implementation.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::args::ArgList;

/// Something that can build one `T` from an argument list.
pub trait ElementConstructor<T, A>: Send + Sync {
    /// Number of arguments this constructor expects.
    fn arity(&self) -> usize;

    /// Build one element.
    ///
    /// Failures are reported as a human-readable reason; the builder wraps
    /// them with the element's position.
    fn construct(&self, args: &ArgList<A>) -> Result<T, String>;

    /// Name of the element type, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Shared handle to an [`ElementConstructor`].
///
/// Cloning is cheap. Two descriptors are the same capability only if they
/// were cloned from one another; see [`same_as`](Self::same_as).
pub struct CtorDescriptor<T, A> {
    inner: Arc<dyn ElementConstructor<T, A>>,
}

impl<T: 'static, A: 'static> CtorDescriptor<T, A> {
    /// Wrap a constructor implementation.
    pub fn new(ctor: impl ElementConstructor<T, A> + 'static) -> Self {
        Self {
            inner: Arc::new(ctor),
        }
    }

    /// Build a descriptor from a closure of the given arity.
    pub fn from_fn<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&ArgList<A>) -> Result<T, String> + Send + Sync + 'static,
    {
        Self::new(FnConstructor {
            arity,
            f,
            _marker: PhantomData,
        })
    }
}

impl<T, A> CtorDescriptor<T, A> {
    /// Number of arguments the constructor expects.
    pub fn arity(&self) -> usize {
        self.inner.arity()
    }

    /// Invoke the constructor.
    pub fn construct(&self, args: &ArgList<A>) -> Result<T, String> {
        self.inner.construct(args)
    }

    /// Name of the element type.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Whether `self` and `other` share the same underlying capability.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T, A> Clone for CtorDescriptor<T, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, A> fmt::Debug for CtorDescriptor<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtorDescriptor")
            .field("type", &self.type_name())
            .field("arity", &self.arity())
            .finish()
    }
}

struct FnConstructor<T, A, F> {
    arity: usize,
    f: F,
    _marker: PhantomData<fn(&ArgList<A>) -> T>,
}

impl<T, A, F> ElementConstructor<T, A> for FnConstructor<T, A, F>
where
    F: Fn(&ArgList<A>) -> Result<T, String> + Send + Sync,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn construct(&self, args: &ArgList<A>) -> Result<T, String> {
        (self.f)(args)
    }
}
