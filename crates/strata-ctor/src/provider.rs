//! The provider abstraction used by collection builders.

use crate::args::ArgList;
use crate::ctor_and_args::CtorAndArgs;
use crate::descriptor::CtorDescriptor;

/// Supplies a constructor and arguments for each element position.
///
/// Builders call [`get_for_index`](Self::get_for_index) once per element
/// and may pass the result back through [`recycle`](Self::recycle) after
/// constructing. Recycling is advisory: a provider may drop the wrapper.
pub trait CtorAndArgsProvider<T, A> {
    /// Constructor and arguments for the element at `position`
    /// (one index per dimension).
    fn get_for_index(&self, position: &[u64]) -> CtorAndArgs<T, A>;

    /// Return a previously issued wrapper for reuse.
    fn recycle(&self, ctor_and_args: CtorAndArgs<T, A>) {
        drop(ctor_and_args);
    }
}

/// Applies one constructor with one fixed argument list to every element.
pub struct ConstantCtorProvider<T, A> {
    template: CtorAndArgs<T, A>,
}

impl<T, A> ConstantCtorProvider<T, A> {
    /// Use `ctor` with `args` for every position.
    pub fn new(ctor: CtorDescriptor<T, A>, args: ArgList<A>) -> Self {
        Self {
            template: CtorAndArgs::new(ctor, args),
        }
    }

    /// The constructor applied to every element.
    pub fn constructor(&self) -> &CtorDescriptor<T, A> {
        self.template.constructor()
    }
}

impl<T, A: Clone> CtorAndArgsProvider<T, A> for ConstantCtorProvider<T, A> {
    fn get_for_index(&self, _position: &[u64]) -> CtorAndArgs<T, A> {
        self.template.clone()
    }
}
