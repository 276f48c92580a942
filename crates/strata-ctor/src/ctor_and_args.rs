//! The (constructor, arguments) pair handed to collection builders.

use std::fmt;

use crate::args::ArgList;
use crate::descriptor::CtorDescriptor;

/// A constructor descriptor bound to the arguments for one element.
///
/// Providers issue one of these per position. Builders invoke it and may
/// hand it back to the provider's recycle path so its allocations can be
/// reused for the next position.
pub struct CtorAndArgs<T, A> {
    ctor: CtorDescriptor<T, A>,
    args: ArgList<A>,
}

impl<T, A> CtorAndArgs<T, A> {
    /// Bind `ctor` to `args`.
    pub fn new(ctor: CtorDescriptor<T, A>, args: ArgList<A>) -> Self {
        Self { ctor, args }
    }

    /// The bound constructor.
    pub fn constructor(&self) -> &CtorDescriptor<T, A> {
        &self.ctor
    }

    /// The argument list.
    pub fn args(&self) -> &ArgList<A> {
        &self.args
    }

    /// Mutable access to the argument list.
    pub fn args_mut(&mut self) -> &mut ArgList<A> {
        &mut self.args
    }

    /// Replace the argument list.
    pub fn set_args(&mut self, args: ArgList<A>) {
        self.args = args;
    }

    /// Move the argument list out, leaving an empty one behind.
    pub fn take_args(&mut self) -> ArgList<A> {
        std::mem::take(&mut self.args)
    }

    /// The position tuple carried in `slot`, if any.
    pub fn position(&self, slot: usize) -> Option<&[u64]> {
        self.args.position(slot)
    }

    /// Invoke the bound constructor with the bound arguments.
    pub fn construct(&self) -> Result<T, String> {
        self.ctor.construct(&self.args)
    }
}

impl<T, A: Clone> Clone for CtorAndArgs<T, A> {
    fn clone(&self) -> Self {
        Self {
            ctor: self.ctor.clone(),
            args: self.args.clone(),
        }
    }
}

impl<T, A: fmt::Debug> fmt::Debug for CtorAndArgs<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtorAndArgs")
            .field("ctor", &self.ctor)
            .field("args", &self.args)
            .finish()
    }
}
