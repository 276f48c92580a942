//! Constructor argument lists.
//!
//! An [`ArgList`] is the ordered argument vector handed to an element
//! constructor. One slot may carry a [`Position`] tuple instead of a plain
//! value; providers overwrite that slot on every call.

use strata_core::Position;

/// A single constructor argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg<A> {
    /// A caller-supplied value, identical for every element.
    Value(A),
    /// The position tuple of the element being constructed.
    Position(Position),
}

impl<A> Arg<A> {
    /// The value, if this is a [`Arg::Value`].
    pub fn as_value(&self) -> Option<&A> {
        match self {
            Self::Value(v) => Some(v),
            Self::Position(_) => None,
        }
    }

    /// The position tuple, if this is a [`Arg::Position`].
    pub fn as_position(&self) -> Option<&[u64]> {
        match self {
            Self::Position(p) => Some(p),
            Self::Value(_) => None,
        }
    }
}

/// Ordered argument list for one constructor invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgList<A> {
    slots: Vec<Arg<A>>,
}

impl<A> ArgList<A> {
    /// Wrap an argument vector.
    pub fn new(slots: Vec<Arg<A>>) -> Self {
        Self { slots }
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the list holds no arguments.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The argument in `slot`.
    pub fn get(&self, slot: usize) -> Option<&Arg<A>> {
        self.slots.get(slot)
    }

    /// The plain value in `slot`, if that slot holds one.
    pub fn value(&self, slot: usize) -> Option<&A> {
        self.get(slot).and_then(Arg::as_value)
    }

    /// The position tuple in `slot`, if that slot holds one.
    pub fn position(&self, slot: usize) -> Option<&[u64]> {
        self.get(slot).and_then(Arg::as_position)
    }

    /// Move the position buffer out of `slot`, leaving an empty tuple
    /// behind. Returns `None` if `slot` does not hold a position.
    pub fn take_position(&mut self, slot: usize) -> Option<Position> {
        match self.slots.get_mut(slot) {
            Some(Arg::Position(p)) => Some(std::mem::take(p)),
            _ => None,
        }
    }

    /// Place `position` in `slot`, replacing whatever was there.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= self.len()`.
    pub fn set_position(&mut self, slot: usize, position: Position) {
        self.slots[slot] = Arg::Position(position);
    }

    /// Iterate over the arguments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arg<A>> {
        self.slots.iter()
    }
}

impl<A> Default for ArgList<A> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<A> FromIterator<Arg<A>> for ArgList<A> {
    fn from_iter<I: IntoIterator<Item = Arg<A>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<A> From<Vec<Arg<A>>> for ArgList<A> {
    fn from(slots: Vec<Arg<A>>) -> Self {
        Self::new(slots)
    }
}
