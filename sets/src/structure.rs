//! The canonical-structure pattern: a zero-sized "structure" value carries the
//! operations for a type, so that e.g. `Rational` and its ring operations are
//! associated via a trait rather than through virtual dispatch.

use std::marker::PhantomData;
use std::rc::Rc;

/// Marker trait for a value that describes how to operate on some underlying set.
pub trait Structure: Clone + PartialEq + Eq + std::fmt::Debug {}

/// A [`Structure`] that names the set of elements it describes.
pub trait SetStructure: Structure {
    type Set: Clone;
}

/// A [`SetStructure`] that can decide equality of its elements.
///
/// Most `Set`s already implement [`PartialEq`]; this exists for structures
/// whose notion of equality is semantic rather than structural (real
/// algebraic numbers compare this way: two different interval
/// representations can denote the same real number).
pub trait EqStructure: SetStructure {
    fn equal(&self, a: &Self::Set, b: &Self::Set) -> bool;
}

/// A type with one canonical [`SetStructure`], obtainable without extra context.
pub trait MetaType: Sized + Clone {
    type Structure: SetStructure<Set = Self>;

    fn structure() -> Rc<Self::Structure>;
}

/// The trivial structure carried by types whose operations live as inherent
/// methods rather than behind a structure value (e.g. [`ratcad_nzq::Rational`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannonicalStructure<T: Clone> {
    _ghost: PhantomData<T>,
}

impl<T: Clone> CannonicalStructure<T> {
    pub fn new() -> Self {
        Self {
            _ghost: PhantomData,
        }
    }
}

impl<T: Clone> Default for CannonicalStructure<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + Eq + std::fmt::Debug> Structure for CannonicalStructure<T> {}

impl<T: Clone + PartialEq + Eq + std::fmt::Debug> SetStructure for CannonicalStructure<T> {
    type Set = T;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Example(i32);

    impl MetaType for Example {
        type Structure = CannonicalStructure<Example>;

        fn structure() -> Rc<Self::Structure> {
            CannonicalStructure::new().into()
        }
    }

    #[test]
    fn structure_is_reusable() {
        let s1 = Example::structure();
        let s2 = Example::structure();
        assert_eq!(*s1, *s2);
    }
}
