//! A powerset abstract domain, generic over the representation of its sets.
//!
//! [PowersetDomain] approximates the sets of facts which hold at some program point, ordered by
//! inclusion. The concrete sets are stored in any type implementing [SetRepr], and the wrapper
//! extends the (unbounded) lattice of those sets with explicit bounds:
//!
//! * `Bottom` is strictly less than every set, _including_ the empty set. An empty set of facts
//!   at a reachable program point is very different from a program point that is unreachable.
//! * `Top` is strictly greater than every set, and stands for "any fact may hold".
//!
//! ## Element access on the bounds
//!
//! Membership and mutation are only truly meaningful for concrete sets. For the bounds, the
//! following conventions hold, and are relied upon by transfer functions which operate on the
//! wrapper without first checking its kind:
//!
//! | operation    | `Bottom`   | `Top`   | `Value` |
//! |--------------|------------|---------|---------|
//! | `contains`   | `false`    | `true`  | member  |
//! | `add`        | no-op      | no-op   | insert  |
//! | `remove`     | no-op      | no-op   | remove  |
//! | `size`       | `Some(0)`  | `None`  | `Some`  |
//! | `elements`   | `Some([])` | `None`  | `Some`  |
//! | `iter`       | empty      | `None`  | `Some`  |
//!
//! Adding to `Bottom` is a no-op because transfer functions applied to an unreachable state
//! must keep it unreachable, and removing from `Top` is a no-op because the complement of a
//! single element cannot be represented, so `Top` remains the sound approximation. The strict
//! accessors ([PowersetDomain::try_add], [PowersetDomain::try_elements]) instead return
//! [DomainError::NotAValue] for both bounds.
mod hashed;
mod sparse_set;

use alloc::vec::Vec;
use core::fmt;

pub use self::{
    hashed::{HashedSetAbstractDomain, HashedSetValue},
    sparse_set::{SparseSetAbstractDomain, SparseSetValue},
};
use crate::{AbstractDomain, AbstractValueKind, ChangeResult, DomainError};

/// The contract a set representation must fulfill to be used as the value of a
/// [PowersetDomain].
///
/// All operations are performed in place. The lattice combinators return the kind of the
/// result, which allows a representation to collapse to one of the bounds of the domain, e.g. a
/// bounded representation that overflows may return [AbstractValueKind::Top]. The
/// representations in this crate always return [AbstractValueKind::Value].
pub trait SetRepr: Clone + fmt::Debug + fmt::Display {
    type Element: Copy + Eq + fmt::Debug;

    /// An iterator over the elements currently in the set
    type Iter<'a>: Iterator<Item = Self::Element>
    where
        Self: 'a;

    /// Returns true if `element` is in this set
    fn contains(&self, element: Self::Element) -> bool;

    /// Insert `element` in this set.
    ///
    /// Elements which cannot be represented by this set are silently ignored.
    fn add(&mut self, element: Self::Element) -> ChangeResult;

    /// Like [SetRepr::add], but returns an error if `element` cannot be represented by this set
    fn try_add(&mut self, element: Self::Element) -> Result<ChangeResult, DomainError> {
        Ok(self.add(element))
    }

    /// Remove `element` from this set, if present
    fn remove(&mut self, element: Self::Element) -> ChangeResult;

    /// Remove all elements of this set
    fn clear(&mut self);

    /// The number of elements in this set
    fn size(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn iter(&self) -> Self::Iter<'_>;

    fn elements(&self) -> Vec<Self::Element> {
        self.iter().collect()
    }

    /// Returns true if this set is a subset of `other`
    fn leq(&self, other: &Self) -> bool;

    /// Returns true if this set contains exactly the same elements as `other`
    fn equals(&self, other: &Self) -> bool {
        self.size() == other.size() && self.leq(other)
    }

    /// Add all elements of `other` to this set
    fn join_with(&mut self, other: &Self) -> AbstractValueKind;

    #[inline]
    fn widen_with(&mut self, other: &Self) -> AbstractValueKind {
        self.join_with(other)
    }

    /// Remove all elements from this set which are not in `other`
    fn meet_with(&mut self, other: &Self) -> AbstractValueKind;

    #[inline]
    fn narrow_with(&mut self, other: &Self) -> AbstractValueKind {
        self.meet_with(other)
    }
}

/// A powerset abstract domain over the sets represented by `S`.
///
/// See the [module documentation](self) for the semantics of element access on the bounds.
#[derive(Clone, Debug, Default)]
pub enum PowersetDomain<S> {
    /// No possible concrete state. This is the default state.
    #[default]
    Bottom,
    /// A concrete set of facts
    Value(S),
    /// Any fact may hold
    Top,
}

impl<S: SetRepr> PowersetDomain<S> {
    /// Construct a new domain element from the concrete set `value`
    #[inline]
    pub const fn new(value: S) -> Self {
        Self::Value(value)
    }

    /// Get a reference to the concrete set, if this is not one of the bounds
    pub fn as_value(&self) -> Option<&S> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Get a mutable reference to the concrete set, if this is not one of the bounds
    pub fn as_value_mut(&mut self) -> Option<&mut S> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<S> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Replace this domain element with the concrete set `value`
    pub fn set_to_value(&mut self, value: S) {
        *self = Self::Value(value);
    }

    /// Returns true if `element` may be in the set, i.e. `Top` contains everything
    pub fn contains(&self, element: S::Element) -> bool {
        match self {
            Self::Bottom => false,
            Self::Value(value) => value.contains(element),
            Self::Top => true,
        }
    }

    /// Insert `element` in the concrete set. This is a no-op on the bounds.
    pub fn add(&mut self, element: S::Element) -> ChangeResult {
        match self {
            Self::Value(value) => value.add(element),
            bound => {
                log::trace!(
                    target: "dataflow:domain",
                    "ignoring insertion of {element:?} in {}",
                    bound.kind()
                );
                ChangeResult::Unchanged
            }
        }
    }

    /// Insert `element` in the concrete set.
    ///
    /// Returns an error if this is one of the bounds, or if the representation cannot hold
    /// `element`.
    pub fn try_add(&mut self, element: S::Element) -> Result<ChangeResult, DomainError> {
        match self {
            Self::Value(value) => value.try_add(element),
            bound => Err(DomainError::NotAValue(bound.kind())),
        }
    }

    /// Remove `element` from the concrete set. This is a no-op on the bounds.
    pub fn remove(&mut self, element: S::Element) -> ChangeResult {
        match self {
            Self::Value(value) => value.remove(element),
            _ => ChangeResult::Unchanged,
        }
    }

    /// Insert all of `elements` in the concrete set, returning whether any of them was new
    pub fn add_all<I>(&mut self, elements: I) -> ChangeResult
    where
        I: IntoIterator<Item = S::Element>,
    {
        let mut result = ChangeResult::Unchanged;
        for element in elements {
            result |= self.add(element);
        }
        result
    }

    /// Remove all of `elements` from the concrete set, returning whether any of them was present
    pub fn remove_all<I>(&mut self, elements: I) -> ChangeResult
    where
        I: IntoIterator<Item = S::Element>,
    {
        let mut result = ChangeResult::Unchanged;
        for element in elements {
            result |= self.remove(element);
        }
        result
    }

    /// The number of elements in the set, or `None` if this is `Top`
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Bottom => Some(0),
            Self::Value(value) => Some(value.size()),
            Self::Top => None,
        }
    }

    /// Iterate over the elements of the set, or `None` if this is `Top`
    pub fn iter(&self) -> Option<Iter<'_, S>> {
        match self {
            Self::Bottom => Some(Iter { inner: None }),
            Self::Value(value) => Some(Iter {
                inner: Some(value.iter()),
            }),
            Self::Top => None,
        }
    }

    /// Collect the elements of the set, or `None` if this is `Top`
    pub fn elements(&self) -> Option<Vec<S::Element>> {
        self.iter().map(|iter| iter.collect())
    }

    /// Collect the elements of the concrete set, or return an error if this is one of the bounds
    pub fn try_elements(&self) -> Result<Vec<S::Element>, DomainError> {
        match self {
            Self::Value(value) => Ok(value.elements()),
            bound => Err(DomainError::NotAValue(bound.kind())),
        }
    }

    /// Adopt the kind reported by a combinator of the underlying representation
    fn normalize(&mut self, kind: AbstractValueKind) {
        match kind {
            AbstractValueKind::Bottom => self.set_to_bottom(),
            AbstractValueKind::Top => self.set_to_top(),
            AbstractValueKind::Value => (),
        }
    }

    fn upper_bound_with<F>(&mut self, other: &Self, combine: F)
    where
        F: FnOnce(&mut S, &S) -> AbstractValueKind,
    {
        match other {
            Self::Bottom => (),
            Self::Top => self.set_to_top(),
            Self::Value(rhs) => match self {
                Self::Bottom => *self = Self::Value(rhs.clone()),
                Self::Value(lhs) => {
                    let kind = combine(lhs, rhs);
                    self.normalize(kind);
                }
                Self::Top => (),
            },
        }
    }

    fn lower_bound_with<F>(&mut self, other: &Self, combine: F)
    where
        F: FnOnce(&mut S, &S) -> AbstractValueKind,
    {
        match other {
            Self::Bottom => self.set_to_bottom(),
            Self::Top => (),
            Self::Value(rhs) => match self {
                Self::Bottom => (),
                Self::Value(lhs) => {
                    let kind = combine(lhs, rhs);
                    self.normalize(kind);
                }
                Self::Top => *self = Self::Value(rhs.clone()),
            },
        }
    }
}

impl<S: SetRepr> AbstractDomain for PowersetDomain<S> {
    #[inline]
    fn bottom() -> Self {
        Self::Bottom
    }

    #[inline]
    fn top() -> Self {
        Self::Top
    }

    fn kind(&self) -> AbstractValueKind {
        match self {
            Self::Bottom => AbstractValueKind::Bottom,
            Self::Value(_) => AbstractValueKind::Value,
            Self::Top => AbstractValueKind::Top,
        }
    }

    #[inline]
    fn set_to_bottom(&mut self) {
        *self = Self::Bottom;
    }

    #[inline]
    fn set_to_top(&mut self) {
        *self = Self::Top;
    }

    fn leq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bottom, _) | (_, Self::Top) => true,
            (Self::Top, _) | (Self::Value(_), Self::Bottom) => false,
            (Self::Value(lhs), Self::Value(rhs)) => lhs.leq(rhs),
        }
    }

    fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bottom, Self::Bottom) | (Self::Top, Self::Top) => true,
            (Self::Value(lhs), Self::Value(rhs)) => lhs.equals(rhs),
            _ => false,
        }
    }

    fn join_with(&mut self, other: &Self) {
        self.upper_bound_with(other, S::join_with)
    }

    fn widen_with(&mut self, other: &Self) {
        self.upper_bound_with(other, S::widen_with)
    }

    fn meet_with(&mut self, other: &Self) {
        self.lower_bound_with(other, S::meet_with)
    }

    fn narrow_with(&mut self, other: &Self) {
        self.lower_bound_with(other, S::narrow_with)
    }
}

impl<S: SetRepr> From<S> for PowersetDomain<S> {
    #[inline]
    fn from(value: S) -> Self {
        Self::Value(value)
    }
}

impl<S: SetRepr> Extend<S::Element> for PowersetDomain<S> {
    fn extend<I: IntoIterator<Item = S::Element>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<S: SetRepr> Eq for PowersetDomain<S> {}
impl<S: SetRepr> PartialEq for PowersetDomain<S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<S: SetRepr> fmt::Display for PowersetDomain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt::Display::fmt(value, f),
            bound => fmt::Display::fmt(&bound.kind(), f),
        }
    }
}

/// An iterator over the elements of a [PowersetDomain] which is not `Top`
pub struct Iter<'a, S: SetRepr + 'a> {
    inner: Option<S::Iter<'a>>,
}

impl<'a, S: SetRepr + 'a> Iterator for Iter<'a, S> {
    type Item = S::Element;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}
