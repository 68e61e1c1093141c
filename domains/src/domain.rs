use core::fmt;

use crate::AbstractValueKind;

/// This trait must be implemented for any value that can be used as an abstract domain by a
/// fixed-point analysis.
///
/// An abstract domain is a [lattice](https://en.wikipedia.org/wiki/Lattice_(order)) with two
/// distinguished bounds:
///
/// * _Bottom_, the least element. It represents the absence of any possible concrete state, e.g.
///   the state of a program point which is unreachable. It is the initial state of all program
///   points when an analysis starts.
/// * _Top_, the greatest element. It represents the absence of any information, i.e. every
///   concrete state is possible.
///
/// In addition to the lattice operations `join` (least upper bound) and `meet` (greatest lower
/// bound), a domain provides `widen` and `narrow`, which a solver uses in place of `join` and
/// `meet` at loop heads, to guarantee that iteration terminates. For domains of finite height,
/// these are usually identical to `join` and `meet` respectively.
///
/// All operations modify `self` in place. The by-value variants are provided for convenience.
pub trait AbstractDomain: Clone + fmt::Debug {
    /// The least element of the domain
    fn bottom() -> Self;

    /// The greatest element of the domain
    fn top() -> Self;

    /// Get the kind of this value
    fn kind(&self) -> AbstractValueKind;

    #[inline]
    fn is_bottom(&self) -> bool {
        self.kind().is_bottom()
    }

    #[inline]
    fn is_top(&self) -> bool {
        self.kind().is_top()
    }

    #[inline]
    fn is_value(&self) -> bool {
        self.kind().is_value()
    }

    /// Reset this value to _bottom_, discarding its contents
    fn set_to_bottom(&mut self);

    /// Reset this value to _top_, discarding its contents
    fn set_to_top(&mut self);

    /// Returns true if `self` is less than or equal to `other` in the partial order of the domain
    fn leq(&self, other: &Self) -> bool;

    /// Returns true if `self` and `other` represent the same element of the domain
    fn equals(&self, other: &Self) -> bool;

    /// Replace `self` with the least upper bound of `self` and `other`
    fn join_with(&mut self, other: &Self);

    /// Replace `self` with the result of widening `self` with `other`
    fn widen_with(&mut self, other: &Self);

    /// Replace `self` with the greatest lower bound of `self` and `other`
    fn meet_with(&mut self, other: &Self);

    /// Replace `self` with the result of narrowing `self` with `other`
    fn narrow_with(&mut self, other: &Self);

    fn join(mut self, other: &Self) -> Self {
        self.join_with(other);
        self
    }

    fn widen(mut self, other: &Self) -> Self {
        self.widen_with(other);
        self
    }

    fn meet(mut self, other: &Self) -> Self {
        self.meet_with(other);
        self
    }

    fn narrow(mut self, other: &Self) -> Self {
        self.narrow_with(other);
        self
    }
}
