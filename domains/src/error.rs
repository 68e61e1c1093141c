use crate::AbstractValueKind;

/// Errors raised by the strict (`try_*`) variants of domain operations.
///
/// The regular operations never fail: out-of-universe insertions are ignored, and removals of
/// absent elements are no-ops. These errors exist for callers that want to treat such cases as
/// bugs in their transfer functions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("element {element} is outside of the universe [0, {capacity})")]
    OutOfUniverse { element: usize, capacity: usize },
    #[error(
        "a universe of {capacity} elements cannot be represented, the largest element of this \
         type is {max_element}"
    )]
    CapacityOverflow { capacity: usize, max_element: usize },
    #[error("expected a concrete set, but the abstract value is {0}")]
    NotAValue(AbstractValueKind),
}
