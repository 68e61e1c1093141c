use core::fmt;

use crate::{AbstractDomain, ChangeResult, DomainConfig};

/// The abstract state of a single program point, as tracked by a fixed-point solver.
///
/// This wraps an [AbstractDomain] value, and applies the lattice combinators to it in place,
/// reporting whether the value changed, so that the solver knows whether the successors of the
/// program point must be revisited.
///
/// It also tracks how many times the state was updated via [DomainState::update], so as to
/// switch from `join` to `widen` once the configured widening delay has elapsed, which is what
/// guarantees termination at loop heads for domains of infinite height.
pub struct DomainState<D> {
    value: D,
    config: DomainConfig,
    updates: u32,
}

impl<D: AbstractDomain> Default for DomainState<D> {
    fn default() -> Self {
        Self::new(D::bottom())
    }
}

impl<D: AbstractDomain> DomainState<D> {
    /// Construct a new [DomainState] holding `value`, using the default configuration
    pub fn new(value: D) -> Self {
        Self::with_config(value, DomainConfig::default())
    }

    pub fn with_config(value: D, config: DomainConfig) -> Self {
        Self {
            value,
            config,
            updates: 0,
        }
    }

    /// Get a reference to the underlying domain value
    #[inline]
    pub fn value(&self) -> &D {
        &self.value
    }

    /// Get a mutable reference to the underlying domain value
    #[inline]
    pub fn value_mut(&mut self) -> &mut D {
        &mut self.value
    }

    #[inline]
    pub fn into_value(self) -> D {
        self.value
    }

    #[inline]
    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    /// The number of times this state was updated via [DomainState::update]
    #[inline]
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Reset this state to _bottom_, as if it had never been updated
    pub fn reset(&mut self) {
        self.value.set_to_bottom();
        self.updates = 0;
    }

    /// Returns true if `next` would not change this state, i.e. the analysis has converged at
    /// this program point.
    #[inline]
    pub fn is_stable(&self, next: &D) -> bool {
        next.leq(&self.value)
    }

    /// Join `rhs` with this state, returning whether or not a change was made
    pub fn join(&mut self, rhs: &D) -> ChangeResult {
        let prev = self.value.clone();
        self.value.join_with(rhs);
        debug_assert!(prev.leq(&self.value), "expected `join` to be monotonic");
        debug_assert!(rhs.leq(&self.value), "expected `join` to be an upper bound");
        Self::compare(&prev, &self.value)
    }

    /// Widen this state with `rhs`, returning whether or not a change was made
    pub fn widen(&mut self, rhs: &D) -> ChangeResult {
        let prev = self.value.clone();
        self.value.widen_with(rhs);
        debug_assert!(prev.leq(&self.value), "expected `widen` to be monotonic");
        debug_assert!(rhs.leq(&self.value), "expected `widen` to be an upper bound");
        Self::compare(&prev, &self.value)
    }

    /// Meet `rhs` with this state, returning whether or not a change was made
    pub fn meet(&mut self, rhs: &D) -> ChangeResult {
        let prev = self.value.clone();
        self.value.meet_with(rhs);
        debug_assert!(self.value.leq(&prev), "expected `meet` to be monotonic");
        debug_assert!(self.value.leq(rhs), "expected `meet` to be a lower bound");
        Self::compare(&prev, &self.value)
    }

    /// Narrow this state with `rhs`, returning whether or not a change was made
    ///
    /// Narrowing only has to stay between `meet(self, rhs)` and `self`, so unlike [Self::meet],
    /// the result is not required to be a lower bound of `rhs`.
    pub fn narrow(&mut self, rhs: &D) -> ChangeResult {
        let prev = self.value.clone();
        self.value.narrow_with(rhs);
        debug_assert!(self.value.leq(&prev), "expected `narrow` to be monotonic");
        Self::compare(&prev, &self.value)
    }

    /// Merge `rhs` into this state, as done by a solver at a control flow join point.
    ///
    /// The first [DomainConfig::widening_delay] updates use `join`, all subsequent updates use
    /// `widen`.
    pub fn update(&mut self, rhs: &D) -> ChangeResult {
        let widening = self.updates >= self.config.widening_delay();
        self.updates = self.updates.saturating_add(1);
        if widening {
            log::trace!(
                target: "dataflow:state",
                "widening state after {} updates: {:?} with {rhs:?}",
                self.updates - 1,
                &self.value
            );
            self.widen(rhs)
        } else {
            self.join(rhs)
        }
    }

    #[inline]
    fn compare(prev: &D, next: &D) -> ChangeResult {
        (!prev.equals(next)).into()
    }
}

impl<D: fmt::Debug> fmt::Debug for DomainState<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl<D: fmt::Display> fmt::Display for DomainState<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
