/// Configuration for how a [DomainState](crate::DomainState) is updated by a solver.
#[derive(Debug, Clone)]
pub struct DomainConfig {
    /// The number of updates of a state which use `join`, before switching to `widen`
    widening_delay: u32,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            widening_delay: Self::DEFAULT_WIDENING_DELAY,
        }
    }
}

impl DomainConfig {
    pub const DEFAULT_WIDENING_DELAY: u32 = 2;

    /// Get a new, default configuration
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub const fn widening_delay(&self) -> u32 {
        self.widening_delay
    }

    /// Set the number of updates of a state which are computed using `join`.
    ///
    /// Once a state has been updated this many times, subsequent updates use `widen`. Delaying
    /// widening can result in more precise results for domains with a widening operator that
    /// differs from `join`, at the cost of more iterations before the fixpoint is reached. A
    /// delay of zero widens on every update.
    pub fn set_widening_delay(&mut self, delay: u32) -> &mut Self {
        self.widening_delay = delay;
        self
    }
}
