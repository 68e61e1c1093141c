use core::fmt;

/// The shape of an abstract value: one of the two bounds of the lattice, or something in between.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AbstractValueKind {
    /// The least element of the lattice, i.e. no possible concrete state (e.g. unreachable code)
    Bottom,
    /// A regular value, strictly between the two bounds
    Value,
    /// The greatest element of the lattice, i.e. nothing is known
    Top,
}

impl AbstractValueKind {
    #[inline]
    pub const fn is_bottom(&self) -> bool {
        matches!(self, Self::Bottom)
    }

    #[inline]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value)
    }

    #[inline]
    pub const fn is_top(&self) -> bool {
        matches!(self, Self::Top)
    }
}

impl fmt::Display for AbstractValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bottom => f.write_str("_|_"),
            Self::Value => f.write_str("V"),
            Self::Top => f.write_str("T"),
        }
    }
}
