use core::fmt;

/// A result type used to indicate whether an in-place update modified a value.
///
/// Supports boolean operations, with `Changed` representing a `true` value
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChangeResult {
    Unchanged,
    Changed,
}

impl ChangeResult {
    #[inline]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Changed)
    }
}

impl fmt::Display for ChangeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changed() {
            f.write_str("changed")
        } else {
            f.write_str("unchanged")
        }
    }
}

impl From<bool> for ChangeResult {
    #[inline]
    fn from(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}

impl From<ChangeResult> for bool {
    #[inline]
    fn from(value: ChangeResult) -> Self {
        value.changed()
    }
}

impl core::ops::BitOr for ChangeResult {
    type Output = ChangeResult;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        if self.changed() { self } else { rhs }
    }
}

impl core::ops::BitAnd for ChangeResult {
    type Output = ChangeResult;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        if self.changed() { rhs } else { self }
    }
}

impl core::ops::BitOrAssign for ChangeResult {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl core::ops::BitAndAssign for ChangeResult {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}
