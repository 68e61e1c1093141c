use core::{fmt, hash::Hash, iter::Copied};

use hashbrown::{HashSet, hash_set};
use rustc_hash::FxBuildHasher;

use super::{PowersetDomain, SetRepr};
use crate::{AbstractValueKind, ChangeResult};

/// A powerset domain over an unbounded universe, backed by [HashedSetValue].
pub type HashedSetAbstractDomain<T> = PowersetDomain<HashedSetValue<T>>;

impl<T> PowersetDomain<HashedSetValue<T>>
where
    T: Copy + Eq + Hash + fmt::Debug + fmt::Display,
{
    /// Get an empty set
    pub fn empty() -> Self {
        Self::Value(HashedSetValue::new())
    }
}

/// A set representation backed by a hash set.
///
/// Unlike [SparseSetValue](super::SparseSetValue), the universe of elements is not bounded, at
/// the cost of hashing on every operation. Prefer this representation when the elements are
/// sparse within a very large universe.
#[derive(Clone)]
pub struct HashedSetValue<T> {
    set: HashSet<T, FxBuildHasher>,
}

impl<T> Default for HashedSetValue<T> {
    fn default() -> Self {
        Self {
            set: HashSet::with_hasher(FxBuildHasher),
        }
    }
}

impl<T> HashedSetValue<T>
where
    T: Copy + Eq + Hash + fmt::Debug + fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> FromIterator<T> for HashedSetValue<T>
where
    T: Copy + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::with_hasher(FxBuildHasher);
        set.extend(iter);
        Self { set }
    }
}

impl<T> SetRepr for HashedSetValue<T>
where
    T: Copy + Eq + Hash + fmt::Debug + fmt::Display,
{
    type Element = T;
    type Iter<'a>
        = Copied<hash_set::Iter<'a, T>>
    where
        Self: 'a;

    #[inline]
    fn contains(&self, element: T) -> bool {
        self.set.contains(&element)
    }

    #[inline]
    fn add(&mut self, element: T) -> ChangeResult {
        self.set.insert(element).into()
    }

    #[inline]
    fn remove(&mut self, element: T) -> ChangeResult {
        self.set.remove(&element).into()
    }

    fn clear(&mut self) {
        self.set.clear();
    }

    #[inline]
    fn size(&self) -> usize {
        self.set.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.set.iter().copied()
    }

    fn leq(&self, other: &Self) -> bool {
        self.set.len() <= other.set.len() && self.set.is_subset(&other.set)
    }

    fn join_with(&mut self, other: &Self) -> AbstractValueKind {
        self.set.extend(other.set.iter().copied());
        AbstractValueKind::Value
    }

    fn meet_with(&mut self, other: &Self) -> AbstractValueKind {
        self.set.retain(|element| other.set.contains(element));
        AbstractValueKind::Value
    }
}

impl<T> Eq for HashedSetValue<T> where T: Copy + Eq + Hash + fmt::Debug + fmt::Display {}
impl<T> PartialEq for HashedSetValue<T>
where
    T: Copy + Eq + Hash + fmt::Debug + fmt::Display,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: fmt::Debug> fmt::Debug for HashedSetValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.set.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for HashedSetValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[#{}]{{", self.set.len())?;
        for (i, element) in self.set.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;
    use crate::{AbstractDomain, DomainError};

    fn sorted(domain: &HashedSetAbstractDomain<u64>) -> Option<Vec<u64>> {
        domain.elements().map(|mut elements| {
            elements.sort_unstable();
            elements
        })
    }

    #[test]
    fn hashed_set_has_an_unbounded_universe() {
        let mut domain = HashedSetAbstractDomain::<u64>::empty();
        domain.add_all([1, u64::MAX, 1 << 40]);
        assert_eq!(domain.size(), Some(3));
        assert!(domain.contains(u64::MAX));
        assert_eq!(domain.try_add(7), Ok(ChangeResult::Changed));
    }

    #[test]
    fn hashed_set_lattice_operations() {
        let a = HashedSetAbstractDomain::<u64>::new([1, 3, 5].into_iter().collect());
        let b = HashedSetAbstractDomain::<u64>::new([3, 5, 7].into_iter().collect());

        let joined = a.clone().join(&b);
        assert_eq!(sorted(&joined), Some(alloc::vec![1, 3, 5, 7]));
        let met = a.clone().meet(&b);
        assert_eq!(sorted(&met), Some(alloc::vec![3, 5]));

        assert!(!a.leq(&b));
        assert!(met.leq(&a) && met.leq(&b));
        assert!(a.leq(&joined) && b.leq(&joined));
        assert_eq!(a.clone().widen(&b), joined);
        assert_eq!(a.narrow(&b), met);
    }

    #[test]
    fn hashed_set_bounds() {
        let mut top = HashedSetAbstractDomain::<u64>::top();
        assert_eq!(top.remove(3), ChangeResult::Unchanged);
        assert!(top.contains(3));
        assert_eq!(top.try_elements(), Err(DomainError::NotAValue(AbstractValueKind::Top)));

        let single = HashedSetAbstractDomain::<u64>::new([9].into_iter().collect());
        assert_eq!(single.to_string(), "[#1]{9}");
        assert_eq!(HashedSetAbstractDomain::<u64>::bottom().to_string(), "_|_");
        assert_eq!(top.to_string(), "T");
    }
}
