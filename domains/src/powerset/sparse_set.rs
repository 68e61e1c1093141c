use alloc::{vec, vec::Vec};
use core::{fmt, iter::Copied, slice};

use super::{PowersetDomain, SetRepr};
use crate::{AbstractValueKind, ChangeResult, DomainError, SparseElement};

/// A powerset domain over a bounded universe of unsigned integers, backed by [SparseSetValue].
pub type SparseSetAbstractDomain<T> = PowersetDomain<SparseSetValue<T>>;

impl<T: SparseElement> PowersetDomain<SparseSetValue<T>> {
    /// Get an empty set over the universe `[0, capacity)`
    pub fn with_capacity(capacity: usize) -> Self {
        Self::Value(SparseSetValue::with_capacity(capacity))
    }
}

/// A set of unsigned integers drawn from the fixed universe `[0, capacity)`.
///
/// This is the sparse set representation described in:
///
/// > P. Briggs & L. Torczon. An Efficient Representation for Sparse Sets. ACM Letters on
/// > Programming Languages and Systems, 2(1-4):59-69, 1993.
///
/// Two arrays of `capacity` entries are maintained:
///
/// * `dense`, whose first `len` entries are the elements of the set, in no particular order
/// * `sparse`, which maps each element of the universe to its slot in `dense`
///
/// An element `e` is in the set iff `sparse[e] < len && dense[sparse[e]] == e`. Entries of
/// `sparse` for absent elements are stale, and are never trusted without that check, which is
/// what makes it possible to insert, remove, test membership and clear in constant time, without
/// ever initializing the arrays.
///
/// The trade-off is that removal swaps the last element of `dense` into the vacated slot, so the
/// iteration order of the set is an artifact of the sequence of insertions and removals, and
/// carries no meaning.
///
/// The capacity of a set is fixed at construction, and only ever grows when joined with a set of
/// larger capacity. Inserting an element outside of the universe is a no-op.
#[derive(Clone)]
pub struct SparseSetValue<T> {
    dense: Vec<T>,
    sparse: Vec<usize>,
    len: usize,
}

impl<T: SparseElement> SparseSetValue<T> {
    /// Get an empty set over the universe `[0, capacity)`
    pub fn with_capacity(capacity: usize) -> Self {
        let () = T::WIDTH_CHECK;

        Self {
            dense: vec![T::ZERO; capacity],
            sparse: vec![0; capacity],
            len: 0,
        }
    }

    /// Like [SparseSetValue::with_capacity], but returns an error if the universe contains
    /// elements which cannot be represented by `T`.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, DomainError> {
        if capacity > 0 && capacity - 1 > T::MAX_INDEX {
            return Err(DomainError::CapacityOverflow {
                capacity,
                max_element: T::MAX_INDEX,
            });
        }
        Ok(Self::with_capacity(capacity))
    }

    /// Get a set over the universe `[0, capacity)` containing `elements`.
    ///
    /// Elements outside of the universe are ignored.
    pub fn from_elements<I>(capacity: usize, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::with_capacity(capacity);
        for element in elements {
            set.add(element);
        }
        set
    }

    /// The size of the universe of this set
    #[inline]
    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The elements of this set, in the order of the dense array
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.dense[..self.len]
    }

    /// Get the slot of `element` in the dense array, if present
    #[inline]
    fn position(&self, element: T) -> Option<usize> {
        let slot = *self.sparse.get(element.index())?;
        (slot < self.len && self.dense[slot] == element).then_some(slot)
    }

    /// Extend the universe of this set to `[0, capacity)`, preserving its contents
    fn grow(&mut self, capacity: usize) {
        log::trace!(
            target: "dataflow:domain",
            "growing sparse set universe from {} to {capacity}",
            self.capacity()
        );
        self.dense.resize(capacity, T::ZERO);
        self.sparse.resize(capacity, 0);
    }
}

impl<T: SparseElement> SetRepr for SparseSetValue<T> {
    type Element = T;
    type Iter<'a>
        = Copied<slice::Iter<'a, T>>
    where
        Self: 'a;

    #[inline]
    fn contains(&self, element: T) -> bool {
        self.position(element).is_some()
    }

    fn add(&mut self, element: T) -> ChangeResult {
        let index = element.index();
        if index >= self.capacity() || self.position(element).is_some() {
            return ChangeResult::Unchanged;
        }

        // There is at least one absent element in the universe, so `len < capacity`
        let slot = self.len;
        self.dense[slot] = element;
        self.sparse[index] = slot;
        self.len += 1;
        ChangeResult::Changed
    }

    fn try_add(&mut self, element: T) -> Result<ChangeResult, DomainError> {
        let capacity = self.capacity();
        if element.index() >= capacity {
            return Err(DomainError::OutOfUniverse {
                element: element.index(),
                capacity,
            });
        }
        Ok(self.add(element))
    }

    fn remove(&mut self, element: T) -> ChangeResult {
        let Some(slot) = self.position(element) else {
            return ChangeResult::Unchanged;
        };

        let last = self.dense[self.len - 1];
        self.len -= 1;
        self.dense[slot] = last;
        self.sparse[last.index()] = slot;
        ChangeResult::Changed
    }

    #[inline]
    fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    fn size(&self) -> usize {
        self.len
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter().copied()
    }

    fn elements(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    fn leq(&self, other: &Self) -> bool {
        if self.len > other.len {
            return false;
        }
        self.iter().all(|element| other.contains(element))
    }

    fn join_with(&mut self, other: &Self) -> AbstractValueKind {
        if other.capacity() > self.capacity() {
            self.grow(other.capacity());
        }
        for &element in other.as_slice() {
            self.add(element);
        }
        AbstractValueKind::Value
    }

    fn meet_with(&mut self, other: &Self) -> AbstractValueKind {
        let mut slot = 0;
        while slot < self.len {
            let element = self.dense[slot];
            if other.contains(element) {
                slot += 1;
            } else {
                // The last element is swapped into `slot`, so it must be visited before advancing
                self.remove(element);
            }
        }
        AbstractValueKind::Value
    }
}

impl<'a, T: SparseElement> IntoIterator for &'a SparseSetValue<T> {
    type IntoIter = Copied<slice::Iter<'a, T>>;
    type Item = T;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: SparseElement> Eq for SparseSetValue<T> {}
impl<T: SparseElement> PartialEq for SparseSetValue<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: SparseElement> fmt::Debug for SparseSetValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.as_slice()).finish()
    }
}

impl<T: SparseElement> fmt::Display for SparseSetValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[#{}]{{", self.len)?;
        for (i, element) in self.as_slice().iter().enumerate() {
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
    use alloc::{format, string::ToString, vec::Vec};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::AbstractDomain;

    /// Check the structural invariants of the sparse set representation
    fn assert_well_formed<T: SparseElement>(set: &SparseSetValue<T>) {
        assert_eq!(set.dense.len(), set.sparse.len());
        assert!(set.len <= set.capacity());
        for (slot, element) in set.as_slice().iter().enumerate() {
            assert_eq!(set.sparse[element.index()], slot, "stale sparse entry for {element}");
        }
        let members = (0..set.capacity())
            .filter_map(T::from_index)
            .filter(|element| set.contains(*element))
            .count();
        assert_eq!(members, set.size());
    }

    fn sorted<T: SparseElement>(set: &SparseSetValue<T>) -> Vec<T> {
        let mut elements = set.elements();
        elements.sort();
        elements
    }

    #[test]
    fn sparse_set_add_remove_contains() {
        let mut set = SparseSetValue::<u32>::with_capacity(8);
        assert!(set.is_empty());
        assert_eq!(set.add(3), ChangeResult::Changed);
        assert_eq!(set.add(3), ChangeResult::Unchanged);
        assert!(set.contains(3));
        assert_eq!(set.size(), 1);

        assert_eq!(set.remove(3), ChangeResult::Changed);
        assert_eq!(set.remove(3), ChangeResult::Unchanged);
        assert!(!set.contains(3));
        assert!(set.is_empty());
        assert_well_formed(&set);
    }

    #[test]
    fn sparse_set_ignores_elements_outside_of_universe() {
        let mut set = SparseSetValue::<u32>::from_elements(4, [1, 9]);
        assert_eq!(set.add(4), ChangeResult::Unchanged);
        assert_eq!(set.remove(9), ChangeResult::Unchanged);
        assert!(!set.contains(9));
        assert_eq!(set.elements(), [1]);
        assert_eq!(
            set.try_add(4),
            Err(DomainError::OutOfUniverse {
                element: 4,
                capacity: 4
            })
        );
        assert_eq!(set.try_add(2), Ok(ChangeResult::Changed));
    }

    #[test]
    fn sparse_set_remove_swaps_last_element_into_vacated_slot() {
        let mut set = SparseSetValue::<u16>::from_elements(10, [4, 7, 1, 9]);
        set.remove(7);
        assert_eq!(set.as_slice(), [4, 9, 1]);
        set.remove(1);
        assert_eq!(set.as_slice(), [4, 9]);
        assert_well_formed(&set);
    }

    #[test]
    fn sparse_set_clear_retains_capacity() {
        let mut set = SparseSetValue::<u8>::from_elements(16, [0, 5, 15]);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 16);
        assert!(!set.contains(5));
        set.add(5);
        assert_eq!(set.elements(), [5]);
        assert_well_formed(&set);
    }

    #[test]
    fn sparse_set_join_and_meet() {
        let a = SparseSetValue::<u32>::from_elements(8, [1, 3, 5]);
        let b = SparseSetValue::<u32>::from_elements(8, [3, 5, 7]);

        let mut joined = a.clone();
        assert_eq!(joined.join_with(&b), AbstractValueKind::Value);
        assert_eq!(sorted(&joined), [1, 3, 5, 7]);
        assert_eq!(joined.size(), 4);

        let mut met = a.clone();
        assert_eq!(met.meet_with(&b), AbstractValueKind::Value);
        assert_eq!(sorted(&met), [3, 5]);
        assert_eq!(met.size(), 2);

        assert!(!a.leq(&b));
        assert!(a.leq(&joined));
        assert!(met.leq(&a));
        assert!(!a.contains(9));
    }

    #[test]
    fn sparse_set_join_grows_universe() {
        let mut a = SparseSetValue::<u32>::from_elements(4, [0, 2]);
        let b = SparseSetValue::<u32>::from_elements(10, [9]);
        a.join_with(&b);
        assert_eq!(a.capacity(), 10);
        assert_eq!(sorted(&a), [0, 2, 9]);
        assert_well_formed(&a);

        // The universe never shrinks
        let c = SparseSetValue::<u32>::from_elements(2, [1]);
        a.join_with(&c);
        assert_eq!(a.capacity(), 10);
        assert_eq!(sorted(&a), [0, 1, 2, 9]);
    }

    #[test]
    fn sparse_set_meet_revisits_swapped_elements() {
        // Every element but the last must be removed, each removal swaps in another element to
        // be removed.
        let mut set = SparseSetValue::<u32>::from_elements(8, [0, 1, 2, 3, 4, 5]);
        let other = SparseSetValue::<u32>::from_elements(8, [5]);
        set.meet_with(&other);
        assert_eq!(set.as_slice(), [5]);
        assert_well_formed(&set);

        let mut set = SparseSetValue::<u32>::from_elements(8, [6, 7, 1, 2]);
        let other = SparseSetValue::<u32>::from_elements(8, [1]);
        set.meet_with(&other);
        assert_eq!(set.as_slice(), [1]);
        assert_well_formed(&set);
    }

    #[test]
    fn sparse_set_equality_ignores_order() {
        let a = SparseSetValue::<u32>::from_elements(8, [1, 2, 3]);
        let b = SparseSetValue::<u32>::from_elements(8, [3, 1, 2]);
        assert_ne!(a.as_slice(), b.as_slice());
        assert!(a.equals(&b));
        assert_eq!(a, b);

        let c = SparseSetValue::<u32>::from_elements(8, [1, 2]);
        assert!(!a.equals(&c));
        assert!(c.leq(&a));
    }

    #[test]
    fn sparse_set_clone_does_not_alias() {
        let a = SparseSetValue::<u32>::from_elements(8, [1, 2]);
        let mut b = a.clone();
        b.remove(1);
        b.add(6);
        assert_eq!(a.elements(), [1, 2]);
        assert_eq!(sorted(&b), [2, 6]);
    }

    #[test]
    fn sparse_set_capacity_must_fit_element_type() {
        assert!(SparseSetValue::<u8>::try_with_capacity(256).is_ok());
        assert_eq!(
            SparseSetValue::<u8>::try_with_capacity(257).err(),
            Some(DomainError::CapacityOverflow {
                capacity: 257,
                max_element: 255
            })
        );
        assert!(SparseSetValue::<u8>::try_with_capacity(0).is_ok_and(|set| set.is_empty()));
    }

    #[test]
    fn sparse_set_rendering() {
        let mut set = SparseSetValue::<u32>::with_capacity(8);
        assert_eq!(set.to_string(), "[#0]{}");
        set.add(5);
        set.add(1);
        assert_eq!(set.to_string(), "[#2]{5, 1}");
        assert_eq!(format!("{set:?}"), "{5, 1}");
    }

    #[test]
    fn sparse_set_abstract_domain_with_capacity() {
        let mut domain = SparseSetAbstractDomain::<u32>::with_capacity(4);
        assert!(domain.is_value());
        assert_eq!(domain.size(), Some(0));
        assert!(!domain.equals(&SparseSetAbstractDomain::bottom()));
        domain.add_all([0, 3, 4]);
        assert_eq!(domain.to_string(), "[#2]{0, 3}");
        assert_eq!(domain.as_value().map(SparseSetValue::capacity), Some(4));
    }
}
